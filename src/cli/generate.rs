//! Random password generation.

use rand::rngs::OsRng;
use rand::Rng;
use zeroize::Zeroizing;

/// Default length of generated passwords.
pub const DEFAULT_LENGTH: usize = 20;

const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!#$%&*+-=?@^_";

/// Generate a password of `length` characters.
///
/// Every class (lower, upper, digit, symbol) appears at least once when
/// `length` is 4 or more. Look-alike characters are left out.
pub fn password(length: usize) -> Zeroizing<String> {
    let classes = [LOWER, UPPER, DIGITS, SYMBOLS];
    let all: Vec<u8> = classes.concat();
    let mut rng = OsRng;

    let mut chars: Zeroizing<Vec<u8>> = Zeroizing::new(Vec::with_capacity(length));
    for class in classes.iter().take(length) {
        chars.push(class[rng.gen_range(0..class.len())]);
    }
    while chars.len() < length {
        chars.push(all[rng.gen_range(0..all.len())]);
    }
    // Fisher-Yates so the guaranteed characters are not always first.
    for i in (1..chars.len()).rev() {
        let j = rng.gen_range(0..=i);
        chars.swap(i, j);
    }

    Zeroizing::new(chars.iter().map(|&b| b as char).collect())
}
