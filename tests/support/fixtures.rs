//! Test fixtures and constants.

/// Master password supplied through CREDKEEP_PASSWORD.
pub const PASSWORD: &str = "correct horse battery staple";

/// Settings with the cheapest accepted KDF cost so tests stay fast.
pub const CHEAP_CONFIG: &str = "[kdf]\nmemory_kib = 64\niterations = 1\nparallelism = 1\n";

/// Sites added by `Test::with_sites`: name, fields, tags.
pub const STANDARD_SITES: &[(&str, &[&str], &[&str])] = &[
    (
        "site1.com",
        &["username=alice", "password=hunter2"],
        &["work"],
    ),
    ("site2.com", &["username=bob", "password=s3cret"], &["home"]),
    (
        "other.net",
        &["username=carol", "url=https://other.net"],
        &["work", "mail"],
    ),
];
