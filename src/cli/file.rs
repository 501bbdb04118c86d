//! File commands: encrypt, decrypt, restore.

use std::path::PathBuf;

use crate::cli::context::{self, Context};
use crate::cli::output;
use crate::core::files::{DecryptFile, EncryptFile, Registration};
use crate::core::hooks::{Hooks, Step};
use crate::error::{Error, Result};

/// Encrypt a file, optionally recording it as a site.
pub fn encrypt(
    profile: Option<String>,
    input: PathBuf,
    output: Option<PathBuf>,
    delete: bool,
    register: bool,
    store_content: bool,
) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);
    let encryptor = ctx.encryptor();

    let registration = match (register, store_content) {
        (_, true) => Some(Registration::Contents),
        (true, false) => Some(Registration::Path),
        (false, false) => None,
    };
    let mut session = match registration {
        Some(_) => Some(ctx.open(&mut hooks)?),
        None => None,
    };

    hooks.on_step(Step::FileNewPassword);
    let password = hooks.password(Step::FileNewPassword)?;

    let request = EncryptFile {
        input,
        output,
        delete_original: delete,
        register: registration,
    };
    let result = encryptor.encrypt(&request, &password, session.as_mut(), &mut hooks)?;

    output::success(&format!("encrypted to {}", output::path(result.output.display())));
    if let Some(site) = result.site {
        output::success(&format!("recorded as site {}", output::name(&site)));
    }
    Ok(())
}

/// Decrypt a file.
pub fn decrypt(profile: Option<String>, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);
    let encryptor = ctx.encryptor();

    let output = match output.or_else(|| encryptor.decrypted_path(&input)) {
        Some(path) => path,
        None => {
            return Err(Error::Other(format!(
                "cannot derive an output name from {} (no .{} extension), use --output",
                input.display(),
                encryptor.extension()
            )))
        }
    };

    hooks.on_step(Step::FilePassword);
    let password = hooks.password(Step::FilePassword)?;

    let request = DecryptFile { input, output };
    encryptor.decrypt(&request, &password, &mut hooks)?;

    output::success(&format!("decrypted to {}", output::path(request.output.display())));
    Ok(())
}

/// Recover a file stored in a site's content field.
pub fn restore(profile: Option<String>, site: &str, output: PathBuf) -> Result<()> {
    let ctx = Context::load(profile)?;
    let mut hooks = context::hooks(false);
    let session = ctx.open(&mut hooks)?;

    hooks.on_step(Step::FilePassword);
    let password = hooks.password(Step::FilePassword)?;

    ctx.encryptor()
        .decrypt_site_content(session.registry(), site, &output, &password, &mut hooks)?;

    output::success(&format!("restored {} to {}", output::name(site), output::path(output.display())));
    Ok(())
}
