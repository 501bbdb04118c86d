//! Standalone file encryption.
//!
//! Files are sealed in the same envelope format as profiles. An encrypted
//! file can optionally be registered in the open profile as a site named
//! after the input file, holding the output path and, on request, the
//! envelope itself.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::cipher::{Envelope, KdfParams};
use crate::core::constants::{DEFAULT_FILE_EXTENSION, FILE_CONTENT_FIELD, FILE_PATH_FIELD};
use crate::core::hooks::{fail, Hooks, Step};
use crate::core::registry::{AddSite, Registry, SiteUpdate};
use crate::core::session::Session;
use crate::core::store::write_private;
use crate::error::{CipherError, Error, FileError, Result, SiteError};

/// How an encrypted file is recorded in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Store the output path in the `file` field.
    Path,
    /// Also store the base64 envelope in the `content` field.
    Contents,
}

/// Options for [`FileEncryptor::encrypt`].
#[derive(Debug, Clone, Default)]
pub struct EncryptFile {
    pub input: PathBuf,
    /// Defaults to the input path with the encrypted extension appended.
    pub output: Option<PathBuf>,
    pub delete_original: bool,
    pub register: Option<Registration>,
}

/// Options for [`FileEncryptor::decrypt`].
#[derive(Debug, Clone)]
pub struct DecryptFile {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Result of a successful encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encrypted {
    pub output: PathBuf,
    /// Site the file was registered under, if any.
    pub site: Option<String>,
}

/// Encrypts and decrypts files with the envelope cipher.
#[derive(Debug, Clone)]
pub struct FileEncryptor {
    envelope: Envelope,
    extension: String,
}

impl Default for FileEncryptor {
    fn default() -> Self {
        Self::new(KdfParams::default(), DEFAULT_FILE_EXTENSION)
    }
}

impl FileEncryptor {
    pub fn new(kdf: KdfParams, extension: impl Into<String>) -> Self {
        Self {
            envelope: Envelope::new(kdf),
            extension: extension.into(),
        }
    }

    /// Extension appended to encrypted files.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `<input>.<extension>`.
    pub fn encrypted_path(&self, input: &Path) -> PathBuf {
        let mut name = OsString::from(input.as_os_str());
        name.push(".");
        name.push(&self.extension);
        PathBuf::from(name)
    }

    /// The input path with the encrypted extension removed, if it has it.
    pub fn decrypted_path(&self, input: &Path) -> Option<PathBuf> {
        let ext = input.extension()?;
        if ext != self.extension.as_str() || input.file_stem().is_none() {
            return None;
        }
        Some(input.with_extension(""))
    }

    /// Encrypt a file.
    ///
    /// With `register` set, the open `session` gets a site named after the
    /// input file (added if new, updated otherwise) and is committed.
    ///
    /// # Errors
    ///
    /// Returns `FileError::InvalidOutput` before any I/O if the output is the
    /// input, `FileError::InputOpen` / `FileError::OutputCreate` for I/O
    /// failures, and `FileError::DeleteOriginal` if the input cannot be
    /// removed afterwards. The encrypted output is kept in the last case.
    pub fn encrypt(
        &self,
        request: &EncryptFile,
        password: &str,
        session: Option<&mut Session<'_>>,
        hooks: &mut dyn Hooks,
    ) -> Result<Encrypted> {
        let input = &request.input;
        let output = request
            .output
            .clone()
            .unwrap_or_else(|| self.encrypted_path(input));
        check_distinct(input, &output, hooks)?;
        if request.register.is_some() && session.is_none() {
            return Err(fail(
                hooks,
                Step::FileSavingSite,
                Error::Other("registering a file requires an open profile".to_string()),
            ));
        }

        hooks.on_step(Step::FileOpeningInput);
        let plaintext = Zeroizing::new(fs::read(input).map_err(|source| {
            fail(
                hooks,
                Step::FileOpeningInput,
                FileError::InputOpen {
                    path: input.clone(),
                    source,
                },
            )
        })?);

        hooks.on_step(Step::FileCreatingOutput);
        let existed = output.exists();
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&output)
            .map_err(|source| output_error(hooks, &output, source))?;

        hooks.on_step(Step::FileEncrypting);
        let sealed = match self.envelope.seal(&plaintext, password) {
            Ok(sealed) => sealed,
            Err(e) => {
                if !existed {
                    let _ = fs::remove_file(&output);
                }
                return Err(fail(hooks, Step::FileEncrypting, FileError::Encrypt(cipher_error(e))));
            }
        };
        write_private(&output, &sealed).map_err(|source| output_error(hooks, &output, source))?;
        info!(input = %input.display(), output = %output.display(), bytes = sealed.len(), "file encrypted");

        let mut site = None;
        if let (Some(registration), Some(session)) = (request.register, session) {
            hooks.on_step(Step::FileSavingSite);
            let name = register(session.registry_mut(), input, &output, &sealed, registration, hooks)?;
            session.commit(hooks)?;
            site = Some(name);
        }

        if request.delete_original {
            hooks.on_step(Step::FileDeletingInput);
            fs::remove_file(input).map_err(|source| {
                fail(
                    hooks,
                    Step::FileDeletingInput,
                    FileError::DeleteOriginal {
                        path: input.clone(),
                        source,
                    },
                )
            })?;
            debug!(path = %input.display(), "original deleted");
        }

        hooks.on_step(Step::Done);
        Ok(Encrypted { output, site })
    }

    /// Decrypt a file.
    ///
    /// # Errors
    ///
    /// Returns `FileError::InvalidOutput` before any I/O if the output is the
    /// input and `FileError::Decrypt` if the password is wrong or the file
    /// was modified. The two cases are not distinguished.
    pub fn decrypt(&self, request: &DecryptFile, password: &str, hooks: &mut dyn Hooks) -> Result<()> {
        let DecryptFile { input, output } = request;
        check_distinct(input, output, hooks)?;

        hooks.on_step(Step::FileOpeningInput);
        let sealed = fs::read(input).map_err(|source| {
            fail(
                hooks,
                Step::FileOpeningInput,
                FileError::InputOpen {
                    path: input.clone(),
                    source,
                },
            )
        })?;

        let plaintext = open_sealed(&sealed, password, hooks)?;

        hooks.on_step(Step::FileCreatingOutput);
        write_private(output, &plaintext).map_err(|source| output_error(hooks, output, source))?;
        info!(input = %input.display(), output = %output.display(), "file decrypted");

        hooks.on_step(Step::Done);
        Ok(())
    }

    /// Recover a file whose envelope is stored in a site's `content` field.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::NotFound` / `SiteError::FieldNotFound` if the
    /// site or its content is missing and `FileError::Decrypt` if the stored
    /// envelope does not open.
    pub fn decrypt_site_content(
        &self,
        registry: &Registry,
        site: &str,
        output: &Path,
        password: &str,
        hooks: &mut dyn Hooks,
    ) -> Result<()> {
        let Some(record) = registry.site(site) else {
            return Err(fail(hooks, Step::SiteMissing, SiteError::NotFound(site.to_string())));
        };
        let Some(content) = record.field(FILE_CONTENT_FIELD) else {
            return Err(fail(
                hooks,
                Step::InvalidField,
                SiteError::FieldNotFound {
                    site: site.to_string(),
                    field: FILE_CONTENT_FIELD.to_string(),
                },
            ));
        };

        hooks.on_step(Step::FileOpeningInput);
        let sealed = BASE64.decode(content).map_err(|e| {
            fail(
                hooks,
                Step::FileOpeningInput,
                FileError::Decrypt(CipherError::MalformedEnvelope(format!("bad base64: {}", e))),
            )
        })?;

        let plaintext = open_sealed(&sealed, password, hooks)?;

        hooks.on_step(Step::FileCreatingOutput);
        write_private(output, &plaintext).map_err(|source| output_error(hooks, output, source))?;
        info!(site, output = %output.display(), "site content decrypted");

        hooks.on_step(Step::Done);
        Ok(())
    }
}

/// Fail if `input` and `output` name the same file, however spelled.
fn check_distinct(input: &Path, output: &Path, hooks: &mut dyn Hooks) -> Result<()> {
    if input == output || resolve(input) == resolve(output) {
        return Err(fail(
            hooks,
            Step::FileInvalidOutput,
            FileError::InvalidOutput(output.to_path_buf()),
        ));
    }
    Ok(())
}

/// Absolute form of `path` for identity checks.
///
/// Existing paths are canonicalized. For a path that does not exist yet, the
/// parent directory is canonicalized and the file name appended.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

fn open_sealed(sealed: &[u8], password: &str, hooks: &mut dyn Hooks) -> Result<Zeroizing<Vec<u8>>> {
    hooks.on_step(Step::FileDecrypting);
    Envelope::open(sealed, password)
        .map_err(|e| fail(hooks, Step::FileDecrypting, FileError::Decrypt(cipher_error(e))))
}

fn cipher_error(err: Error) -> CipherError {
    match err {
        Error::Cipher(e) => e,
        other => CipherError::Encryption(other.to_string()),
    }
}

fn output_error(hooks: &mut dyn Hooks, path: &Path, source: std::io::Error) -> Error {
    fail(
        hooks,
        Step::FileCreatingOutput,
        FileError::OutputCreate {
            path: path.to_path_buf(),
            source,
        },
    )
}

/// Record an encrypted file as a site. Returns the site name.
fn register(
    registry: &mut Registry,
    input: &Path,
    output: &Path,
    sealed: &[u8],
    registration: Registration,
    hooks: &mut dyn Hooks,
) -> Result<String> {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let location = fs::canonicalize(output).unwrap_or_else(|_| output.to_path_buf());

    let mut fields = vec![(FILE_PATH_FIELD.to_string(), location.display().to_string())];
    if registration == Registration::Contents {
        fields.push((FILE_CONTENT_FIELD.to_string(), BASE64.encode(sealed)));
    }

    if registry.site(&name).is_some() {
        // A stale envelope would be restored instead of the new file.
        let delete_fields = match registration {
            Registration::Path => vec![FILE_CONTENT_FIELD.to_string()],
            Registration::Contents => Vec::new(),
        };
        registry.set(
            &name,
            SiteUpdate {
                set_fields: fields,
                delete_fields,
                ..SiteUpdate::default()
            },
            hooks,
        )?;
    } else {
        registry.add(
            AddSite {
                name: name.clone(),
                fields,
                ..AddSite::default()
            },
            hooks,
        )?;
    }
    debug!(site = %name, ?registration, "file registered");
    Ok(name)
}
