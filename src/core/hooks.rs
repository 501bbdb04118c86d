//! Step notifications and caller hooks.
//!
//! Core operations never print or prompt. They announce what they are doing
//! through [`Hooks::on_step`], report failures through [`Hooks::on_error`]
//! before returning them, and ask the caller for confirmations and passwords.

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Error, Result, ValidationError};

/// Named stages of profile, site, and file operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    ProfileLoading,
    ProfileSaving,
    ProfilePassword,
    ProfileNewPassword,
    SiteAdding,
    SiteExists,
    SiteMissing,
    SiteConfirmRemove,
    SiteRemoving,
    SiteRenaming,
    SiteUpdating,
    PatternCompile,
    ListingSites,
    ListingFields,
    InvalidField,
    SettingClipboard,
    SettingClipboardPassword,
    FilePassword,
    FileNewPassword,
    FileOpeningInput,
    FileCreatingOutput,
    FileEncrypting,
    FileDecrypting,
    FileSavingSite,
    FileDeletingInput,
    FileInvalidOutput,
    Done,
}

impl Step {
    /// Short human readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileLoading => "loading profile",
            Self::ProfileSaving => "saving profile",
            Self::ProfilePassword => "profile password",
            Self::ProfileNewPassword => "new profile password",
            Self::SiteAdding => "adding site",
            Self::SiteExists => "site exists",
            Self::SiteMissing => "site missing",
            Self::SiteConfirmRemove => "confirm site removal",
            Self::SiteRemoving => "removing site",
            Self::SiteRenaming => "renaming site",
            Self::SiteUpdating => "updating site",
            Self::PatternCompile => "compiling pattern",
            Self::ListingSites => "listing sites",
            Self::ListingFields => "listing fields",
            Self::InvalidField => "invalid field",
            Self::SettingClipboard => "copying field",
            Self::SettingClipboardPassword => "copying password",
            Self::FilePassword => "file password",
            Self::FileNewPassword => "new file password",
            Self::FileOpeningInput => "opening input",
            Self::FileCreatingOutput => "creating output",
            Self::FileEncrypting => "encrypting",
            Self::FileDecrypting => "decrypting",
            Self::FileSavingSite => "saving file site",
            Self::FileDeletingInput => "deleting original",
            Self::FileInvalidOutput => "invalid output",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callbacks supplied by whoever drives an operation.
///
/// Every method has a default so implementors override only what they use.
/// The defaults decline confirmations and refuse to supply passwords.
pub trait Hooks {
    /// A step is about to run (or, for `Done`, the operation finished).
    fn on_step(&mut self, _step: Step) {}

    /// The operation failed at `step`. The same error is returned to the
    /// caller right after this call.
    fn on_error(&mut self, _step: Step, _err: &Error) {}

    /// Ask for a yes/no decision before a destructive step.
    fn confirm(&mut self, _step: Step) -> bool {
        false
    }

    /// Ask for a password. `step` tells whether an existing or a new
    /// password is wanted.
    fn password(&mut self, _step: Step) -> Result<Zeroizing<String>> {
        Err(ValidationError::EmptyPassword.into())
    }
}

/// Hooks that ignore every notification.
impl Hooks for () {}

/// Hooks that log every notification through `tracing`.
///
/// Confirmations and passwords are delegated to an inner implementation.
pub struct TracingHooks<H> {
    inner: H,
}

impl<H: Hooks> TracingHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    /// Unwrap the inner hooks.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: Hooks> Hooks for TracingHooks<H> {
    fn on_step(&mut self, step: Step) {
        debug!(step = %step, "step");
        self.inner.on_step(step);
    }

    fn on_error(&mut self, step: Step, err: &Error) {
        debug!(step = %step, error = %err, "step failed");
        self.inner.on_error(step, err);
    }

    fn confirm(&mut self, step: Step) -> bool {
        let answer = self.inner.confirm(step);
        debug!(step = %step, answer, "confirmation");
        answer
    }

    fn password(&mut self, step: Step) -> Result<Zeroizing<String>> {
        debug!(step = %step, "password requested");
        self.inner.password(step)
    }
}

/// Report `err` at `step` and hand it back for returning.
pub(crate) fn fail(hooks: &mut dyn Hooks, step: Step, err: impl Into<Error>) -> Error {
    let err = err.into();
    hooks.on_error(step, &err);
    err
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording hooks shared by unit tests.

    use super::*;

    /// Records steps and errors; answers confirmations and passwords from
    /// preset values.
    #[derive(Default)]
    pub struct Recorder {
        pub steps: Vec<Step>,
        pub errors: Vec<(Step, String)>,
        pub confirm: bool,
        pub passwords: Vec<String>,
        pub asked: Vec<Step>,
    }

    impl Recorder {
        pub fn confirming() -> Self {
            Self {
                confirm: true,
                ..Self::default()
            }
        }

        pub fn with_password(password: &str) -> Self {
            Self {
                passwords: vec![password.to_string()],
                ..Self::default()
            }
        }
    }

    impl Hooks for Recorder {
        fn on_step(&mut self, step: Step) {
            self.steps.push(step);
        }

        fn on_error(&mut self, step: Step, err: &Error) {
            self.errors.push((step, err.to_string()));
        }

        fn confirm(&mut self, step: Step) -> bool {
            self.asked.push(step);
            self.confirm
        }

        fn password(&mut self, step: Step) -> Result<Zeroizing<String>> {
            self.asked.push(step);
            if self.passwords.is_empty() {
                return Err(ValidationError::EmptyPassword.into());
            }
            Ok(Zeroizing::new(self.passwords.remove(0)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Recorder;
    use super::*;

    #[test]
    fn test_default_hooks_decline() {
        let mut hooks = ();
        assert!(!hooks.confirm(Step::SiteConfirmRemove));
        assert!(hooks.password(Step::ProfilePassword).is_err());
    }

    #[test]
    fn test_tracing_hooks_delegate() {
        let mut hooks = TracingHooks::new(Recorder::confirming());
        hooks.on_step(Step::SiteAdding);
        assert!(hooks.confirm(Step::SiteConfirmRemove));
        let inner = hooks.into_inner();
        assert_eq!(inner.steps, vec![Step::SiteAdding]);
        assert_eq!(inner.asked, vec![Step::SiteConfirmRemove]);
    }

    #[test]
    fn test_fail_reports_and_returns() {
        let mut rec = Recorder::default();
        let err = fail(&mut rec, Step::SiteMissing, ValidationError::EmptySiteName);
        assert!(matches!(err, Error::Validation(ValidationError::EmptySiteName)));
        assert_eq!(rec.errors.len(), 1);
        assert_eq!(rec.errors[0].0, Step::SiteMissing);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::PatternCompile.to_string(), "compiling pattern");
    }
}
