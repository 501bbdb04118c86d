//! Core library components.
//!
//! The encrypted-profile engine: envelope encryption, profile storage, site
//! operations, and file encryption. Nothing in here prints or prompts;
//! callers interact through [`hooks::Hooks`].

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod files;
pub mod hooks;
pub mod registry;
pub mod session;
pub mod store;
pub mod types;
