//! Credkeep - a local credential vault.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── profile       # Profile create/list/remove/passwd
//! │   ├── site/         # Site add/rm/rename/set/list/get
//! │   ├── file          # File encrypt/decrypt
//! │   ├── config        # Settings init/show
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── cipher/       # Argon2id + XChaCha20-Poly1305 envelope
//!     ├── domain/       # Profile, Site, and query views
//!     ├── store/        # Profile storage (filesystem, memory)
//!     ├── session       # Open profile bound to its password
//!     ├── registry/     # Site operations
//!     ├── files         # Standalone file encryption
//!     ├── hooks         # Step notifications, prompts
//!     └── config        # config.toml management
//! ```
//!
//! # Features
//!
//! - One self-describing envelope format for profiles and files
//! - Sites with arbitrary fields and ordered tags
//! - Substring-then-regex site search with match spans
//! - Encrypted files optionally recorded as sites

pub mod cli;
pub mod core;
pub mod error;
