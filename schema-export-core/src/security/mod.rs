//! Credential protection.
//!
//! Passwords resolved from flags, the environment, or the config file are held
//! in `Zeroizing` containers and never appear in logs, errors, or output.

mod credentials;

pub use credentials::Credentials;
