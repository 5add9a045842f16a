//! Format detection.
//!
//! Three cooperating classifiers:
//! - [`magic::classify_by_magic`] matches leading bytes against an ordered
//!   signature table;
//! - [`extension::classify_by_extension`] is the filename-based fallback;
//! - [`executable::classify_executable`] performs the secondary cascade for
//!   MZ executable containers.
//!
//! Magic-byte classification always takes precedence over extension-based
//! classification when both are available.

pub mod executable;
pub mod extension;
pub mod magic;

pub use executable::classify_executable;
pub use extension::classify_by_extension;
pub use magic::classify_by_magic;
