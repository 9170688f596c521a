//! Neo Extensions Framework
//!
//! Shared extension traits and small utility helpers used across the node.
//! Plugin discovery lives in a separate collaborator and is not part of
//! this crate.

pub mod collections;
pub mod encoding;
pub mod error;
pub mod utilities;

// Core extensions moved from neo-core
pub mod byte_extensions;
pub mod uint160_extensions;

// Re-export commonly used types
pub use error::{ExtensionError, ExtensionResult};

// Re-export core extensions
pub use byte_extensions::ByteExtensions;
pub use uint160_extensions::UInt160Extensions;
