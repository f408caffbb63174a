/// Shared kernel - errors, result alias and security validation used by every layer
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
