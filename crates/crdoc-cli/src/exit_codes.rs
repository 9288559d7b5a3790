//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Template error - template parsing or rendering failed
pub const TEMPLATE_ERROR: i32 = 3;

/// Source error - the Go package could not be parsed or modeled
pub const SOURCE_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
