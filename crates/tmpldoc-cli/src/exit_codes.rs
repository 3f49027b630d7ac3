//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Extraction error - a descriptor could not be parsed or documented
pub const EXTRACT_ERROR: i32 = 2;

/// Template error - page or README rendering failed
pub const TEMPLATE_ERROR: i32 = 3;

/// Configuration error - invalid tmpldoc.yaml or template override
pub const CONFIG_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
