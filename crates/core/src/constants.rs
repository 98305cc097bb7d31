//! Constants used throughout the archivotron core crate.

/// Separator placed between two adjacent components when none is given explicitly.
pub const DEFAULT_ATTRIBUTE_SEPARATOR: &str = "_";

/// Separator placed between a component's key and its value.
pub const DEFAULT_KV_SEPARATOR: &str = "-";

/// The only file separators a template accepts.
pub const VALID_FILE_SEPARATORS: [&str; 2] = ["/", "\\"];
