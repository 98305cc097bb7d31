//! # Archivotron Core
//!
//! Deterministic path construction from named attributes.
//!
//! A caller declares which attributes are legal and how a path is assembled from literal
//! separators and attribute-bound components, terminates the template, then renders it for any
//! number of attribute maps:
//!
//! ```
//! use archivotron_core::{AttributeMap, PathTemplate, TemplateOptions};
//!
//! # fn main() -> Result<(), archivotron_core::TemplateError> {
//! let mut template = PathTemplate::new(TemplateOptions::default().with_file_separator("/"))?;
//! template.add_attribute("subject", true)?;
//! template.add_attribute("session", false)?;
//! template.add_component("subject", None, false, true)?;
//! template.add_filesep()?;
//! template.add_component("subject", None, false, true)?;
//! template.add_component("session", None, false, false)?;
//! template.terminate()?;
//!
//! let attributes = AttributeMap::from([("subject".to_string(), "Jen".to_string())]);
//! assert_eq!(template.render(&attributes)?, "/subject-Jen/subject-Jen");
//! # Ok(())
//! # }
//! ```
//!
//! **No I/O**: rendered paths are plain strings. Creating directories or checking existence is
//! the caller's job.

pub mod config;
pub mod constants;
pub mod presets;
pub mod registry;
pub mod rules;
pub mod segment;
pub mod template;
pub mod validation;

mod error;

use std::collections::BTreeMap;

pub use archivotron_types::{AttributeName, NameError};
pub use config::{TemplateConfig, TemplateOptions};
pub use error::{TemplateError, TemplateResult};
pub use registry::{AttributeRegistry, AttributeSpec};
pub use rules::InclusionRule;
pub use segment::{Component, Segment};
pub use template::{PathTemplate, TemplateState};

/// Attribute values supplied to [`PathTemplate::render`].
///
/// Ordered, so that "the first unknown key" and "the first offending key" are well defined.
pub type AttributeMap = BTreeMap<String, String>;
