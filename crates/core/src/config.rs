//! Template configuration.
//!
//! [`TemplateOptions`] holds the construction-time settings of a [`PathTemplate`].
//! [`TemplateConfig`] is a declarative template document, read from YAML or JSON, that builds
//! a terminated template in one step so naming conventions can live outside the code:
//!
//! ```yaml
//! options:
//!   root: ""
//!   file_separator: "/"
//! attributes:
//!   - name: sub
//!   - name: ses
//!     required: false
//! segments:
//!   - component: sub
//!   - filesep: true
//!   - component: ses
//!     required: false
//!   - component: suffix
//!     value_only: true
//! rules:
//!   - key: suffix
//!     values: T1w
//!     allowed: [sub, ses]
//! ```

use crate::constants::{DEFAULT_ATTRIBUTE_SEPARATOR, DEFAULT_KV_SEPARATOR};
use crate::validation::validate_file_separator;
use crate::{PathTemplate, TemplateError, TemplateResult};

/// Construction-time settings for a [`PathTemplate`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateOptions {
    /// `None` for an absolute path, `Some("")` for a relative one.
    pub root: Option<String>,
    pub attribute_separator: String,
    pub kv_separator: String,
    /// Host separator when `None`.
    pub file_separator: Option<String>,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            root: None,
            attribute_separator: DEFAULT_ATTRIBUTE_SEPARATOR.to_owned(),
            kv_separator: DEFAULT_KV_SEPARATOR.to_owned(),
            file_separator: None,
        }
    }
}

impl TemplateOptions {
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Rendered paths carry no root prefix.
    pub fn relative(self) -> Self {
        self.with_root("")
    }

    pub fn with_attribute_separator(mut self, separator: impl Into<String>) -> Self {
        self.attribute_separator = separator.into();
        self
    }

    pub fn with_kv_separator(mut self, separator: impl Into<String>) -> Self {
        self.kv_separator = separator.into();
        self
    }

    pub fn with_file_separator(mut self, separator: impl Into<String>) -> Self {
        self.file_separator = Some(separator.into());
        self
    }

    /// Returns the configured file separator, or the host's when none is configured.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFileSeparator` if a configured separator is not `"/"` or `"\"`.
    pub fn resolved_file_separator(&self) -> TemplateResult<String> {
        match self.file_separator.as_deref() {
            Some(separator) => {
                validate_file_separator(separator)?;
                Ok(separator.to_owned())
            }
            None => Ok(std::path::MAIN_SEPARATOR_STR.to_owned()),
        }
    }
}

fn default_true() -> bool {
    true
}

/// One entry of the `attributes` list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default = "default_true")]
    pub takes_value: bool,
}

/// A `component` entry of the `segments` list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    pub component: String,
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub value_only: bool,
    #[serde(default = "default_true")]
    pub required: bool,
}

/// A `literal` entry of the `segments` list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiteralConfig {
    pub literal: String,
}

/// A `filesep` entry of the `segments` list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesepConfig {
    pub filesep: bool,
}

/// One entry of the `segments` list. An entry mixing keys of different kinds is rejected.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum SegmentConfig {
    Component(ComponentConfig),
    Literal(LiteralConfig),
    Filesep(FilesepConfig),
}

/// Trigger values of a rule: a single string or a list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum RuleValues {
    One(String),
    Many(Vec<String>),
}

impl RuleValues {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            RuleValues::One(value) => vec![value.clone()],
            RuleValues::Many(values) => values.clone(),
        }
    }
}

/// One entry of the `rules` list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub key: String,
    pub values: RuleValues,
    #[serde(default)]
    pub allowed: Vec<String>,
}

/// A complete, declarative template document.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    #[serde(default)]
    pub options: TemplateOptions,
    #[serde(default)]
    pub attributes: Vec<AttributeConfig>,
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl TemplateConfig {
    pub fn from_yaml_str(input: &str) -> TemplateResult<Self> {
        serde_yaml::from_str(input).map_err(TemplateError::YamlDeserialization)
    }

    pub fn from_json_str(input: &str) -> TemplateResult<Self> {
        serde_json::from_str(input).map_err(TemplateError::JsonDeserialization)
    }

    /// Builds and terminates the template described by this document.
    ///
    /// Attributes are declared first, then segments appended in order, then rules added.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document declares no segments or contains
    /// `filesep: false`, and otherwise any error the builder reports.
    pub fn build(&self) -> TemplateResult<PathTemplate> {
        if self.segments.is_empty() {
            return Err(TemplateError::InvalidConfig(
                "template declares no segments".into(),
            ));
        }

        let mut template = PathTemplate::new(self.options.clone())?;

        for attribute in &self.attributes {
            template.add_attribute_spec(
                &attribute.name,
                attribute.required,
                attribute.takes_value,
            )?;
        }

        for segment in &self.segments {
            match segment {
                SegmentConfig::Component(entry) => template.add_component(
                    &entry.component,
                    entry.delimiter.as_deref(),
                    entry.value_only,
                    entry.required,
                )?,
                SegmentConfig::Literal(entry) => template.literal_override(&entry.literal)?,
                SegmentConfig::Filesep(FilesepConfig { filesep: true }) => template.add_filesep()?,
                SegmentConfig::Filesep(FilesepConfig { filesep: false }) => {
                    return Err(TemplateError::InvalidConfig(
                        "`filesep` entries must be `true`".into(),
                    ));
                }
            }
        }

        for rule in &self.rules {
            template.add_inclusion_rule(&rule.key, rule.values.to_vec(), &rule.allowed)?;
        }

        template.terminate()?;
        Ok(template)
    }
}
