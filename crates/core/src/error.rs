use archivotron_types::NameError;

/// Errors produced while declaring or rendering a path template.
///
/// Every variant is a configuration mistake or input that does not match the declared schema;
/// none of them is transient, so retrying the same call yields the same error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("attempted to overwrite existing attribute {0}")]
    DuplicateAttribute(String),
    #[error("template is already terminated and can no longer be modified")]
    AlreadyTerminated,
    #[error("invalid file separator {0:?} (expected \"/\" or \"\\\")")]
    InvalidFileSeparator(String),
    #[error("template must be terminated before rendering")]
    NotTerminated,
    #[error("attribute {0} is not valid for this template")]
    UnknownAttribute(String),
    #[error("missing required attribute {0}")]
    MissingRequiredAttribute(String),
    #[error(
        "attribute {key} is not allowed when {trigger_key} is {trigger_value}"
    )]
    RuleViolation {
        key: String,
        trigger_key: String,
        trigger_value: String,
    },

    #[error("invalid attribute name: {0}")]
    InvalidAttributeName(#[from] NameError),
    #[error("invalid template configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to deserialize YAML template: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("failed to deserialize JSON template: {0}")]
    JsonDeserialization(serde_json::Error),
}

pub type TemplateResult<T> = std::result::Result<T, TemplateError>;
