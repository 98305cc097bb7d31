//! Template segments.
//!
//! A template is an ordered sequence of [`Segment`]s: joiners emitted verbatim and
//! [`Component`]s rendered from the caller's attribute map. Joiners come in two kinds:
//! explicit literals (file separators, overrides) and separators the builder inserted between
//! adjacent components. Only the latter vanish along with an omitted optional component.

use std::borrow::Cow;

use archivotron_types::AttributeName;

use crate::{AttributeMap, TemplateError, TemplateResult};

/// A segment bound to one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub key: AttributeName,
    /// Placed between key and value. Unused when `value_only` is set.
    pub delimiter: String,
    pub value_only: bool,
    pub required: bool,
}

impl Component {
    /// Renders this component against `attributes`.
    ///
    /// An absent optional attribute renders as the empty string; the renderer then drops the
    /// automatic separator in front of it.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredAttribute` if the component is required and its key is absent.
    pub fn render<'a>(&self, attributes: &'a AttributeMap) -> TemplateResult<Cow<'a, str>> {
        let Some(value) = attributes.get(self.key.as_str()) else {
            if self.required {
                return Err(TemplateError::MissingRequiredAttribute(
                    self.key.to_string(),
                ));
            }
            return Ok(Cow::Borrowed(""));
        };

        if self.value_only {
            Ok(Cow::Borrowed(value.as_str()))
        } else {
            Ok(Cow::Owned(format!("{}{}{}", self.key, self.delimiter, value)))
        }
    }
}

/// One atomic unit of a path template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// Attribute separator inserted automatically between two components.
    Separator(String),
    Component(Component),
}

impl Segment {
    #[inline]
    pub fn is_component(&self) -> bool {
        matches!(self, Segment::Component(_))
    }

    /// Text of a literal or separator; `None` for components.
    pub fn joiner_text(&self) -> Option<&str> {
        match self {
            Segment::Literal(text) | Segment::Separator(text) => Some(text),
            Segment::Component(_) => None,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Literal(text) => write!(f, "{text:?}"),
            Segment::Separator(text) => write!(f, "{text}"),
            Segment::Component(c) if c.value_only => write!(f, "<{}>", c.key),
            Segment::Component(c) => write!(f, "{}{}<{}>", c.key, c.delimiter, c.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(key: &str, value_only: bool, required: bool) -> Component {
        Component {
            key: AttributeName::new(key).unwrap(),
            delimiter: "-".into(),
            value_only,
            required,
        }
    }

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_key_value() {
        let map = attrs(&[("subject", "Jen")]);
        let rendered = component("subject", false, true).render(&map).unwrap();
        assert_eq!(rendered, "subject-Jen");
    }

    #[test]
    fn test_render_value_only() {
        let map = attrs(&[("modality", "anat")]);
        let rendered = component("modality", true, true).render(&map).unwrap();
        assert_eq!(rendered, "anat");
    }

    #[test]
    fn test_render_missing_required_fails() {
        let map = attrs(&[]);
        match component("subject", false, true).render(&map) {
            Err(TemplateError::MissingRequiredAttribute(key)) => assert_eq!(key, "subject"),
            other => panic!("Expected MissingRequiredAttribute, got {other:?}"),
        }
    }

    #[test]
    fn test_render_missing_optional_is_empty() {
        let map = attrs(&[("subject", "Jen")]);
        let rendered = component("session", false, false).render(&map).unwrap();
        assert!(rendered.is_empty());
    }

    #[test]
    fn test_render_empty_delimiter() {
        let mut c = component("pb", false, true);
        c.delimiter = String::new();
        let map = attrs(&[("pb", "01")]);
        assert_eq!(c.render(&map).unwrap(), "pb01");
    }

    #[test]
    fn test_joiner_text() {
        assert_eq!(Segment::Literal("+".into()).joiner_text(), Some("+"));
        assert_eq!(Segment::Separator("_".into()).joiner_text(), Some("_"));
        assert_eq!(
            Segment::Component(component("sub", false, true)).joiner_text(),
            None
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Segment::Literal("/".into()).to_string(), "\"/\"");
        assert_eq!(Segment::Separator("_".into()).to_string(), "_");
        assert_eq!(
            Segment::Component(component("sub", false, true)).to_string(),
            "sub-<sub>"
        );
        assert_eq!(
            Segment::Component(component("suffix", true, true)).to_string(),
            "<suffix>"
        );
    }
}
