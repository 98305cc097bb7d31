//! Path templates.
//!
//! A [`PathTemplate`] is built in two phases:
//!
//! ```text
//! Building ──terminate()──▶ Terminated
//!   │  ▲                       │
//!   └──┘ add_* / overrides     └── render()
//! ```
//!
//! While `Building`, attributes, segments and inclusion rules may be added. `terminate()`
//! freezes the template; from then on it is read-only, and `render` may be called any number
//! of times, from any number of threads, with different attribute maps.
//!
//! # Rendering
//!
//! Rendering validates the attribute map against the registry and the inclusion rules, then
//! walks the segments once. Joiners between components are buffered and written when the next
//! component produces output:
//!
//! - an omitted optional component takes the automatic separator in front of it with it;
//!   explicit literals (file separators, overrides) stay;
//! - if the buffered run holds any explicit literal, only the explicit literals are written,
//!   otherwise the automatic separators are;
//! - repeats of the same joiner within a run collapse to one.
//!
//! ```text
//! sub-<sub> _ ses-<ses>? _ task-<task>
//!   {sub: 01, task: rest}          ─▶ sub-01_task-rest
//!   {sub: 01, ses: 2, task: rest}  ─▶ sub-01_ses-2_task-rest
//!
//! sub-<sub> "/" acq-<acq>? _ run-<run>
//!   {sub: 01, run: 1}              ─▶ sub-01/run-1
//! ```
//!
//! Literals that come before the first component (the root prefix) are always written.
//! Joiners before the first present component are dropped. After the last present component,
//! explicit literals are kept (a trailing directory separator or file extension) and automatic
//! separators are dropped.

use std::path::PathBuf;

use archivotron_types::AttributeName;

use crate::config::TemplateOptions;
use crate::registry::AttributeRegistry;
use crate::rules::{self, InclusionRule};
use crate::segment::{Component, Segment};
use crate::validation;
use crate::{AttributeMap, TemplateError, TemplateResult};

/// Lifecycle state of a [`PathTemplate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateState {
    Building,
    Terminated,
}

/// A reusable path template.
#[derive(Clone, Debug)]
pub struct PathTemplate {
    segments: Vec<Segment>,
    registry: AttributeRegistry,
    rules: Vec<InclusionRule>,
    state: TemplateState,
    attribute_separator: String,
    kv_separator: String,
    file_separator: String,
}

impl PathTemplate {
    /// Creates a new template in the `Building` state.
    ///
    /// The root prefix is emitted as the first literal:
    /// - `root: None` starts the path with the file separator,
    /// - `root: Some("")` produces a relative path with no prefix,
    /// - any other root is written with trailing separators trimmed, then the file separator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFileSeparator` if `options.file_separator` is neither `"/"` nor `"\"`.
    pub fn new(options: TemplateOptions) -> TemplateResult<Self> {
        let file_separator = options.resolved_file_separator()?;

        let prefix = match options.root.as_deref() {
            None => Some(file_separator.clone()),
            Some("") => None,
            Some(root) => Some(format!(
                "{}{}",
                root.trim_end_matches(['/', '\\']),
                file_separator
            )),
        };

        Ok(Self {
            segments: prefix.map(Segment::Literal).into_iter().collect(),
            registry: AttributeRegistry::new(),
            rules: Vec::new(),
            state: TemplateState::Building,
            attribute_separator: options.attribute_separator,
            kv_separator: options.kv_separator,
            file_separator,
        })
    }

    fn ensure_building(&self) -> TemplateResult<()> {
        match self.state {
            TemplateState::Building => Ok(()),
            TemplateState::Terminated => Err(TemplateError::AlreadyTerminated),
        }
    }

    /// Declares an attribute that takes a value.
    pub fn add_attribute(&mut self, name: &str, required: bool) -> TemplateResult<()> {
        self.add_attribute_spec(name, required, true)
    }

    /// Declares an attribute with every field of its spec.
    ///
    /// # Errors
    ///
    /// - `AlreadyTerminated` after `terminate()`
    /// - `DuplicateAttribute` if `name` is already registered
    /// - `InvalidAttributeName` if `name` is not a valid attribute name
    pub fn add_attribute_spec(
        &mut self,
        name: &str,
        required: bool,
        takes_value: bool,
    ) -> TemplateResult<()> {
        self.ensure_building()?;
        self.registry.register(name, required, takes_value)
    }

    /// Appends a component bound to `key`.
    ///
    /// `delimiter` defaults to the template's key/value separator. If the previous segment is
    /// also a component, the attribute separator is inserted between them; an explicit literal
    /// in that position stands instead. A key that has not been declared yet is registered
    /// with the component's `required` flag.
    pub fn add_component(
        &mut self,
        key: &str,
        delimiter: Option<&str>,
        value_only: bool,
        required: bool,
    ) -> TemplateResult<()> {
        self.ensure_building()?;
        let key = AttributeName::new(key)?;

        if !self.registry.contains(key.as_str()) {
            self.registry.register(key.as_str(), required, true)?;
        }

        if self.segments.last().is_some_and(Segment::is_component)
            && !self.attribute_separator.is_empty()
        {
            self.segments
                .push(Segment::Separator(self.attribute_separator.clone()));
        }

        self.segments.push(Segment::Component(Component {
            key,
            delimiter: delimiter.unwrap_or(&self.kv_separator).to_owned(),
            value_only,
            required,
        }));
        Ok(())
    }

    /// Appends a raw literal, e.g. a custom joiner such as `"+"`.
    pub fn literal_override(&mut self, text: &str) -> TemplateResult<()> {
        self.ensure_building()?;
        self.segments.push(Segment::Literal(text.to_owned()));
        Ok(())
    }

    /// Appends the template's file separator.
    pub fn add_filesep(&mut self) -> TemplateResult<()> {
        self.ensure_building()?;
        self.segments
            .push(Segment::Literal(self.file_separator.clone()));
        Ok(())
    }

    /// Adds an inclusion rule: when `key` takes one of `values`, only `allowed_keys` (and
    /// `key` itself) may be present.
    pub fn add_inclusion_rule<V, A>(
        &mut self,
        key: &str,
        values: V,
        allowed_keys: A,
    ) -> TemplateResult<()>
    where
        V: IntoIterator,
        V::Item: Into<String>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        self.ensure_building()?;

        let rule = InclusionRule {
            trigger_key: AttributeName::new(key)?,
            trigger_values: values.into_iter().map(Into::into).collect(),
            allowed_keys: allowed_keys
                .into_iter()
                .map(AttributeName::new)
                .collect::<Result<_, _>>()?,
        };
        self.rules.push(rule);
        Ok(())
    }

    /// Freezes the template. This is one-way.
    pub fn terminate(&mut self) -> TemplateResult<()> {
        self.ensure_building()?;
        self.state = TemplateState::Terminated;

        tracing::debug!(
            segments = self.segments.len(),
            attributes = self.registry.len(),
            rules = self.rules.len(),
            "terminated path template"
        );
        Ok(())
    }

    /// Renders the path for `attributes`.
    ///
    /// Validation stops at the first problem found, in this order: template state, unknown
    /// attributes, inclusion rules, missing required attributes. No partial path is returned
    /// on failure.
    pub fn render(&self, attributes: &AttributeMap) -> TemplateResult<String> {
        if self.state != TemplateState::Terminated {
            return Err(TemplateError::NotTerminated);
        }

        // Once every key is known to be registered, the map is its own registry-filtered subset.
        validation::validate_known_attributes(&self.registry, attributes)?;
        rules::check_all(&self.rules, attributes)?;

        let first_component = self
            .segments
            .iter()
            .position(Segment::is_component)
            .unwrap_or(self.segments.len());
        let (leading, body) = self.segments.split_at(first_component);

        let mut path = String::new();
        for text in leading.iter().filter_map(Segment::joiner_text) {
            path.push_str(text);
        }

        let mut pending: Vec<&Segment> = Vec::new();
        let mut has_content = false;
        for segment in body {
            let Segment::Component(component) = segment else {
                pending.push(segment);
                continue;
            };

            let rendered = component.render(attributes)?;
            tracing::trace!(key = %component.key, rendered = %rendered, "rendered component");

            if rendered.is_empty() {
                pending.retain(|joiner| matches!(joiner, Segment::Literal(_)));
                continue;
            }
            if has_content {
                push_joiners(&mut path, &pending);
            }
            pending.clear();
            path.push_str(&rendered);
            has_content = true;
        }
        if has_content {
            pending.retain(|joiner| matches!(joiner, Segment::Literal(_)));
            push_joiners(&mut path, &pending);
        }

        tracing::debug!(path = %path, "rendered path");
        Ok(path)
    }

    /// Renders the path for `attributes` as a [`PathBuf`].
    ///
    /// Performs no I/O; the caller resolves the result against a real file system.
    pub fn render_path(&self, attributes: &AttributeMap) -> TemplateResult<PathBuf> {
        self.render(attributes).map(PathBuf::from)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &[InclusionRule] {
        &self.rules
    }

    pub fn state(&self) -> TemplateState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == TemplateState::Terminated
    }

    pub fn file_separator(&self) -> &str {
        &self.file_separator
    }

    pub fn attribute_separator(&self) -> &str {
        &self.attribute_separator
    }

    pub fn kv_separator(&self) -> &str {
        &self.kv_separator
    }
}

/// Writes one buffered run of joiners.
///
/// Explicit literals win over automatic separators; consecutive identical joiners collapse.
fn push_joiners(path: &mut String, joiners: &[&Segment]) {
    let explicit = joiners
        .iter()
        .any(|joiner| matches!(joiner, Segment::Literal(_)));

    let mut last: Option<&str> = None;
    for joiner in joiners {
        let text = match joiner {
            Segment::Literal(text) if explicit => text.as_str(),
            Segment::Separator(text) if !explicit => text.as_str(),
            _ => continue,
        };
        if last != Some(text) {
            path.push_str(text);
        }
        last = Some(text);
    }
}
