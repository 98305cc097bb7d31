//! Attribute registry.
//!
//! Tracks which attribute names a template may reference. Entries are kept in registration
//! order with a name index beside them; the registry only ever grows.

use std::collections::HashMap;

use archivotron_types::AttributeName;

use crate::{TemplateError, TemplateResult};

/// Declaration of a single attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: AttributeName,
    pub required: bool,
    /// Whether the attribute carries a value. Recorded for callers; rendering does not coerce.
    pub takes_value: bool,
}

/// Registry of legal attribute names for one template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeRegistry {
    entries: Vec<AttributeSpec>,
    name_to_idx: HashMap<AttributeName, usize>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new attribute.
    ///
    /// # Errors
    ///
    /// - `InvalidAttributeName` if `name` is not a valid [`AttributeName`]
    /// - `DuplicateAttribute` if `name` is already registered
    pub fn register(&mut self, name: &str, required: bool, takes_value: bool) -> TemplateResult<()> {
        let name = AttributeName::new(name)?;
        if self.name_to_idx.contains_key(&name) {
            return Err(TemplateError::DuplicateAttribute(name.into_string()));
        }

        tracing::debug!(attribute = %name, required, takes_value, "registered attribute");

        self.name_to_idx.insert(name.clone(), self.entries.len());
        self.entries.push(AttributeSpec {
            name,
            required,
            takes_value,
        });
        Ok(())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_idx.contains_key(name)
    }

    /// Name → spec
    #[inline]
    pub fn get(&self, name: &str) -> Option<&AttributeSpec> {
        self.name_to_idx.get(name).map(|&i| &self.entries[i])
    }

    /// All specs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.entries.iter()
    }

    /// Names of every attribute declared as required, in registration order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
