//! Inclusion rules.
//!
//! An inclusion rule restricts which attributes may co-occur once a trigger attribute takes
//! one of a set of values, e.g. "when `modality` is `anat`, only `sub`, `ses`, `run` and
//! `suffix` may be present". All rules of a template must hold (AND); evaluation stops at the
//! first violation.

use std::collections::BTreeSet;

use archivotron_types::AttributeName;

use crate::{AttributeMap, TemplateError, TemplateResult};

/// A declarative compatibility constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionRule {
    pub trigger_key: AttributeName,
    pub trigger_values: BTreeSet<String>,
    pub allowed_keys: BTreeSet<AttributeName>,
}

impl InclusionRule {
    /// Returns the trigger value if this rule fires for `attributes`.
    pub fn fires_on<'a>(&self, attributes: &'a AttributeMap) -> Option<&'a str> {
        attributes
            .get(self.trigger_key.as_str())
            .filter(|value| self.trigger_values.contains(value.as_str()))
            .map(String::as_str)
    }

    /// Checks this rule against an attribute map already filtered to registered names.
    ///
    /// Keys are visited in map order, so the reported key is the first offender.
    ///
    /// # Errors
    ///
    /// Returns `RuleViolation` naming the offending key, the trigger key and trigger value.
    pub fn check(&self, attributes: &AttributeMap) -> TemplateResult<()> {
        let Some(trigger_value) = self.fires_on(attributes) else {
            return Ok(());
        };

        let offending = attributes.keys().find(|key| {
            key.as_str() != self.trigger_key.as_str() && !self.allowed_keys.contains(key.as_str())
        });

        match offending {
            Some(key) => Err(TemplateError::RuleViolation {
                key: key.clone(),
                trigger_key: self.trigger_key.to_string(),
                trigger_value: trigger_value.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

/// Runs every rule in registration order, failing on the first violation.
pub fn check_all(rules: &[InclusionRule], attributes: &AttributeMap) -> TemplateResult<()> {
    rules.iter().try_for_each(|rule| rule.check(attributes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(key: &str, values: &[&str], allowed: &[&str]) -> InclusionRule {
        InclusionRule {
            trigger_key: AttributeName::new(key).unwrap(),
            trigger_values: values.iter().map(|v| v.to_string()).collect(),
            allowed_keys: allowed
                .iter()
                .map(|a| AttributeName::new(a).unwrap())
                .collect(),
        }
    }

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rule_passes_with_only_allowed_keys() {
        let r = rule("k", &["v1"], &["a", "b"]);
        let map = attrs(&[("k", "v1"), ("a", "x"), ("b", "y")]);
        assert!(r.check(&map).is_ok());
    }

    #[test]
    fn test_rule_fails_on_disallowed_key() {
        let r = rule("k", &["v1"], &["a", "b"]);
        let map = attrs(&[("k", "v1"), ("a", "x"), ("c", "z")]);

        match r.check(&map) {
            Err(TemplateError::RuleViolation {
                key,
                trigger_key,
                trigger_value,
            }) => {
                assert_eq!(key, "c");
                assert_eq!(trigger_key, "k");
                assert_eq!(trigger_value, "v1");
            }
            other => panic!("Expected RuleViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_rule_ignores_other_trigger_values() {
        let r = rule("k", &["v1"], &["a", "b"]);
        let map = attrs(&[("k", "v2"), ("c", "z"), ("d", "w")]);
        assert!(r.check(&map).is_ok());
    }

    #[test]
    fn test_rule_ignores_absent_trigger_key() {
        let r = rule("k", &["v1"], &["a"]);
        let map = attrs(&[("c", "z")]);
        assert!(r.check(&map).is_ok());
    }

    #[test]
    fn test_rule_with_multiple_trigger_values() {
        let r = rule("modality", &["anat", "dwi"], &["sub"]);
        assert!(r.check(&attrs(&[("modality", "dwi"), ("task", "rest")])).is_err());
        assert!(r.check(&attrs(&[("modality", "func"), ("task", "rest")])).is_ok());
    }

    #[test]
    fn test_check_all_fails_fast_on_first_rule() {
        let rules = vec![
            rule("k", &["v1"], &["a"]),
            rule("a", &["x"], &["k"]),
        ];
        // Both rules are violated by "c"; only the first is reported.
        let map = attrs(&[("a", "x"), ("c", "z"), ("k", "v1")]);

        match check_all(&rules, &map) {
            Err(TemplateError::RuleViolation { trigger_key, .. }) => assert_eq!(trigger_key, "k"),
            other => panic!("Expected RuleViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_check_all_requires_every_rule() {
        let rules = vec![rule("k", &["v1"], &["a", "c"]), rule("a", &["x"], &["k"])];
        let map = attrs(&[("a", "x"), ("c", "z"), ("k", "v1")]);

        match check_all(&rules, &map) {
            Err(TemplateError::RuleViolation {
                key, trigger_key, ..
            }) => {
                assert_eq!(key, "c");
                assert_eq!(trigger_key, "a");
            }
            other => panic!("Expected RuleViolation, got {other:?}"),
        }
    }
}
