//! Conditional definitions - if/else-if/else nodes over requirements.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::requirements::Requirement;

/// Ordered effect descriptors, passed through without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EffectSet(Vec<Value>);

impl EffectSet {
    pub fn new(effects: Vec<Value>) -> Self {
        Self(effects)
    }

    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for EffectSet {
    fn from(effects: Vec<Value>) -> Self {
        Self(effects)
    }
}

impl FromIterator<Value> for EffectSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A decision node.
///
/// When every requirement holds, `effects` apply. Otherwise the `elseif`
/// chain is tried, and at its end the `else` effects, if any.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Conditional {
    #[serde(default)]
    pub requirements: Vec<Requirement>,

    #[serde(default)]
    pub effects: EffectSet,

    #[serde(default)]
    pub elseif: Option<Box<Conditional>>,

    #[serde(rename = "else", alias = "else_effects", default)]
    pub else_effects: Option<EffectSet>,
}

impl Conditional {
    /// Create a conditional with the effects to apply on success.
    pub fn new(effects: impl Into<EffectSet>) -> Self {
        Self {
            effects: effects.into(),
            ..Default::default()
        }
    }

    /// Add a requirement.
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Add multiple requirements.
    pub fn with_requirements(mut self, requirements: impl IntoIterator<Item = Requirement>) -> Self {
        self.requirements.extend(requirements);
        self
    }

    /// Set the else-if branch.
    pub fn with_elseif(mut self, elseif: Conditional) -> Self {
        self.elseif = Some(Box::new(elseif));
        self
    }

    /// Set the effects for when nothing else applies.
    pub fn with_else(mut self, effects: impl Into<EffectSet>) -> Self {
        self.else_effects = Some(effects.into());
        self
    }

    /// Number of nodes in the else-if chain, this one included.
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut node = self;
        while let Some(next) = node.elseif.as_deref() {
            len += 1;
            node = next;
        }
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_chain() {
        let conditional: Conditional = serde_json::from_value(json!({
            "requirements": [
                {"type": "inrole", "playerID": "speaker", "role": "proposer"}
            ],
            "effects": [{"assign": "turn"}],
            "elseif": {
                "requirements": [{"type": "event", "eventpos": "past", "moveID": "Assert"}],
                "effects": [{"move": "Retract"}],
                "else": [{"end": true}]
            }
        }))
        .unwrap();

        assert_eq!(conditional.chain_len(), 2);
        assert_eq!(conditional.requirements.len(), 1);
        assert!(conditional.else_effects.is_none());

        let elseif = conditional.elseif.as_deref().unwrap();
        assert_eq!(elseif.effects, EffectSet::new(vec![json!({"move": "Retract"})]));
        assert_eq!(
            elseif.else_effects,
            Some(EffectSet::new(vec![json!({"end": true})]))
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let conditional: Conditional = serde_json::from_value(json!({})).unwrap();
        assert!(conditional.requirements.is_empty());
        assert!(conditional.effects.is_empty());
        assert!(conditional.elseif.is_none());
    }

    #[test]
    fn test_builder() {
        let conditional = Conditional::new(vec![json!("a")])
            .with_requirement(Requirement::uri_test("judge"))
            .with_elseif(Conditional::new(vec![json!("b")]))
            .with_else(vec![json!("c")]);

        assert_eq!(conditional.chain_len(), 2);
        assert_eq!(conditional.effects.len(), 1);
        assert_eq!(conditional.else_effects.map(EffectSet::into_inner), Some(vec![json!("c")]));
    }
}
