//! Conditional Resolver - selects the effect set a conditional chain yields.
//!
//! Resolution works as follows:
//! 1. **Requirements**: Evaluate the node's requirements in order, stopping at
//!    the first one that fails (an empty list holds vacuously)
//! 2. **Success**: If all hold, return the node's effects
//! 3. **Else-if**: Otherwise resolve the nested conditional against the same
//!    dialogue and payload
//! 4. **Else**: At the end of the chain, return the else effects, or nothing

mod conditional;

pub use conditional::*;

use dialogue_state::DialogueView;
use tracing::{debug, warn};

use crate::config::{EngineConfig, UnknownRequirementPolicy};
use crate::error::ResolveError;
use crate::interaction::InteractionData;
use crate::registry::RequirementRegistry;
use crate::requirements::Requirement;

static NO_EFFECTS: EffectSet = EffectSet::empty();

/// Resolves conditionals using the evaluators of a registry.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalResolver<'r> {
    registry: &'r RequirementRegistry,
    unknown_requirement: UnknownRequirementPolicy,
}

impl<'r> ConditionalResolver<'r> {
    /// Create a resolver that rejects unknown requirement kinds.
    pub fn new(registry: &'r RequirementRegistry) -> Self {
        Self {
            registry,
            unknown_requirement: UnknownRequirementPolicy::default(),
        }
    }

    /// Create a resolver following the given configuration.
    pub fn with_config(registry: &'r RequirementRegistry, config: &EngineConfig) -> Self {
        Self::new(registry).with_unknown_policy(config.unknown_requirement)
    }

    pub fn with_unknown_policy(mut self, policy: UnknownRequirementPolicy) -> Self {
        self.unknown_requirement = policy;
        self
    }

    /// Resolve a conditional chain to the effects that apply.
    ///
    /// Never fails on data: only a requirement kind with no registered
    /// evaluator (under [`UnknownRequirementPolicy::Error`]) is an error.
    pub fn resolve<'c>(
        &self,
        dialogue: &dyn DialogueView,
        conditional: &'c Conditional,
        data: Option<&InteractionData>,
    ) -> Result<&'c EffectSet, ResolveError> {
        self.resolve_at(0, dialogue, conditional, data)
    }

    fn resolve_at<'c>(
        &self,
        depth: usize,
        dialogue: &dyn DialogueView,
        conditional: &'c Conditional,
        data: Option<&InteractionData>,
    ) -> Result<&'c EffectSet, ResolveError> {
        if self.requirements_hold(dialogue, &conditional.requirements, data)? {
            debug!(depth, "conditional satisfied");
            return Ok(&conditional.effects);
        }

        match (&conditional.elseif, &conditional.else_effects) {
            (Some(elseif), _) => self.resolve_at(depth + 1, dialogue, elseif, data),
            (None, Some(else_effects)) => {
                debug!(depth, "falling back to else effects");
                Ok(else_effects)
            }
            (None, None) => {
                debug!(depth, "no branch applies");
                Ok(&NO_EFFECTS)
            }
        }
    }

    /// Evaluate requirements in order, stopping at the first failure.
    pub fn requirements_hold(
        &self,
        dialogue: &dyn DialogueView,
        requirements: &[Requirement],
        data: Option<&InteractionData>,
    ) -> Result<bool, ResolveError> {
        for requirement in requirements {
            if !self.evaluate(dialogue, requirement, data)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Evaluate a single requirement through the registry.
    pub fn evaluate(
        &self,
        dialogue: &dyn DialogueView,
        requirement: &Requirement,
        data: Option<&InteractionData>,
    ) -> Result<bool, ResolveError> {
        let kind = requirement.kind();
        let Some(evaluator) = self.registry.lookup(kind) else {
            return match self.unknown_requirement {
                UnknownRequirementPolicy::Error => Err(ResolveError::UnknownRequirement {
                    kind: kind.to_string(),
                }),
                UnknownRequirementPolicy::Unsatisfied => {
                    warn!(kind, "no evaluator registered, treating requirement as unsatisfied");
                    Ok(false)
                }
            };
        };

        let outcome = evaluator.evaluate(dialogue, requirement, data);
        debug!(kind, outcome, "requirement evaluated");
        Ok(outcome)
    }
}
