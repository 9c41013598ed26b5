//! Requirement evaluators - one predicate per requirement kind.
//!
//! An evaluator looks at the dialogue, the requirement's parameters and the
//! optional interaction payload, and answers yes or no. Evaluators never
//! mutate the dialogue and never fail: malformed input means "not satisfied".

mod event;
mod inspect;
mod role;

pub use event::*;
pub use inspect::*;
pub use role::*;
pub use uri_test::*;

use dialogue_state::DialogueView;
use tracing::warn;

use crate::interaction::InteractionData;
use crate::requirements::Requirement;

/// Decides whether a single requirement holds.
///
/// Closures with the matching signature implement this trait, so simple
/// extension kinds need no dedicated type.
pub trait RequirementEvaluator: Send + Sync {
    fn evaluate(
        &self,
        dialogue: &dyn DialogueView,
        requirement: &Requirement,
        data: Option<&InteractionData>,
    ) -> bool;
}

impl<F> RequirementEvaluator for F
where
    F: Fn(&dyn DialogueView, &Requirement, Option<&InteractionData>) -> bool + Send + Sync,
{
    fn evaluate(
        &self,
        dialogue: &dyn DialogueView,
        requirement: &Requirement,
        data: Option<&InteractionData>,
    ) -> bool {
        self(dialogue, requirement, data)
    }
}

/// A built-in evaluator was registered under a kind it cannot handle.
fn mismatched(expected: &str, requirement: &Requirement) -> bool {
    warn!(
        expected,
        found = requirement.kind(),
        "evaluator received a requirement of another kind"
    );
    false
}
