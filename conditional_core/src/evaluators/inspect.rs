//! Inspect requirements: does a store hold the given content?

use dialogue_state::DialogueView;
use tracing::debug;

use super::{mismatched, RequirementEvaluator};
use crate::interaction::InteractionData;
use crate::requirements::{kind, ContentToken, Requirement};

/// Every content token must pass the store query; the first failure stops.
///
/// Quoted tokens are checked as written. Unquoted tokens name a reply field
/// whose value is checked instead; a missing payload or field fails. The
/// negation flag is passed into each store query rather than applied to the
/// overall answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct InspectEvaluator;

impl RequirementEvaluator for InspectEvaluator {
    fn evaluate(
        &self,
        dialogue: &dyn DialogueView,
        requirement: &Requirement,
        data: Option<&InteractionData>,
    ) -> bool {
        let Requirement::Inspect(inspect) = requirement else {
            return mismatched(kind::INSPECT, requirement);
        };

        let Some(store) = dialogue.store(&inspect.store_id) else {
            debug!(store = %inspect.store_id, "inspected store does not exist");
            return false;
        };

        let outcome = inspect.content.iter().all(|token| match ContentToken::parse(token) {
            ContentToken::Literal(text) => store.contains(text, inspect.negated),
            ContentToken::Variable(_) | ContentToken::Field(_) => {
                match data.and_then(|d| d.reply_field(token)) {
                    Some(value) => store.contains(&value, inspect.negated),
                    None => false,
                }
            }
        });
        debug!(store = %inspect.store_id, outcome, "evaluated inspect requirement");

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluators::test_support;
    use crate::requirements::InspectRequirement;

    #[test]
    fn test_literal_membership() {
        let dialogue = test_support::dialogue();
        assert!(InspectEvaluator.evaluate(&dialogue, &Requirement::inspect("CS", ["\"apple\""]), None));
        assert!(!InspectEvaluator.evaluate(&dialogue, &Requirement::inspect("CS", ["\"cherry\""]), None));
    }

    #[test]
    fn test_reply_field_membership() {
        let dialogue = test_support::dialogue();
        let requirement = Requirement::inspect("CS", ["x"]);

        let banana = InteractionData::from_reply([("x", "banana")]);
        assert!(InspectEvaluator.evaluate(&dialogue, &requirement, Some(&banana)));

        let cherry = InteractionData::from_reply([("x", "cherry")]);
        assert!(!InspectEvaluator.evaluate(&dialogue, &requirement, Some(&cherry)));
    }

    #[test]
    fn test_unquoted_token_fails_closed() {
        let dialogue = test_support::dialogue();
        let requirement = Requirement::inspect("CS", ["x"]);

        assert!(!InspectEvaluator.evaluate(&dialogue, &requirement, None));

        let other_field = InteractionData::from_reply([("y", "banana")]);
        assert!(!InspectEvaluator.evaluate(&dialogue, &requirement, Some(&other_field)));

        let no_reply = InteractionData::new(serde_json::json!({"x": "banana"}));
        assert!(!InspectEvaluator.evaluate(&dialogue, &requirement, Some(&no_reply)));
    }

    #[test]
    fn test_all_tokens_must_hold() {
        let dialogue = test_support::dialogue();
        let both = Requirement::inspect("CS", ["\"apple\"", "\"banana\""]);
        let one_missing = Requirement::inspect("CS", ["\"apple\"", "\"cherry\""]);

        assert!(InspectEvaluator.evaluate(&dialogue, &both, None));
        assert!(!InspectEvaluator.evaluate(&dialogue, &one_missing, None));
    }

    #[test]
    fn test_negation_is_per_query() {
        let dialogue = test_support::dialogue();

        let absent = Requirement::inspect("CS", ["\"cherry\""]).negate();
        assert!(InspectEvaluator.evaluate(&dialogue, &absent, None));

        let present = Requirement::inspect("CS", ["\"apple\""]).negate();
        assert!(!InspectEvaluator.evaluate(&dialogue, &present, None));

        let none_present = Requirement::inspect("CS", ["\"cherry\"", "\"plum\""]).negate();
        assert!(InspectEvaluator.evaluate(&dialogue, &none_present, None));
    }

    #[test]
    fn test_unknown_store_is_false() {
        let dialogue = test_support::dialogue();
        let requirement = Requirement::Inspect(InspectRequirement {
            store_id: "missing".to_string(),
            position: Some("top".to_string()),
            content: vec!["\"apple\"".to_string()],
            negated: true,
        });
        assert!(!InspectEvaluator.evaluate(&dialogue, &requirement, None));
    }

    #[test]
    fn test_empty_content_is_vacuously_true() {
        let dialogue = test_support::dialogue();
        let requirement = Requirement::inspect("CS", Vec::<String>::new());
        assert!(InspectEvaluator.evaluate(&dialogue, &requirement, None));
    }
}
