//! Event requirements: has a matching move been made?

use dialogue_state::DialogueView;
use tracing::debug;

use super::{mismatched, RequirementEvaluator};
use crate::interaction::InteractionData;
use crate::requirements::{kind, ContentToken, EventPosition, EventRequirement, Requirement};

/// Checks the move history and, when content is given, the incoming reply.
///
/// The content match and the history match must both hold. A `user` filter
/// is accepted as written; who made the move is not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventEvaluator;

impl RequirementEvaluator for EventEvaluator {
    fn evaluate(
        &self,
        dialogue: &dyn DialogueView,
        requirement: &Requirement,
        data: Option<&InteractionData>,
    ) -> bool {
        let Requirement::Event(event) = requirement else {
            return mismatched(kind::EVENT, requirement);
        };

        let content = content_matches(dialogue, event, data);
        let history = history_matches(dialogue, event);
        debug!(
            move_id = %event.move_id,
            content,
            history,
            "evaluated event requirement"
        );

        requirement.apply_negation(content && history)
    }
}

fn content_matches(
    dialogue: &dyn DialogueView,
    event: &EventRequirement,
    data: Option<&InteractionData>,
) -> bool {
    let Some(tokens) = &event.content else {
        return true;
    };
    let Some(expected) = resolve_content(dialogue, tokens) else {
        return false;
    };
    match data.and_then(InteractionData::reply_values) {
        Some(actual) => expected == actual,
        None => false,
    }
}

/// Literals lose their quotes, variables become their comma-joined values.
/// Bare field names carry no expected value and are skipped. `None` if a
/// variable is unbound.
fn resolve_content(dialogue: &dyn DialogueView, tokens: &[String]) -> Option<Vec<String>> {
    let mut resolved = Vec::with_capacity(tokens.len());
    for token in tokens {
        match ContentToken::parse(token) {
            ContentToken::Literal(text) => resolved.push(text.to_string()),
            ContentToken::Variable(name) => resolved.push(dialogue.runtime_var(name)?.join(",")),
            ContentToken::Field(_) => {}
        }
    }
    Some(resolved)
}

fn history_matches(dialogue: &dyn DialogueView, event: &EventRequirement) -> bool {
    match (&event.position, dialogue.history().last()) {
        (_, None) => false,
        (EventPosition::Last, Some(last)) => last.move_id == event.move_id,
        (EventPosition::Past, Some(_)) => true,
        (EventPosition::Other(_), Some(_)) => false,
    }
}
