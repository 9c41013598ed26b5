//! Role requirements: does a player hold a role?

use dialogue_state::DialogueView;
use tracing::debug;

use super::{mismatched, RequirementEvaluator};
use crate::interaction::InteractionData;
use crate::requirements::{kind, Requirement};

/// Player identifier that stands for whoever is currently speaking.
pub const SPEAKER_ALIAS: &str = "speaker";

#[derive(Debug, Clone, Copy, Default)]
pub struct RoleEvaluator;

impl RequirementEvaluator for RoleEvaluator {
    fn evaluate(
        &self,
        dialogue: &dyn DialogueView,
        requirement: &Requirement,
        _data: Option<&InteractionData>,
    ) -> bool {
        let Requirement::InRole(role) = requirement else {
            return mismatched(kind::INROLE, requirement);
        };

        let target = if role.player_id == SPEAKER_ALIAS {
            dialogue.current_speaker().map(|id| id.as_str())
        } else {
            Some(role.player_id.as_str())
        };

        let outcome = match target {
            Some(target) => dialogue
                .players()
                .any(|p| p.player.as_str() == target && p.in_role(&role.role)),
            None => false,
        };
        debug!(player = ?target, role = %role.role, outcome, "evaluated role requirement");

        requirement.apply_negation(outcome)
    }
}
