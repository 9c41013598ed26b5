//! Requirement registry - maps requirement kinds to evaluators.

use dialogue_state::DialogueView;
use std::collections::HashMap;
use std::sync::Arc;

use crate::arbitration::{ArbitrationClient, HttpArbitrationClient};
use crate::config::EngineConfig;
use crate::evaluators::{
    EventEvaluator, InspectEvaluator, RequirementEvaluator, RoleEvaluator, UriTestEvaluator,
};
use crate::interaction::InteractionData;
use crate::requirements::{kind, Requirement};

/// Evaluators by requirement kind.
///
/// Build one at startup, register any extension kinds, then share it by
/// reference with every resolver. Registration needs `&mut self`, so it cannot
/// race with evaluation.
#[derive(Clone, Default)]
pub struct RequirementRegistry {
    evaluators: HashMap<String, Arc<dyn RequirementEvaluator>>,
}

impl RequirementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the four built-in kinds, arbitrating through `client`.
    pub fn with_builtins(client: Arc<dyn ArbitrationClient>) -> Self {
        let mut registry = Self::new();
        registry.register(kind::EVENT, EventEvaluator);
        registry.register(kind::INROLE, RoleEvaluator);
        registry.register(kind::INSPECT, InspectEvaluator);
        registry.register(kind::URI_TEST, UriTestEvaluator::new(client));
        registry
    }

    /// Registry with the built-in kinds and an HTTP arbitration client.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_builtins(Arc::new(HttpArbitrationClient::new(&config.arbitration)))
    }

    /// Install or replace the evaluator for a kind. Returns the one replaced.
    pub fn register<E>(
        &mut self,
        kind: impl Into<String>,
        evaluator: E,
    ) -> Option<Arc<dyn RequirementEvaluator>>
    where
        E: RequirementEvaluator + 'static,
    {
        self.evaluators.insert(kind.into(), Arc::new(evaluator))
    }

    /// Install or replace a closure evaluator for a kind.
    pub fn register_fn<F>(
        &mut self,
        kind: impl Into<String>,
        evaluator: F,
    ) -> Option<Arc<dyn RequirementEvaluator>>
    where
        F: Fn(&dyn DialogueView, &Requirement, Option<&InteractionData>) -> bool
            + Send
            + Sync
            + 'static,
    {
        self.register(kind, evaluator)
    }

    /// Remove the evaluator for a kind.
    pub fn unregister(&mut self, kind: &str) -> Option<Arc<dyn RequirementEvaluator>> {
        self.evaluators.remove(kind)
    }

    /// Find the evaluator for a kind.
    pub fn lookup(&self, kind: &str) -> Option<&dyn RequirementEvaluator> {
        self.evaluators.get(kind).map(|e| e.as_ref())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.evaluators.contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.evaluators.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }
}

impl std::fmt::Debug for RequirementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequirementRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
