//! Dialogue state management - the structure every requirement reads from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::players::{Player, PlayerId};
use crate::stores::Store;

/// Unique identifier for a running dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogueId(pub Uuid);

impl DialogueId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for DialogueId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DialogueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in the move history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Identifier of the move as declared by the protocol.
    #[serde(rename = "moveID")]
    pub move_id: String,

    /// Player who made the move.
    pub speaker: PlayerId,

    /// Content the move carried, field -> value.
    #[serde(default)]
    pub reply: Map<String, Value>,
}

impl MoveRecord {
    pub fn new(move_id: impl Into<String>, speaker: impl Into<PlayerId>) -> Self {
        Self {
            move_id: move_id.into(),
            speaker: speaker.into(),
            reply: Map::new(),
        }
    }

    /// Attach a reply field.
    pub fn with_reply(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.reply.insert(field.into(), value.into());
        self
    }
}

/// Read-only surface requirement evaluators inspect.
///
/// [`DialogueState`] implements it directly; hosts with their own runtime
/// implement it over their storage instead.
pub trait DialogueView {
    /// All players in the roster.
    fn players(&self) -> Box<dyn Iterator<Item = &Player> + '_>;

    /// Player whose turn it currently is.
    fn current_speaker(&self) -> Option<&PlayerId>;

    /// Look up a store by identifier.
    fn store(&self, id: &str) -> Option<&Store>;

    /// Moves made so far, oldest first.
    fn history(&self) -> &[MoveRecord];

    /// Values bound to a runtime variable.
    fn runtime_var(&self, name: &str) -> Option<&[String]>;

    /// URI registered for an external arbitration identifier.
    fn external_uri(&self, id: &str) -> Option<&str>;

    /// Full serialized snapshot of the dialogue.
    fn snapshot(&self) -> Value;
}

/// The complete state of a dialogue at any point in time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DialogueState {
    pub id: DialogueId,

    /// Roster keyed by player name.
    pub players: HashMap<String, Player>,

    pub current_speaker: Option<PlayerId>,

    pub stores: HashMap<String, Store>,

    /// Move history, append-only.
    pub history: Vec<MoveRecord>,

    /// Runtime variables bound while the dialogue runs.
    pub runtime_vars: HashMap<String, Vec<String>>,

    /// External arbitration endpoints, identifier -> URI.
    pub external_uris: HashMap<String, String>,
}

impl DialogueState {
    /// Create a new empty dialogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player to the roster, keyed by its name.
    pub fn add_player(&mut self, player: Player) -> PlayerId {
        let id = player.player.clone();
        self.players.insert(player.name.clone(), player);
        id
    }

    /// Find a player by protocol identifier.
    pub fn get_player(&self, id: &str) -> Option<&Player> {
        self.players.values().find(|p| p.player.as_str() == id)
    }

    /// Find a player by protocol identifier for mutation.
    pub fn get_player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.values_mut().find(|p| p.player.as_str() == id)
    }

    pub fn set_current_speaker(&mut self, id: impl Into<PlayerId>) {
        self.current_speaker = Some(id.into());
    }

    /// Add a store, replacing any existing store with the same identifier.
    pub fn add_store(&mut self, store: Store) {
        self.stores.insert(store.id.clone(), store);
    }

    pub fn get_store_mut(&mut self, id: &str) -> Option<&mut Store> {
        self.stores.get_mut(id)
    }

    /// Append a move to the history and hand the turn to its speaker.
    pub fn record_move(&mut self, record: MoveRecord) {
        self.current_speaker = Some(record.speaker.clone());
        self.history.push(record);
    }

    /// Most recent move.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Bind a runtime variable, replacing any previous values.
    pub fn set_runtime_var<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runtime_vars
            .insert(name.into(), values.into_iter().map(Into::into).collect());
    }

    /// Register an external arbitration endpoint.
    pub fn register_external_uri(&mut self, id: impl Into<String>, uri: impl Into<String>) {
        self.external_uris.insert(id.into(), uri.into());
    }
}

impl DialogueView for DialogueState {
    fn players(&self) -> Box<dyn Iterator<Item = &Player> + '_> {
        Box::new(self.players.values())
    }

    fn current_speaker(&self) -> Option<&PlayerId> {
        self.current_speaker.as_ref()
    }

    fn store(&self, id: &str) -> Option<&Store> {
        self.stores.get(id)
    }

    fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    fn runtime_var(&self, name: &str) -> Option<&[String]> {
        self.runtime_vars.get(name).map(Vec::as_slice)
    }

    fn external_uri(&self, id: &str) -> Option<&str> {
        self.external_uris.get(id).map(String::as_str)
    }

    fn snapshot(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
