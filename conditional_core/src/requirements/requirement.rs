//! Requirement definitions - the preconditions a conditional tests.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Kind names as they appear in the `type` field.
pub mod kind {
    pub const EVENT: &str = "event";
    pub const INROLE: &str = "inrole";
    pub const INSPECT: &str = "inspect";
    pub const URI_TEST: &str = "uriTest";
}

/// Which part of the move history an event requirement looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventPosition {
    /// Only the most recent move.
    Last,
    /// Any earlier move.
    Past,
    /// A selector this engine does not understand; never satisfied.
    Other(String),
}

impl From<String> for EventPosition {
    fn from(value: String) -> Self {
        match value.as_str() {
            "last" => EventPosition::Last,
            "past" => EventPosition::Past,
            _ => EventPosition::Other(value),
        }
    }
}

impl From<EventPosition> for String {
    fn from(value: EventPosition) -> Self {
        match value {
            EventPosition::Last => "last".to_string(),
            EventPosition::Past => "past".to_string(),
            EventPosition::Other(s) => s,
        }
    }
}

/// Has a matching move been made?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRequirement {
    #[serde(rename = "eventpos", alias = "event_pos")]
    pub position: EventPosition,

    #[serde(rename = "moveID", alias = "move_id", default)]
    pub move_id: String,

    /// Content tokens the incoming reply must match.
    #[serde(default)]
    pub content: Option<Vec<String>>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default, alias = "negative")]
    pub negated: bool,
}

/// Does a player hold a role? `"speaker"` stands for the current speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRequirement {
    #[serde(rename = "playerID", alias = "player_id")]
    pub player_id: String,

    pub role: String,

    #[serde(default, alias = "negative")]
    pub negated: bool,
}

/// Does a store hold the given content?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectRequirement {
    #[serde(rename = "storeID", alias = "store_id")]
    pub store_id: String,

    /// Position selector as written in the protocol. Carried, not interpreted.
    #[serde(rename = "storepos", alias = "store_pos", default)]
    pub position: Option<String>,

    #[serde(default)]
    pub content: Vec<String>,

    #[serde(default, alias = "negative")]
    pub negated: bool,
}

/// Ask an external service to decide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UriTestRequirement {
    /// Key into the dialogue's external endpoint registry.
    pub id: String,

    #[serde(default, alias = "negative")]
    pub negated: bool,
}

/// A requirement of a kind the built-in set does not cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRequirement {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, alias = "negative")]
    pub negated: bool,

    /// Remaining parameters, passed to the registered evaluator untouched.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

/// A single named, parameterized precondition.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    Event(EventRequirement),
    InRole(RoleRequirement),
    Inspect(InspectRequirement),
    UriTest(UriTestRequirement),
    Custom(CustomRequirement),
}

impl Requirement {
    /// Event requirement without content or user filters.
    pub fn event(position: EventPosition, move_id: impl Into<String>) -> Self {
        Requirement::Event(EventRequirement {
            position,
            move_id: move_id.into(),
            content: None,
            user: None,
            negated: false,
        })
    }

    pub fn in_role(player_id: impl Into<String>, role: impl Into<String>) -> Self {
        Requirement::InRole(RoleRequirement {
            player_id: player_id.into(),
            role: role.into(),
            negated: false,
        })
    }

    pub fn inspect<I, S>(store_id: impl Into<String>, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Requirement::Inspect(InspectRequirement {
            store_id: store_id.into(),
            position: None,
            content: content.into_iter().map(Into::into).collect(),
            negated: false,
        })
    }

    pub fn uri_test(id: impl Into<String>) -> Self {
        Requirement::UriTest(UriTestRequirement {
            id: id.into(),
            negated: false,
        })
    }

    pub fn custom(kind: impl Into<String>, params: Map<String, Value>) -> Self {
        Requirement::Custom(CustomRequirement {
            kind: kind.into(),
            negated: false,
            params,
        })
    }

    /// The kind name used for registry lookup.
    pub fn kind(&self) -> &str {
        match self {
            Requirement::Event(_) => kind::EVENT,
            Requirement::InRole(_) => kind::INROLE,
            Requirement::Inspect(_) => kind::INSPECT,
            Requirement::UriTest(_) => kind::URI_TEST,
            Requirement::Custom(custom) => &custom.kind,
        }
    }

    pub fn is_negated(&self) -> bool {
        match self {
            Requirement::Event(r) => r.negated,
            Requirement::InRole(r) => r.negated,
            Requirement::Inspect(r) => r.negated,
            Requirement::UriTest(r) => r.negated,
            Requirement::Custom(r) => r.negated,
        }
    }

    fn negated_mut(&mut self) -> &mut bool {
        match self {
            Requirement::Event(r) => &mut r.negated,
            Requirement::InRole(r) => &mut r.negated,
            Requirement::Inspect(r) => &mut r.negated,
            Requirement::UriTest(r) => &mut r.negated,
            Requirement::Custom(r) => &mut r.negated,
        }
    }

    /// Flip the negation flag.
    pub fn negate(mut self) -> Self {
        let flag = self.negated_mut();
        *flag = !*flag;
        self
    }

    /// Apply this requirement's negation to a raw outcome.
    pub fn apply_negation(&self, outcome: bool) -> bool {
        outcome != self.is_negated()
    }
}

impl<'de> Deserialize<'de> for Requirement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let kind = match map.get("type") {
            Some(Value::String(kind)) => kind.clone(),
            Some(_) => return Err(D::Error::custom("requirement `type` must be a string")),
            None => return Err(D::Error::missing_field("type")),
        };
        let value = Value::Object(map);

        let parsed = match kind.as_str() {
            kind::EVENT => serde_json::from_value(value).map(Requirement::Event),
            kind::INROLE => serde_json::from_value(value).map(Requirement::InRole),
            kind::INSPECT => serde_json::from_value(value).map(Requirement::Inspect),
            kind::URI_TEST => serde_json::from_value(value).map(Requirement::UriTest),
            _ => serde_json::from_value(value).map(Requirement::Custom),
        };
        parsed.map_err(|e| D::Error::custom(format!("invalid '{}' requirement: {}", kind, e)))
    }
}
