//! Protocol metadata - player specs and description scraped from DGDL text.
//!
//! These are best-effort text extractions for tooling and display, not a
//! grammar. Malformed input yields partial or empty results, never an error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::MetadataError;

static PLAYER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"player\(([^()]+)\)").expect("valid regex"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)/\*\s*description:\s*(.*?)\s*\*/").expect("valid regex")
});

/// Field that holds a player's role list.
pub const ROLES_FIELD: &str = "roles";

/// Field a player's identifier is stored under.
pub const ID_FIELD: &str = "id";

/// Value of a player spec field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }
}

/// Fields declared for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PlayerSpec {
    pub fields: BTreeMap<String, FieldValue>,
}

impl PlayerSpec {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// A text field's value.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn id(&self) -> Option<&str> {
        self.text(ID_FIELD)
    }

    /// Declared roles, empty if none.
    pub fn roles(&self) -> &[String] {
        self.get(ROLES_FIELD)
            .and_then(FieldValue::as_list)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn insert(&mut self, field: &str, raw: &str) -> bool {
        if field.is_empty() || raw.is_empty() || field.contains(char::is_whitespace) {
            return false;
        }
        let inner = raw
            .strip_prefix('{')
            .and_then(|r| r.strip_suffix('}'))
            .map(str::trim);

        let value = if field == ROLES_FIELD {
            FieldValue::List(split_list(inner.unwrap_or(raw)))
        } else {
            FieldValue::Text(inner.unwrap_or(raw).to_string())
        };
        self.fields.insert(field.to_string(), value);
        true
    }
}

/// Extract every player spec declared in `player(...)` blocks.
///
/// Entries are `field:value` (describing the block's own player) or
/// `id:field:value` (describing the player `id`, grouped in first-seen order).
/// Values may be braced lists; `roles` always becomes a list.
pub fn extract_players(source: &str) -> Vec<PlayerSpec> {
    PLAYER_RE
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .flat_map(|body| parse_player_block(body.as_str()))
        .collect()
}

/// Extract the text of the first non-empty `/* description: ... */` comment.
pub fn extract_description(source: &str) -> String {
    DESCRIPTION_RE
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn parse_player_block(body: &str) -> Vec<PlayerSpec> {
    let mut own = PlayerSpec::default();
    let mut keyed: Vec<PlayerSpec> = Vec::new();

    for entry in split_top_level(body, ',') {
        let parts: Vec<&str> = split_top_level(entry, ':').into_iter().map(str::trim).collect();
        let accepted = match parts.as_slice() {
            [field, value] => own.insert(field, value),
            [id, field, value] if !id.is_empty() => {
                let index = match keyed.iter().position(|p| p.id() == Some(*id)) {
                    Some(index) => index,
                    None => {
                        let mut spec = PlayerSpec::default();
                        spec.insert(ID_FIELD, id);
                        keyed.push(spec);
                        keyed.len() - 1
                    }
                };
                keyed[index].insert(field, value)
            }
            _ => false,
        };
        if !accepted && !entry.trim().is_empty() {
            debug!(entry = entry.trim(), "skipping malformed player entry");
        }
    }

    let mut players = Vec::with_capacity(keyed.len() + 1);
    if !own.is_empty() {
        players.push(own);
    }
    players.extend(keyed);
    players
}

/// Split on `sep` outside of braces.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Players and description of a protocol, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolMetadata {
    pub players: Vec<PlayerSpec>,
    pub description: String,
}

/// Raw DGDL protocol text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolSource {
    text: String,
}

impl ProtocolSource {
    /// Wrap protocol text. Blank text is rejected.
    pub fn new(text: impl Into<String>) -> Result<Self, MetadataError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MetadataError::EmptySource);
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn players(&self) -> Vec<PlayerSpec> {
        extract_players(&self.text)
    }

    pub fn description(&self) -> String {
        extract_description(&self.text)
    }

    pub fn metadata(&self) -> ProtocolMetadata {
        ProtocolMetadata {
            players: self.players(),
            description: self.description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PROTOCOL: &str = r#"
/* description: A simple persuasion dialogue
   between two players. */
ABC{
    turns(magnitude:single, ordering:strict),
    player(id:alice, roles:{proposer, speaker}, max:1),
    player(id:bob, roles:{opponent}),
    store(id:CS, owner:{alice}, structure:set, visibility:public)
}
"#;

    #[test]
    fn test_triple_entries_group_by_player() {
        let players = extract_players("player(p1:roles:{mod,judge}, p2:name:bob)");

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id(), Some("p1"));
        assert_eq!(players[0].roles(), &["mod".to_string(), "judge".to_string()]);
        assert_eq!(players[1].id(), Some("p2"));
        assert_eq!(players[1].text("name"), Some("bob"));
    }

    #[test]
    fn test_field_value_entries() {
        let players = extract_players(PROTOCOL);

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id(), Some("alice"));
        assert_eq!(
            players[0].roles(),
            &["proposer".to_string(), "speaker".to_string()]
        );
        assert_eq!(players[0].text("max"), Some("1"));
        assert_eq!(players[1].id(), Some("bob"));
        assert_eq!(players[1].roles(), &["opponent".to_string()]);
    }

    #[test]
    fn test_repeated_id_merges_fields() {
        let players = extract_players("player(p1:name:ann, p1:roles:{judge})");
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].text("name"), Some("ann"));
        assert_eq!(players[0].roles(), &["judge".to_string()]);
    }

    #[test]
    fn test_braced_non_role_field_stays_text() {
        let players = extract_players("player(id:a, owner:{ x, y })");
        assert_eq!(players[0].text("owner"), Some("x, y"));
    }

    #[test]
    fn test_malformed_input_is_skipped() {
        assert!(extract_players("player()").is_empty());
        assert!(extract_players("player(nonsense)").is_empty());
        assert!(extract_players("no players here").is_empty());

        let players = extract_players("player(a:b:c:d, id:carol)");
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id(), Some("carol"));
    }

    #[test]
    fn test_description() {
        assert_eq!(
            extract_description(PROTOCOL),
            "A simple persuasion dialogue\n   between two players."
        );
        assert_eq!(
            extract_description("/* Description: Upper case marker */"),
            "Upper case marker"
        );
        assert_eq!(extract_description("no comment"), "");
        assert_eq!(
            extract_description("/* description: */ /* description: second */"),
            "second"
        );
    }

    #[test]
    fn test_protocol_source() {
        assert_eq!(ProtocolSource::new("  \n"), Err(MetadataError::EmptySource));

        let source = ProtocolSource::new(PROTOCOL).unwrap();
        let metadata = source.metadata();
        assert_eq!(metadata.players.len(), 2);
        assert!(metadata.description.starts_with("A simple persuasion"));
        assert_eq!(source.text(), PROTOCOL);
    }

    #[test]
    fn test_player_spec_serializes_flat() {
        let players = extract_players("player(id:alice, roles:{proposer})");
        let json = serde_json::to_value(&players[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "alice", "roles": ["proposer"]})
        );
    }
}
