//! Commitment stores: named containers of content players have put forward.

use serde::{Deserialize, Serialize};

use crate::players::PlayerId;

/// How a store orders its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreStructure {
    #[default]
    Set,
    Queue,
    Stack,
}

/// Who may see a store's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreVisibility {
    #[default]
    Public,
    Private,
}

/// A named store declared by the protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: String,

    #[serde(default)]
    pub owners: Vec<PlayerId>,

    #[serde(default)]
    pub structure: StoreStructure,

    #[serde(default)]
    pub visibility: StoreVisibility,

    /// Content in insertion order.
    #[serde(default)]
    pub content: Vec<String>,
}

impl Store {
    /// Create an empty public set store.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owners: Vec::new(),
            structure: StoreStructure::Set,
            visibility: StoreVisibility::Public,
            content: Vec::new(),
        }
    }

    /// Add an owner.
    pub fn with_owner(mut self, owner: impl Into<PlayerId>) -> Self {
        self.owners.push(owner.into());
        self
    }

    pub fn with_structure(mut self, structure: StoreStructure) -> Self {
        self.structure = structure;
        self
    }

    pub fn with_visibility(mut self, visibility: StoreVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Add content items.
    pub fn with_content<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            self.add(item);
        }
        self
    }

    /// Add a content item. Set stores ignore duplicates.
    pub fn add(&mut self, item: impl Into<String>) {
        let item = item.into();
        if self.structure == StoreStructure::Set && self.content.contains(&item) {
            return;
        }
        self.content.push(item);
    }

    /// Remove every occurrence of an item. Returns true if anything was removed.
    pub fn remove(&mut self, item: &str) -> bool {
        let before = self.content.len();
        self.content.retain(|c| c != item);
        self.content.len() != before
    }

    /// Membership test respecting negation: with `negated` set the query
    /// asks whether the value is absent instead.
    pub fn contains(&self, value: &str, negated: bool) -> bool {
        let present = self.content.iter().any(|c| c == value);
        present != negated
    }

    /// Item a queue would hand out next, or a stack's top.
    pub fn head(&self) -> Option<&str> {
        match self.structure {
            StoreStructure::Queue => self.content.first(),
            StoreStructure::Set | StoreStructure::Stack => self.content.last(),
        }
        .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_respects_negation() {
        let store = Store::new("CS").with_content(["apple", "banana"]);

        assert!(store.contains("apple", false));
        assert!(!store.contains("cherry", false));

        assert!(!store.contains("apple", true));
        assert!(store.contains("cherry", true));
    }

    #[test]
    fn test_set_ignores_duplicates() {
        let mut store = Store::new("CS");
        store.add("p");
        store.add("p");
        assert_eq!(store.len(), 1);

        let mut queue = Store::new("Q").with_structure(StoreStructure::Queue);
        queue.add("p");
        queue.add("p");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut store = Store::new("CS").with_content(["a", "b"]);
        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert_eq!(store.content, vec!["b".to_string()]);
    }

    #[test]
    fn test_head() {
        let queue = Store::new("Q")
            .with_structure(StoreStructure::Queue)
            .with_content(["first", "second"]);
        assert_eq!(queue.head(), Some("first"));

        let stack = Store::new("S")
            .with_structure(StoreStructure::Stack)
            .with_content(["first", "second"]);
        assert_eq!(stack.head(), Some("second"));

        assert!(Store::new("E").head().is_none());
    }
}
