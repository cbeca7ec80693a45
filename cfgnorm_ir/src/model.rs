use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Map key for document nodes.
///
/// `Global` is the VRF-global sentinel: commands that omit a VRF clause file
/// under it, so "no VRF" can never collide with a VRF that happens to be
/// named like the sentinel's rendering. Keys order `Global < Int < Str` for
/// deterministic iteration and output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Global,
    Int(i64),
    Str(String),
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Global => Ok(()),
            Key::Int(value) => write!(f, "{value}"),
            Key::Str(value) => f.write_str(value),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Closed value type for every attribute in a document.
///
/// `Null` is a presence marker carrying no payload (`fall-over bfd` with no
/// session type). `Set` members are unordered and unique; repeated additive
/// commands union into it. `List` preserves append order and duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Set(BTreeSet<Key>),
    List(Vec<Value>),
    Node(Node),
}

impl Value {
    /// String scalar.
    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    /// Set built from members.
    pub fn set<K: Into<Key>>(members: impl IntoIterator<Item = K>) -> Self {
        Value::Set(members.into_iter().map(Into::into).collect())
    }

    /// Nested node built from entries.
    pub fn node<K: Into<Key>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Node(Node::from_entries(entries))
    }

    /// Borrow the nested node, if this value is one.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Str(value) => serializer.serialize_str(value),
            Value::Set(members) => {
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for member in members {
                    match member {
                        Key::Int(value) => seq.serialize_element(value)?,
                        other => seq.serialize_element(&other.to_string())?,
                    }
                }
                seq.end()
            }
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Node(node) => node.serialize(serializer),
        }
    }
}

/// Keyed block of attributes: the node type of the document tree.
///
/// Mutation goes through the merge primitives below; each models one of the
/// dialect's attribute kinds (scalar replace, presence flag, set union,
/// ordered append, nested keyed block, removal).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node(BTreeMap<Key, Value>);

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a node from literal entries (mostly useful in tests).
    pub fn from_entries<K: Into<Key>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Node(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.0.get(&key.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.0.keys()
    }

    /// Scalar replace. Last write wins.
    pub fn set(&mut self, key: impl Into<Key>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Presence flag (`Bool(true)`).
    pub fn flag(&mut self, key: impl Into<Key>) {
        self.set(key, Value::Bool(true));
    }

    /// Union members into the set at `key`, creating it when absent.
    ///
    /// Idempotent: re-adding a present member changes nothing.
    pub fn union<K: Into<Key>>(
        &mut self,
        key: impl Into<Key>,
        members: impl IntoIterator<Item = K>,
    ) {
        let slot = self
            .0
            .entry(key.into())
            .or_insert_with(|| Value::Set(BTreeSet::new()));
        if !matches!(slot, Value::Set(_)) {
            *slot = Value::Set(BTreeSet::new());
        }
        if let Value::Set(set) = slot {
            set.extend(members.into_iter().map(Into::into));
        }
    }

    /// Overwrite the set at `key` wholesale.
    pub fn replace_set<K: Into<Key>>(
        &mut self,
        key: impl Into<Key>,
        members: impl IntoIterator<Item = K>,
    ) {
        self.set(
            key,
            Value::Set(members.into_iter().map(Into::into).collect()),
        );
    }

    /// Append to the ordered list at `key`, creating it when absent.
    ///
    /// Duplicates are permitted and preserved in order.
    pub fn append(&mut self, key: impl Into<Key>, value: Value) {
        let slot = self
            .0
            .entry(key.into())
            .or_insert_with(|| Value::List(Vec::new()));
        if !matches!(slot, Value::List(_)) {
            *slot = Value::List(Vec::new());
        }
        if let Value::List(list) = slot {
            list.push(value);
        }
    }

    /// Create-or-get the nested node at `key`.
    ///
    /// Two commands carrying the same identifying key always reach the same
    /// node rather than creating a duplicate.
    pub fn child(&mut self, key: impl Into<Key>) -> &mut Node {
        let slot = self
            .0
            .entry(key.into())
            .or_insert_with(|| Value::Node(Node::new()));
        if !matches!(slot, Value::Node(_)) {
            *slot = Value::Node(Node::new());
        }
        match slot {
            Value::Node(node) => node,
            _ => unreachable!("slot was just normalized to a node"),
        }
    }

    /// Borrow the nested node at `key` mutably, without creating it.
    ///
    /// Negation handlers use this so that negating an absent target never
    /// materializes intermediate nodes.
    pub fn child_mut(&mut self, key: impl Into<Key>) -> Option<&mut Node> {
        match self.0.get_mut(&key.into()) {
            Some(Value::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Remove `key`, returning the previous value.
    ///
    /// Removing an absent key is a no-op returning `None`; negation commands
    /// rely on this never being an error.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.0.remove(&key.into())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The root of one normalized configuration document.
///
/// Created empty, mutated in place line by line, and never torn down
/// mid-parse. Multiple parses over the same document accumulate, which is
/// what incremental multi-file loading relies on. Equality is structural:
/// insertion order never matters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_previous_scalar() {
        let mut node = Node::new();
        node.set("router-id", Value::str("10.0.0.1"));
        node.set("router-id", Value::str("10.0.0.2"));
        assert_eq!(node.get("router-id"), Some(&Value::str("10.0.0.2")));
    }

    #[test]
    fn union_is_idempotent() {
        let mut node = Node::new();
        node.union("communities", ["100:1", "200:1"]);
        node.union("communities", ["100:1"]);
        assert_eq!(
            node.get("communities"),
            Some(&Value::set(["100:1", "200:1"]))
        );
    }

    #[test]
    fn append_preserves_order_and_duplicates() {
        let mut node = Node::new();
        node.append("next-hop", Value::str("10.0.0.1"));
        node.append("next-hop", Value::str("10.0.0.2"));
        node.append("next-hop", Value::str("10.0.0.1"));
        assert_eq!(
            node.get("next-hop"),
            Some(&Value::List(vec![
                Value::str("10.0.0.1"),
                Value::str("10.0.0.2"),
                Value::str("10.0.0.1"),
            ]))
        );
    }

    #[test]
    fn child_reaches_the_same_node_for_the_same_key() {
        let mut node = Node::new();
        node.child("area").child("10.0.0.0").flag("stub");
        node.child("area").child("10.0.0.0").flag("no-summary");
        let area = node
            .get("area")
            .and_then(Value::as_node)
            .and_then(|areas| areas.get("10.0.0.0"))
            .and_then(Value::as_node)
            .expect("area node");
        assert_eq!(area.len(), 2);
    }

    #[test]
    fn remove_of_absent_key_is_a_noop() {
        let mut node = Node::new();
        assert_eq!(node.remove("passive-interface"), None);
        assert!(node.is_empty());
    }

    #[test]
    fn global_sentinel_never_collides_with_a_named_key() {
        let mut node = Node::new();
        node.child(Key::Global).flag("a");
        node.child("").flag("b");
        assert_eq!(node.len(), 2);
    }

    #[test]
    fn keys_order_deterministically() {
        let mut node = Node::new();
        node.flag("zzz");
        node.flag(Key::Global);
        node.flag(20);
        node.flag(10);
        let keys: Vec<Key> = node.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Key::Global, Key::Int(10), Key::Int(20), Key::from("zzz")]
        );
    }

    #[test]
    fn structural_equality_ignores_insertion_order() {
        let mut a = Document::new();
        a.root_mut().set("x", Value::Int(1));
        a.root_mut().set("y", Value::Int(2));

        let mut b = Document::new();
        b.root_mut().set("y", Value::Int(2));
        b.root_mut().set("x", Value::Int(1));

        assert_eq!(a, b);
    }
}
