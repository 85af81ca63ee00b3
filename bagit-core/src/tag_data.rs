use serde::Deserialize;
use std::fmt;

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Parsed content of one tag file, as handed over by a tag-file parser.
///
/// `find_by_key` returns every pair whose key equals `key`, in the order the
/// pairs appeared in the source file. A key may repeat; no match is an empty
/// vector.
pub trait TagData: fmt::Debug + Send + Sync {
    fn find_by_key(&self, key: &str) -> Vec<&KeyValuePair>;
}

/// Ordered key/value pairs. Keys compare exactly (case-sensitive).
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct KeyValueCollection {
    items: Vec<KeyValuePair>,
}

impl KeyValueCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.push(KeyValuePair::new(key, value));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TagData for KeyValueCollection {
    fn find_by_key(&self, key: &str) -> Vec<&KeyValuePair> {
        self.items.iter().filter(|kv| kv.key == key).collect()
    }
}
