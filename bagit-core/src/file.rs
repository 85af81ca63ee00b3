use crate::tag_data::TagData;
use std::collections::BTreeMap;

/// One file inside a bag.
///
/// `checksums` is keyed by bag-relative path for manifest and tag-manifest
/// records, and by algorithm name for payload records. `parsed_data` is only
/// set on tag files.
#[derive(Debug, Default)]
pub struct FileRecord {
    pub size: u64,
    pub checksums: BTreeMap<String, String>,
    pub parsed_data: Option<Box<dyn TagData>>,
}

impl FileRecord {
    pub fn new(size: u64) -> Self {
        Self { size, ..Self::default() }
    }

    pub fn set_checksum(&mut self, key: impl Into<String>, digest: impl Into<String>) {
        self.checksums.insert(key.into(), digest.into());
    }

    pub fn checksum(&self, key: &str) -> Option<&str> {
        self.checksums.get(key).map(String::as_str)
    }

    pub fn set_parsed_data(&mut self, data: impl TagData + 'static) {
        self.parsed_data = Some(Box::new(data));
    }

    /// Values for `key` in source order; empty when nothing was parsed.
    pub fn tag_values(&self, key: &str) -> Vec<String> {
        match &self.parsed_data {
            Some(pd) => pd.find_by_key(key).into_iter().map(|kv| kv.value.clone()).collect(),
            None => Vec::new(),
        }
    }
}
