use serde::Serialize;
use std::fmt;

pub const TAG_MANIFEST_PREFIX: &str = "tagmanifest-";
pub const MANIFEST_PREFIX: &str = "manifest-";
pub const PAYLOAD_PREFIX: &str = "data/";

/// What a file is to the caller that walks the bag.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Manifest,
    PayloadFile,
    TagFile,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Manifest => "manifest",
            FileKind::PayloadFile => "payload_file",
            FileKind::TagFile => "tag_file",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the bag's four maps a path belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    TagManifests,
    Manifests,
    Payload,
    TagFiles,
}

impl Collection {
    /// Classify a bag-relative path. Order matters: `tagmanifest-` is tested
    /// before `manifest-`, and both before `data/`.
    pub fn for_path(rel_path: &str) -> Self {
        if rel_path.starts_with(TAG_MANIFEST_PREFIX) {
            Collection::TagManifests
        } else if rel_path.starts_with(MANIFEST_PREFIX) {
            Collection::Manifests
        } else if rel_path.starts_with(PAYLOAD_PREFIX) {
            Collection::Payload
        } else {
            Collection::TagFiles
        }
    }

    pub fn kind(self) -> FileKind {
        match self {
            Collection::TagManifests | Collection::Manifests => FileKind::Manifest,
            Collection::Payload => FileKind::PayloadFile,
            Collection::TagFiles => FileKind::TagFile,
        }
    }
}

pub fn manifest_name(algorithm: &str) -> String {
    format!("{MANIFEST_PREFIX}{algorithm}.txt")
}

pub fn tag_manifest_name(algorithm: &str) -> String {
    format!("{TAG_MANIFEST_PREFIX}{algorithm}.txt")
}

/// Recover the algorithm from a top-level `<prefix><alg>.txt` name.
pub(crate) fn algorithm_from_name<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let alg = name.strip_prefix(prefix)?.strip_suffix(".txt")?;
    if alg.is_empty() || alg.contains('/') {
        return None;
    }
    Some(alg)
}
