use crate::constants::{
    algorithm_from_name, manifest_name, tag_manifest_name, Collection, FileKind, MANIFEST_PREFIX,
    PAYLOAD_PREFIX, TAG_MANIFEST_PREFIX,
};
use crate::error::{BagError, Result};
use crate::file::FileRecord;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A file found while walking a bag. `rel_path` is used verbatim as a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileSummary {
    pub rel_path: String,
    pub size: u64,
}

impl FileSummary {
    pub fn new(rel_path: impl Into<String>, size: u64) -> Self {
        Self { rel_path: rel_path.into(), size }
    }
}

/// In-memory model of one bag. The four maps are disjoint; which one holds a
/// path is decided by [`Collection::for_path`] when the path is registered.
#[derive(Debug, Default)]
pub struct Bag {
    pub path: PathBuf,
    pub payload: BTreeMap<String, FileRecord>,
    pub manifests: BTreeMap<String, FileRecord>,
    pub tag_manifests: BTreeMap<String, FileRecord>,
    pub tag_files: BTreeMap<String, FileRecord>,
}

impl Bag {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), ..Self::default() }
    }

    fn collection(&self, c: Collection) -> &BTreeMap<String, FileRecord> {
        match c {
            Collection::TagManifests => &self.tag_manifests,
            Collection::Manifests => &self.manifests,
            Collection::Payload => &self.payload,
            Collection::TagFiles => &self.tag_files,
        }
    }

    fn collection_mut(&mut self, c: Collection) -> &mut BTreeMap<String, FileRecord> {
        match c {
            Collection::TagManifests => &mut self.tag_manifests,
            Collection::Manifests => &mut self.manifests,
            Collection::Payload => &mut self.payload,
            Collection::TagFiles => &mut self.tag_files,
        }
    }

    /// Register a file and return its fresh record for the caller to fill in.
    /// A record already stored under the same path is replaced.
    pub fn add_file_from_summary(&mut self, summary: &FileSummary) -> (&mut FileRecord, FileKind) {
        let c = Collection::for_path(&summary.rel_path);
        let slot = self.collection_mut(c).entry(summary.rel_path.clone()).or_default();
        *slot = FileRecord::new(summary.size);
        (slot, c.kind())
    }

    /// Checksum recorded for `file_path` in `manifest-<algorithm>.txt`.
    ///
    /// Fails only when that manifest was never registered. A path the
    /// manifest does not list yields `""`.
    pub fn checksum_from_manifest(&self, algorithm: &str, file_path: &str) -> Result<&str> {
        lookup_checksum(&self.manifests, manifest_name(algorithm), file_path)
    }

    /// Same contract as [`Bag::checksum_from_manifest`], against
    /// `tagmanifest-<algorithm>.txt`.
    pub fn checksum_from_tag_manifest(&self, algorithm: &str, file_path: &str) -> Result<&str> {
        lookup_checksum(&self.tag_manifests, tag_manifest_name(algorithm), file_path)
    }

    /// Payload paths are looked up in the manifest, everything else in the
    /// tag manifest.
    pub fn checksum_for(&self, algorithm: &str, file_path: &str) -> Result<&str> {
        if file_path.starts_with(PAYLOAD_PREFIX) {
            self.checksum_from_manifest(algorithm, file_path)
        } else {
            self.checksum_from_tag_manifest(algorithm, file_path)
        }
    }

    /// Values of `tag_name` in one tag file, in source order, and whether any
    /// were found.
    pub fn tag_values_from_file(
        &self,
        file_path: &str,
        tag_name: &str,
    ) -> Result<(Vec<String>, bool)> {
        let tag_file = self
            .tag_files
            .get(file_path)
            .ok_or_else(|| BagError::TagFileNotInBag { path: file_path.to_string() })?;
        let values = tag_file.tag_values(tag_name);
        let found = !values.is_empty();
        Ok((values, found))
    }

    /// Values of `tag_name` across all tag files. Files are visited in path
    /// order; values within a file keep their source order.
    pub fn tag_values(&self, tag_name: &str) -> (Vec<String>, bool) {
        let values: Vec<String> =
            self.tag_files.values().flat_map(|tf| tf.tag_values(tag_name)).collect();
        let found = !values.is_empty();
        (values, found)
    }

    pub fn kind_of(&self, rel_path: &str) -> Option<FileKind> {
        let c = Collection::for_path(rel_path);
        self.collection(c).contains_key(rel_path).then(|| c.kind())
    }

    pub fn manifest_algorithms(&self) -> Vec<&str> {
        self.manifests.keys().filter_map(|n| algorithm_from_name(n, MANIFEST_PREFIX)).collect()
    }

    pub fn tag_manifest_algorithms(&self) -> Vec<&str> {
        self.tag_manifests
            .keys()
            .filter_map(|n| algorithm_from_name(n, TAG_MANIFEST_PREFIX))
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.payload.len() + self.manifests.len() + self.tag_manifests.len() + self.tag_files.len()
    }
}

fn lookup_checksum<'a>(
    records: &'a BTreeMap<String, FileRecord>,
    name: String,
    file_path: &str,
) -> Result<&'a str> {
    match records.get(&name) {
        Some(rec) => Ok(rec.checksum(file_path).unwrap_or("")),
        None => Err(BagError::ManifestMissing { name }),
    }
}
