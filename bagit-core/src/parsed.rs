//! Already-parsed manifest and tag-file content, delivered as JSON by
//! whatever parsed the raw files, and applied onto a classified [`Bag`].

use crate::bag::Bag;
use crate::constants::Collection;
use crate::tag_data::KeyValueCollection;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ParsedContent {
    /// Manifest or tag-manifest name -> (bag-relative path -> digest).
    #[serde(default)]
    pub manifests: BTreeMap<String, BTreeMap<String, String>>,
    /// Tag file path -> pairs in source order.
    #[serde(default)]
    pub tag_files: BTreeMap<String, KeyValueCollection>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub manifests_filled: usize,
    pub tag_files_filled: usize,
    /// Entries naming files the bag never registered (or registered in a
    /// different collection).
    pub unmatched: Vec<String>,
}

impl ParsedContent {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let f = File::open(path).with_context(|| format!("open {:?}", path))?;
        serde_json::from_reader(BufReader::new(f)).context("read parsed content json")
    }

    pub fn apply(self, bag: &mut Bag) -> ApplyReport {
        let mut report = ApplyReport::default();
        for (name, digests) in self.manifests {
            let target = match Collection::for_path(&name) {
                Collection::Manifests => bag.manifests.get_mut(&name),
                Collection::TagManifests => bag.tag_manifests.get_mut(&name),
                _ => None,
            };
            match target {
                Some(rec) => {
                    rec.checksums.extend(digests);
                    report.manifests_filled += 1;
                }
                None => {
                    warn!(%name, "parsed manifest does not match a registered manifest");
                    report.unmatched.push(name);
                }
            }
        }
        for (path, pairs) in self.tag_files {
            match bag.tag_files.get_mut(&path) {
                Some(rec) => {
                    rec.set_parsed_data(pairs);
                    report.tag_files_filled += 1;
                }
                None => {
                    warn!(%path, "parsed tag file does not match a registered tag file");
                    report.unmatched.push(path);
                }
            }
        }
        report
    }
}
