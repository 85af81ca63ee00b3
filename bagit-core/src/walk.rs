use crate::bag::{Bag, FileSummary};
use crate::path_safety::{bag_relative, check_contained, PathPolicy};
use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Clone, Debug, Default)]
pub struct WalkConfig {
    pub policy: PathPolicy,
    /// Globs matched against the bag-relative path, e.g. `**/.DS_Store`.
    pub exclude: Vec<String>,
}

fn build_excludes(patterns: &[String]) -> Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p).with_context(|| format!("bad exclude glob {:?}", p))?);
    }
    Ok(b.build()?)
}

/// One summary per regular file under `root`, sorted by relative path.
pub fn summarize(root: &Path, cfg: &WalkConfig) -> Result<Vec<FileSummary>> {
    let md = std::fs::metadata(root).with_context(|| format!("stat {}", root.display()))?;
    if !md.is_dir() {
        bail!("bag root is not a directory: {}", root.display());
    }
    let excludes = build_excludes(&cfg.exclude)?;
    let mut out = Vec::new();
    let walker = WalkDir::new(root).min_depth(1).follow_links(cfg.policy.follow_symlinks);
    for ent in walker {
        let ent = ent.with_context(|| format!("walk {}", root.display()))?;
        let ft = ent.file_type();
        if ft.is_symlink() {
            warn!(path = %ent.path().display(), "skipping symlink");
            continue;
        }
        if !ft.is_file() {
            continue;
        }
        if cfg.policy.follow_symlinks {
            check_contained(root, ent.path())?;
        }
        let rel_path = bag_relative(root, ent.path())?;
        if excludes.is_match(&rel_path) {
            debug!(%rel_path, "excluded");
            continue;
        }
        let size = ent.metadata().with_context(|| format!("stat {}", rel_path))?.len();
        out.push(FileSummary { rel_path, size });
    }
    out.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok(out)
}

/// Walk `root` and classify every file into a new [`Bag`].
pub fn load_bag(root: &Path, cfg: &WalkConfig) -> Result<Bag> {
    let mut bag = Bag::new(root);
    for summary in summarize(root, cfg)? {
        let (_, kind) = bag.add_file_from_summary(&summary);
        debug!(rel_path = %summary.rel_path, %kind, size = summary.size, "classified");
    }
    Ok(bag)
}
