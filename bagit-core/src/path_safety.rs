use anyhow::{bail, Context, Result};
use std::path::{Component, Path};

#[derive(Clone, Copy, Debug, Default)]
pub struct PathPolicy {
    pub follow_symlinks: bool,
}

/// Bag-relative form of `path`, with `/` separators regardless of platform.
/// Rejects anything that is not strictly below `root`.
pub fn bag_relative(root: &Path, path: &Path) -> Result<String> {
    let Some(rel) = pathdiff::diff_paths(path, root) else {
        bail!("cannot make {:?} relative to {:?}", path, root);
    };
    if rel.is_absolute() {
        bail!("absolute paths are not allowed: {:?}", rel);
    }
    let mut parts = Vec::new();
    for comp in rel.components() {
        match comp {
            Component::Normal(s) => match s.to_str() {
                Some(s) => parts.push(s.to_string()),
                None => bail!("non-UTF-8 path component: {:?}", rel),
            },
            Component::CurDir => {}
            _ => bail!("parent traversal not allowed: {:?}", rel),
        }
    }
    if parts.is_empty() {
        bail!("path is the bag root itself: {:?}", path);
    }
    Ok(parts.join("/"))
}

/// The canonical form of `path` must stay under the canonical root. This also
/// catches files reached through a linked directory.
pub fn check_contained(root: &Path, path: &Path) -> Result<()> {
    let root_can = std::fs::canonicalize(root)?;
    let cand_can = std::fs::canonicalize(path).with_context(|| format!("resolve {:?}", path))?;
    if !cand_can.starts_with(&root_can) {
        bail!("path escapes root: {:?}", path);
    }
    Ok(())
}
