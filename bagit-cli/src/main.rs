use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bagit_core::parsed::ParsedContent;
use bagit_core::path_safety::PathPolicy;
use bagit_core::walk::{load_bag, WalkConfig};
use bagit_core::{Bag, FileKind};

const DEFAULT_LOG_FILTER: &str = "bagit=info,bagit_core=info";

#[derive(Parser)]
#[command(name = "bagit", version, about = "Inspect BagIt bags: file classes, checksums, tags")]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Args, Clone)]
struct WalkArgs {
    #[arg(long, default_value_t = false)]
    follow_symlinks: bool,
    /// Glob over bag-relative paths to leave out (repeatable)
    #[arg(long)]
    exclude: Vec<String>,
}

impl WalkArgs {
    fn config(&self) -> WalkConfig {
        WalkConfig {
            policy: PathPolicy { follow_symlinks: self.follow_symlinks },
            exclude: self.exclude.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Classify every file of one or more bags
    Inspect {
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Also list each file with its kind
        #[arg(long, default_value_t = false)]
        list: bool,
        #[command(flatten)]
        walk: WalkArgs,
        #[arg(required = true)]
        bags: Vec<PathBuf>,
    },
    /// Look up the checksum a manifest records for a file
    Checksum {
        /// JSON with already-parsed manifest and tag content
        #[arg(long)]
        parsed: PathBuf,
        #[arg(long, default_value = "sha256")]
        algorithm: String,
        #[command(flatten)]
        walk: WalkArgs,
        bag: PathBuf,
        path: String,
    },
    /// Print the values of a tag
    Tags {
        #[arg(long)]
        parsed: PathBuf,
        /// Restrict the lookup to one tag file, e.g. bag-info.txt
        #[arg(long)]
        file: Option<String>,
        #[command(flatten)]
        walk: WalkArgs,
        bag: PathBuf,
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Cmd::Inspect { json, list, walk, bags } => inspect(&bags, &walk.config(), json, list)?,
        Cmd::Checksum { parsed, algorithm, walk, bag, path } => {
            checksum(&bag, &parsed, &walk.config(), &algorithm, &path)?
        }
        Cmd::Tags { parsed, file, walk, bag, name } => {
            tags(&bag, &parsed, &walk.config(), file.as_deref(), &name)?
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "bagit=debug,bagit_core=debug" } else { DEFAULT_LOG_FILTER })
    });
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[derive(Serialize)]
struct FileLine {
    rel_path: String,
    kind: FileKind,
    size: u64,
}

#[derive(Serialize)]
struct BagReport {
    bag: String,
    inspected_utc: String,
    payload: usize,
    manifests: usize,
    tag_manifests: usize,
    tag_files: usize,
    payload_bytes: u64,
    manifest_algorithms: Vec<String>,
    tag_manifest_algorithms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<Vec<FileLine>>,
}

impl BagReport {
    fn from_bag(bag: &Bag, list: bool) -> Self {
        let files = list.then(|| {
            let groups = [
                (&bag.tag_manifests, FileKind::Manifest),
                (&bag.manifests, FileKind::Manifest),
                (&bag.payload, FileKind::PayloadFile),
                (&bag.tag_files, FileKind::TagFile),
            ];
            let mut v: Vec<FileLine> = groups
                .iter()
                .flat_map(|(m, kind)| {
                    m.iter().map(move |(p, r)| FileLine {
                        rel_path: p.clone(),
                        kind: *kind,
                        size: r.size,
                    })
                })
                .collect();
            v.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
            v
        });
        Self {
            bag: bag.path.display().to_string(),
            inspected_utc: chrono::Utc::now().to_rfc3339(),
            payload: bag.payload.len(),
            manifests: bag.manifests.len(),
            tag_manifests: bag.tag_manifests.len(),
            tag_files: bag.tag_files.len(),
            payload_bytes: bag.payload.values().map(|r| r.size).sum(),
            manifest_algorithms: bag.manifest_algorithms().into_iter().map(String::from).collect(),
            tag_manifest_algorithms: bag
                .tag_manifest_algorithms()
                .into_iter()
                .map(String::from)
                .collect(),
            files,
        }
    }

    fn print_text(&self) {
        println!("{}", self.bag);
        println!("  payload files:  {} ({} bytes)", self.payload, self.payload_bytes);
        println!("  manifests:      {} [{}]", self.manifests, self.manifest_algorithms.join(", "));
        println!(
            "  tag manifests:  {} [{}]",
            self.tag_manifests,
            self.tag_manifest_algorithms.join(", ")
        );
        println!("  tag files:      {}", self.tag_files);
        if let Some(files) = &self.files {
            for f in files {
                println!("    {:12}  {:>10}  {}", f.kind.as_str(), f.size, f.rel_path);
            }
        }
    }
}

fn inspect(bags: &[PathBuf], cfg: &WalkConfig, json: bool, list: bool) -> Result<()> {
    // One Bag per directory; bags never share state, so they can load in parallel.
    let reports: Vec<BagReport> = bags
        .par_iter()
        .map(|root| -> Result<BagReport> {
            let bag = load_bag(root, cfg).with_context(|| format!("load bag {}", root.display()))?;
            debug!(bag = %root.display(), files = bag.file_count(), "loaded");
            Ok(BagReport::from_bag(&bag, list))
        })
        .collect::<Result<_>>()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for r in &reports {
            r.print_text();
        }
    }
    info!(bags = reports.len(), "inspected");
    Ok(())
}

fn load_with_parsed(root: &Path, parsed: &Path, cfg: &WalkConfig) -> Result<Bag> {
    let mut bag = load_bag(root, cfg).with_context(|| format!("load bag {}", root.display()))?;
    let report = ParsedContent::from_json_file(parsed)?.apply(&mut bag);
    debug!(
        manifests = report.manifests_filled,
        tag_files = report.tag_files_filled,
        unmatched = report.unmatched.len(),
        "applied parsed content"
    );
    Ok(bag)
}

fn checksum(
    root: &Path,
    parsed: &Path,
    cfg: &WalkConfig,
    algorithm: &str,
    path: &str,
) -> Result<()> {
    let bag = load_with_parsed(root, parsed, cfg)?;
    let digest = bag.checksum_for(algorithm, path)?;
    if digest.is_empty() {
        println!("(not listed)");
    } else {
        println!("{}", digest);
    }
    Ok(())
}

fn tags(
    root: &Path,
    parsed: &Path,
    cfg: &WalkConfig,
    file: Option<&str>,
    name: &str,
) -> Result<()> {
    let bag = load_with_parsed(root, parsed, cfg)?;
    let (values, found) = match file {
        Some(f) => bag.tag_values_from_file(f, name)?,
        None => bag.tag_values(name),
    };
    if !found {
        println!("(not found)");
    }
    for v in values {
        println!("{}", v);
    }
    Ok(())
}
