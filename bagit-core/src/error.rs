use thiserror::Error;

/// Structural lookup failures. A listed-but-absent entry is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BagError {
    /// The manifest (or tag manifest) for the requested algorithm was never
    /// registered with the bag.
    #[error("{name} is missing")]
    ManifestMissing { name: String },

    /// The requested path was never registered as a tag file.
    #[error("tag file {path} is not in bag")]
    TagFileNotInBag { path: String },
}

pub type Result<T> = std::result::Result<T, BagError>;
