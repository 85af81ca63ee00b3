pub mod bag;
pub mod constants;
pub mod error;
pub mod file;
pub mod parsed;
pub mod path_safety;
pub mod tag_data;
pub mod walk;

pub use bag::{Bag, FileSummary};
pub use constants::{Collection, FileKind};
pub use error::BagError;
pub use file::FileRecord;
pub use tag_data::{KeyValueCollection, KeyValuePair, TagData};
