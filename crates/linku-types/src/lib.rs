pub mod entry;
pub mod key;
pub mod language;

pub use entry::{WordDetails, WordEntry};
pub use key::{DatasetKind, LogicalKey};
pub use language::{LanguageCatalog, LanguageInfo};
