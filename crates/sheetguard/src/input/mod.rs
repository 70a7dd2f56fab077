//! Input parsing, column mappings, and source metadata.

mod mapping;
mod parser;
mod source;
mod table;

pub use mapping::ColumnMapping;
pub use parser::{DEFAULT_NA_VALUES, Parser, ParserConfig, detect_delimiter};
pub use source::SourceMetadata;
pub use table::ParsedTable;
