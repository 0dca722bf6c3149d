pub mod error;
pub mod reader;
pub mod row;
pub mod writer;

pub use error::ExportError;
pub use reader::{read_csv, CsvTable};
pub use row::ExportRow;
pub use writer::{export, write_csv, write_json, UTF8_BOM};
