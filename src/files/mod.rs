//! Input side: file kinds, rows and pre-parsed row files.

pub mod load;
pub mod row;

pub use load::load_rows_file;
pub use row::{FileKind, FileSet, Row, UploadedFile};
