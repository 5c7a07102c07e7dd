//! GenomeSpy spec assembly for copy-ratio and allele-fraction data.
//!
//! - `files`: file kinds, rows and the loader for pre-parsed row files
//! - `spec`: typed spec model, layer builders and the assembler
//! - `render`: self-contained HTML report embedding a spec

pub mod files;
pub mod render;
pub mod spec;

pub use files::{FileKind, FileSet, Row, UploadedFile};
pub use spec::{Spec, create_spec};

pub type Result<T> = anyhow::Result<T>;
