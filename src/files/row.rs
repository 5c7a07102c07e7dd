use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A single parsed record: column name -> value.
pub type Row = Map<String, Value>;

/// Logical kind of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileKind {
    /// Segments (genomic intervals with posterior copy ratio and allele fraction).
    Seg,
    /// Copy-ratio points.
    Cr,
    /// Heterozygous sites.
    Hets,
    /// Sequence dictionary (contig names and lengths).
    Dict,
}

impl FileKind {
    pub const ALL: [FileKind; 4] = [FileKind::Seg, FileKind::Cr, FileKind::Hets, FileKind::Dict];

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Seg => "SEG",
            FileKind::Cr => "CR",
            FileKind::Hets => "HETS",
            FileKind::Dict => "DICT",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded file whose rows have already been parsed upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedFile {
    pub data: Vec<Row>,
}

impl UploadedFile {
    pub fn new(data: Vec<Row>) -> Self {
        Self { data }
    }
}

/// Uploaded files keyed by kind. Absent kinds read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileSet(BTreeMap<FileKind, UploadedFile>);

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: FileKind, file: UploadedFile) -> Option<UploadedFile> {
        self.0.insert(kind, file)
    }

    /// Builder-style insert.
    pub fn with(mut self, kind: FileKind, data: Vec<Row>) -> Self {
        self.insert(kind, UploadedFile::new(data));
        self
    }

    pub fn get(&self, kind: FileKind) -> Option<&UploadedFile> {
        self.0.get(&kind)
    }

    /// Rows of `kind`, or an empty slice when the kind was not uploaded.
    pub fn rows(&self, kind: FileKind) -> &[Row] {
        self.get(kind).map(|f| f.data.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, kind: FileKind) -> bool {
        self.0.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: Value) -> Row {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn missing_kind_reads_as_empty() {
        let files = FileSet::new().with(FileKind::Cr, vec![row(json!({"contig": "chr1"}))]);
        assert_eq!(files.rows(FileKind::Cr).len(), 1);
        assert!(files.rows(FileKind::Seg).is_empty());
        assert!(!files.contains(FileKind::Dict));
    }

    #[test]
    fn kinds_display_as_upper_case_keys() {
        let names: Vec<String> = FileKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["SEG", "CR", "HETS", "DICT"]);
    }
}
