//! Row filtering by genome-build contig naming.
//!
//! For human builds (`hg19`, `hg38`, ...) only the primary assembly is kept:
//! autosomes 1-22 and X/Y, with or without the `chr` prefix.
//!
//! Rows are expected grouped by contig. The filter carries the previous
//! contig and its verdict and only runs the regex when the contig changes.

use crate::files::{FileKind, FileSet, Row};
use regex::Regex;
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::sync::LazyLock;

static HUMAN_BUILD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^hg[0-9]+").unwrap());

static PRIMARY_CONTIG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(chr)?([0-9]{1,2}|[XY])$").unwrap());

/// True if `genome_name` names a human build whose non-primary contigs are dropped.
pub fn is_human_build(genome_name: Option<&str>) -> bool {
    genome_name.is_some_and(|name| HUMAN_BUILD_RE.is_match(name))
}

/// True for `chr1`..`chr22`, `chrX`, `chrY` and their unprefixed forms.
pub fn is_primary_contig(contig: &str) -> bool {
    PRIMARY_CONTIG_RE.is_match(contig)
}

/// Contig text of a row. Numbers are tested by their decimal text.
fn contig_of(row: &Row) -> Option<Cow<'_, str>> {
    match row.get("contig")? {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        _ => None,
    }
}

/// Integral floats print without a fraction (`1.0` -> `"1"`), as in JavaScript.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Keep rows on primary contigs.
pub fn filter_contigs(rows: &[Row]) -> Vec<Row> {
    let mut prev: Option<(Cow<'_, str>, bool)> = None;
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        let keep = match contig_of(row) {
            None => false,
            Some(contig) => {
                let cached = prev
                    .as_ref()
                    .filter(|(prev_contig, _)| *prev_contig == contig)
                    .map(|(_, verdict)| *verdict);
                match cached {
                    Some(verdict) => verdict,
                    None => {
                        let verdict = is_primary_contig(&contig);
                        prev = Some((contig, verdict));
                        verdict
                    }
                }
            }
        };
        if keep {
            out.push(row.clone());
        }
    }

    out
}

/// Rows of `kind`, filtered to primary contigs when `genome_name` is a human build.
pub fn get_data(files: &FileSet, kind: FileKind, genome_name: Option<&str>) -> Vec<Row> {
    let rows = files.rows(kind);
    if !is_human_build(genome_name) {
        return rows.to_vec();
    }

    let kept = filter_contigs(rows);
    log::debug!(
        "{}: kept {} of {} rows on primary contigs",
        kind,
        kept.len(),
        rows.len()
    );
    kept
}
