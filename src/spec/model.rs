//! Typed GenomeSpy spec tree.
//!
//! Field names follow the GenomeSpy schema verbatim; serde renames handle the
//! camelCase keys. `None` fields are left out of the output.

use crate::files::Row;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spec {
    pub genome: Genome,
    pub data: Data,
    pub encoding: Encoding,
    pub concat: Vec<View>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Genome {
    /// Built-in assembly, e.g. `{"name": "hg38"}`.
    Named { name: String },
    /// Custom assembly from a sequence dictionary.
    Contigs { contigs: Vec<Row> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Data {
    Values { values: Vec<Row> },
    Named { name: String },
}

impl Data {
    pub fn values(values: Vec<Row>) -> Self {
        Data::Values { values }
    }

    pub fn named(name: &str) -> Self {
        Data::Named {
            name: name.to_string(),
        }
    }
}

/// A view: either a layer/unit view or an import of a predefined track.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum View {
    Import { import: Import },
    Spec(Box<ViewSpec>),
}

impl View {
    pub fn import_named(name: &str) -> Self {
        View::Import {
            import: Import::Name {
                name: name.to_string(),
            },
        }
    }

    pub fn import_url(url: String) -> Self {
        View::Import {
            import: Import::Url { url },
        }
    }
}

impl From<ViewSpec> for View {
    fn from(spec: ViewSpec) -> Self {
        View::Spec(Box::new(spec))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Import {
    Name { name: String },
    Url { url: String },
}

/// Unit or layer view. A view with `layer` set composes its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_background: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Vec<Transform>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Mark>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<Vec<View>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkType {
    Point,
    Rect,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Mark {
    /// Shorthand: `"mark": "rule"`.
    Type(MarkType),
    Def(MarkDef),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkDef {
    #[serde(rename = "type")]
    pub mark_type: MarkType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_opacity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometric_zoom_bound: Option<f64>,
}

impl MarkDef {
    pub fn new(mark_type: MarkType) -> Self {
        Self {
            mark_type,
            size: None,
            min_width: None,
            min_opacity: None,
            min_length: None,
            geometric_zoom_bound: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<ChannelDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<ChannelDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<ChannelDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<ChannelDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ChannelDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<ChannelDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<ChannelDef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<ChannelDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Quantitative,
}

/// Channel definition. Covers field, locus (`chrom` + `pos`) and constant value channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrom: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,

    /// `Some(None)` is written as an explicit `null` (axis title suppressed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ChannelDef {
    pub fn field(field: &str) -> Self {
        Self {
            field: Some(field.to_string()),
            ..Default::default()
        }
    }

    pub fn quantitative(field: &str) -> Self {
        Self {
            field_type: Some(FieldType::Quantitative),
            ..Self::field(field)
        }
    }

    /// Genomic locus channel: `{chrom, pos}`.
    pub fn locus(chrom: &str, pos: &str) -> Self {
        Self {
            chrom: Some(chrom.to_string()),
            pos: Some(pos.to_string()),
            ..Default::default()
        }
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = Some(title.map(str::to_string));
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transform {
    Filter {
        expr: String,
    },
    Formula {
        expr: String,
        #[serde(rename = "as")]
        as_field: String,
    },
}

impl Transform {
    pub fn filter(expr: &str) -> Self {
        Transform::Filter {
            expr: expr.to_string(),
        }
    }

    pub fn formula(expr: String, as_field: &str) -> Self {
        Transform::Formula {
            expr,
            as_field: as_field.to_string(),
        }
    }
}
