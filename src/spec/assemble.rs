//! Assembly of the full viewer spec: genome, shared encoding and the track list.

use crate::files::{FileKind, FileSet, Row};
use crate::spec::contig::get_data;
use crate::spec::layers::{CredibleInterval, chrom_grid, colors, credible_interval_layer, geometric_zoom_bound};
use crate::spec::model::{
    ChannelDef, Data, Encoding, FieldType, Genome, Mark, MarkDef, MarkType, Scale, Spec, Transform, View,
    ViewSpec,
};

const GC_CONTENT_URL_PREFIX: &str = "https://genomespy.app/tracks/gc-content/gc-content.";

const LOG2_CR_FIELDS: [&str; 3] = [
    "LOG2_COPY_RATIO_POSTERIOR_10",
    "LOG2_COPY_RATIO_POSTERIOR_50",
    "LOG2_COPY_RATIO_POSTERIOR_90",
];

const MAF_FIELDS: [&str; 3] = [
    "MINOR_ALLELE_FRACTION_POSTERIOR_10",
    "MINOR_ALLELE_FRACTION_POSTERIOR_50",
    "MINOR_ALLELE_FRACTION_POSTERIOR_90",
];

const ALT_FRACTION_TITLE: &str = "Alternate-allele fraction";

/// Build the viewer spec for the uploaded files.
///
/// With a genome name the built-in assembly is used and the cytoband, GC-content
/// and gene annotation tracks are added. Without one, the assembly comes from
/// the sequence dictionary.
pub fn create_spec(files: &FileSet, genome_name: Option<&str>) -> Spec {
    let genome_name = genome_name.filter(|name| !name.is_empty());

    let segments = get_data(files, FileKind::Seg, genome_name);
    let cr = get_data(files, FileKind::Cr, genome_name);
    let hets = get_data(files, FileKind::Hets, genome_name);

    log::debug!(
        "assembling spec: {} segments, {} copy-ratio points, {} het sites, genome {:?}",
        segments.len(),
        cr.len(),
        hets.len(),
        genome_name
    );

    let mut concat: Vec<View> = Vec::new();
    if let Some(name) = genome_name {
        concat.push(View::import_named("cytobands"));
        concat.push(View::import_url(format!("{}{}.json", GC_CONTENT_URL_PREFIX, name)));
    }
    concat.push(log_r_track(cr));
    concat.push(baf_track(hets));
    concat.push(View::import_named("genomeAxis"));
    if genome_name.is_some() {
        concat.push(View::import_named("geneAnnotation"));
    }

    Spec {
        genome: genome(files, genome_name),
        data: Data::values(segments),
        encoding: Encoding {
            x: Some(
                ChannelDef::locus("contig", "start")
                    .with_type(FieldType::Quantitative)
                    .with_offset(-1.0),
            ),
            x2: Some(ChannelDef::locus("contig", "end")),
            ..Default::default()
        },
        concat,
    }
}

fn genome(files: &FileSet, genome_name: Option<&str>) -> Genome {
    match genome_name {
        Some(name) => Genome::Named {
            name: name.to_string(),
        },
        None => {
            if !files.contains(FileKind::Dict) {
                log::warn!("no genome name and no {} file, the genome has no contigs", FileKind::Dict);
            }
            Genome::Contigs {
                contigs: files.rows(FileKind::Dict).to_vec(),
            }
        }
    }
}

/// Point layer shared by both tracks; only the data, field and a few constants differ.
fn point_layer(title: &str, values: Vec<Row>, x: ChannelDef, y: ChannelDef, opacity: f64) -> ViewSpec {
    let mut mark = MarkDef::new(MarkType::Point);
    mark.geometric_zoom_bound = Some(geometric_zoom_bound(values.len()));

    ViewSpec {
        data: Some(Data::values(values)),
        title: Some(title.to_string()),
        mark: Some(Mark::Def(mark)),
        encoding: Some(Encoding {
            x: Some(x),
            y: Some(y),
            color: Some(ChannelDef::value(colors::POINT)),
            size: Some(ChannelDef::value(150)),
            opacity: Some(ChannelDef::value(opacity)),
            stroke_width: Some(ChannelDef::value(0)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn log_r_track(cr: Vec<Row>) -> View {
    // Zoom bound uses the unfiltered count; the filter runs in the renderer.
    let points = ViewSpec {
        transform: Some(vec![Transform::filter("!isNaN(datum.logR) && datum.logR > -3")]),
        ..point_layer(
            "Single interval midpoint",
            cr,
            ChannelDef::locus("contig", "pos").with_type(FieldType::Quantitative),
            ChannelDef::quantitative("logR")
                .with_title(None)
                .with_scale(Scale::default()),
            0.25,
        )
    };

    let [lower, middle, upper] = LOG2_CR_FIELDS;
    let denoised = ViewSpec {
        title: Some("Denoised copy-ratio".to_string()),
        transform: Some(vec![Transform::filter("datum.LOG2_COPY_RATIO_POSTERIOR_50 > -3")]),
        layer: Some(credible_interval_layer(
            middle,
            CredibleInterval {
                lower: Some(lower),
                upper: Some(upper),
                title: Some("Log2 copy ratio"),
                domain: None,
            },
        )),
        ..Default::default()
    };

    ViewSpec {
        name: Some("logRTrack".to_string()),
        plot_background: Some(colors::BACKGROUND.to_string()),
        layer: Some(vec![chrom_grid(), points.into(), denoised.into()]),
        ..Default::default()
    }
    .into()
}

fn baf_track(hets: Vec<Row>) -> View {
    let points = point_layer(
        "B allele frequency",
        hets,
        ChannelDef::locus("contig", "pos")
            .with_offset(-0.5)
            .with_type(FieldType::Quantitative),
        ChannelDef::quantitative("baf").with_title(None),
        0.3,
    );

    let [lower, middle, upper] = MAF_FIELDS;

    let minor = ViewSpec {
        layer: Some(credible_interval_layer(
            middle,
            CredibleInterval {
                lower: Some(lower),
                upper: Some(upper),
                title: Some(ALT_FRACTION_TITLE),
                domain: Some([0.0, 1.0]),
            },
        )),
        ..Default::default()
    };

    // Mirror the minor-allele fraction so both alleles are shown.
    let mirrored = ViewSpec {
        transform: Some(
            MAF_FIELDS
                .iter()
                .map(|field| Transform::formula(format!("1 - datum.{}", field), field))
                .collect(),
        ),
        layer: Some(credible_interval_layer(
            middle,
            CredibleInterval {
                lower: Some(lower),
                upper: Some(upper),
                title: None,
                domain: None,
            },
        )),
        ..Default::default()
    };

    let fraction = ViewSpec {
        title: Some(ALT_FRACTION_TITLE.to_string()),
        layer: Some(vec![minor.into(), mirrored.into()]),
        ..Default::default()
    };

    ViewSpec {
        name: Some("bafTrack".to_string()),
        plot_background: Some(colors::BACKGROUND.to_string()),
        layer: Some(vec![chrom_grid(), points.into(), fraction.into()]),
        ..Default::default()
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn row(v: Value) -> Row {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    fn to_json(spec: &Spec) -> Value {
        serde_json::to_value(spec).unwrap()
    }

    #[test]
    fn empty_genome_name_counts_as_absent() {
        let files = FileSet::new();
        assert_eq!(create_spec(&files, Some("")), create_spec(&files, None));
    }

    #[test]
    fn genome_from_dictionary_without_name() {
        let dict = vec![row(json!({"name": "chr1", "size": 1000}))];
        let files = FileSet::new().with(FileKind::Dict, dict.clone());

        assert_eq!(create_spec(&files, None).genome, Genome::Contigs { contigs: dict });
        assert_eq!(
            create_spec(&files, Some("hg19")).genome,
            Genome::Named {
                name: "hg19".to_string()
            }
        );
    }

    #[test]
    fn missing_dictionary_gives_empty_contigs() {
        let spec = to_json(&create_spec(&FileSet::new(), None));
        assert_eq!(spec["genome"], json!({"contigs": []}));
    }

    #[test]
    fn top_level_encoding() {
        let spec = to_json(&create_spec(&FileSet::new(), None));
        assert_eq!(
            spec["encoding"],
            json!({
                "x": {"chrom": "contig", "pos": "start", "type": "quantitative", "offset": -1.0},
                "x2": {"chrom": "contig", "pos": "end"}
            })
        );
    }

    #[test]
    fn zoom_bound_uses_unfiltered_count() {
        let cr: Vec<Row> = (0..1036)
            .map(|i| row(json!({"contig": "chr1", "pos": i, "logR": -5.0})))
            .collect();
        let spec = to_json(&create_spec(&FileSet::new().with(FileKind::Cr, cr), None));

        let bound = spec["concat"][0]["layer"][1]["mark"]["geometricZoomBound"]
            .as_f64()
            .unwrap();
        assert!((bound - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mirrored_layer_transforms_every_percentile() {
        let spec = to_json(&create_spec(&FileSet::new(), None));
        let fraction = &spec["concat"][1]["layer"][2];

        assert_eq!(fraction["title"], json!("Alternate-allele fraction"));
        assert_eq!(
            fraction["layer"][1]["transform"],
            json!([
                {"type": "formula", "expr": "1 - datum.MINOR_ALLELE_FRACTION_POSTERIOR_10", "as": "MINOR_ALLELE_FRACTION_POSTERIOR_10"},
                {"type": "formula", "expr": "1 - datum.MINOR_ALLELE_FRACTION_POSTERIOR_50", "as": "MINOR_ALLELE_FRACTION_POSTERIOR_50"},
                {"type": "formula", "expr": "1 - datum.MINOR_ALLELE_FRACTION_POSTERIOR_90", "as": "MINOR_ALLELE_FRACTION_POSTERIOR_90"}
            ])
        );
        assert_eq!(
            fraction["layer"][0]["layer"][1]["encoding"]["y"],
            json!({
                "field": "MINOR_ALLELE_FRACTION_POSTERIOR_50",
                "type": "quantitative",
                "scale": {"domain": [0.0, 1.0]},
                "title": "Alternate-allele fraction"
            })
        );
        assert_eq!(
            fraction["layer"][1]["layer"][1]["encoding"]["y"],
            json!({
                "field": "MINOR_ALLELE_FRACTION_POSTERIOR_50",
                "type": "quantitative",
                "scale": {},
                "title": null
            })
        );
    }
}
