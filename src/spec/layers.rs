//! Reusable layer builders and the point-density heuristic.

use crate::spec::model::{ChannelDef, Data, Encoding, FieldType, Mark, MarkDef, MarkType, Scale, View, ViewSpec};

pub mod colors {
    pub const INTERVAL: &str = "#f70";
    pub const RULE: &str = "black";
    pub const POINT: &str = "#49A0F2";
    pub const BACKGROUND: &str = "#f7f7f7";
    pub const GRID: &str = "#d8d8d8";
}

/// Field names and axis settings for one credible interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredibleInterval<'a> {
    pub lower: Option<&'a str>,
    pub upper: Option<&'a str>,
    pub title: Option<&'a str>,
    pub domain: Option<[f64; 2]>,
}

/// Band over `[lower, upper]` (when both are set) followed by a rule at `middle`.
///
/// The band comes first so the rule is drawn on top of it.
pub fn credible_interval_layer(middle: &str, ci: CredibleInterval<'_>) -> Vec<View> {
    let mut layer = Vec::with_capacity(2);

    if let (Some(lower), Some(upper)) = (ci.lower, ci.upper) {
        let mut mark = MarkDef::new(MarkType::Rect);
        mark.min_width = Some(2.0);
        mark.min_opacity = Some(1.0);

        layer.push(
            ViewSpec {
                mark: Some(Mark::Def(mark)),
                encoding: Some(Encoding {
                    y: Some(ChannelDef::quantitative(lower).with_title(None)),
                    y2: Some(ChannelDef::field(upper)),
                    color: Some(ChannelDef::value(colors::INTERVAL)),
                    opacity: Some(ChannelDef::value(0.3)),
                    ..Default::default()
                }),
                ..Default::default()
            }
            .into(),
        );
    }

    let mut mark = MarkDef::new(MarkType::Rule);
    mark.size = Some(3.0);
    mark.min_length = Some(3.0);

    layer.push(
        ViewSpec {
            mark: Some(Mark::Def(mark)),
            encoding: Some(Encoding {
                y: Some(
                    ChannelDef::quantitative(middle)
                        .with_scale(Scale { domain: ci.domain })
                        .with_title(ci.title),
                ),
                color: Some(ChannelDef::value(colors::RULE)),
                ..Default::default()
            }),
            ..Default::default()
        }
        .into(),
    );

    layer
}

/// Zoom level at which individual points of a `count`-sized track start rendering.
pub fn geometric_zoom_bound(count: usize) -> f64 {
    // TODO: move into GenomeSpy as an "auto" zoom bound; small counts are handled crudely.
    let bound = ((count as f64 - 1000.0) / 4.0).ln() / 3f64.ln();
    if bound.is_finite() && bound > 0.0 {
        bound
    } else {
        0.0
    }
}

/// Chromosome boundary rules drawn behind every track.
pub fn chrom_grid() -> View {
    ViewSpec {
        name: Some("chromGrid".to_string()),
        mark: Some(Mark::Type(MarkType::Rule)),
        data: Some(Data::named("chromSizes")),
        encoding: Some(Encoding {
            x: Some(ChannelDef::locus("name", "size").with_type(FieldType::Quantitative)),
            color: Some(ChannelDef::value(colors::GRID)),
            ..Default::default()
        }),
        ..Default::default()
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn zoom_bound_is_zero_up_to_a_thousand() {
        for n in [0, 1, 500, 999, 1000, 1001, 1004] {
            assert_eq!(geometric_zoom_bound(n), 0.0, "n = {n}");
        }
    }

    #[test]
    fn zoom_bound_formula() {
        // (1000 + 4 * 3^k) points gives exactly k
        assert!((geometric_zoom_bound(1000 + 4 * 9) - 2.0).abs() < 1e-12);
        assert!((geometric_zoom_bound(1000 + 4 * 729) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn zoom_bound_is_finite_and_non_decreasing() {
        let mut prev = 0.0;
        for n in (0..200_000).step_by(37) {
            let b = geometric_zoom_bound(n);
            assert!(b.is_finite() && b >= 0.0);
            assert!(b >= prev, "n = {n}");
            prev = b;
        }
    }

    #[test]
    fn middle_only_without_bounds() {
        let layer = credible_interval_layer("M", CredibleInterval::default());
        assert_eq!(
            serde_json::to_value(&layer).unwrap(),
            json!([{
                "mark": {"type": "rule", "size": 3.0, "minLength": 3.0},
                "encoding": {
                    "y": {"field": "M", "type": "quantitative", "scale": {}, "title": null},
                    "color": {"value": "black"}
                }
            }])
        );
    }

    #[test]
    fn single_bound_gives_no_band() {
        let ci = CredibleInterval {
            lower: Some("L"),
            ..Default::default()
        };
        assert_eq!(credible_interval_layer("M", ci).len(), 1);
    }

    #[test]
    fn band_precedes_middle() {
        let ci = CredibleInterval {
            lower: Some("L"),
            upper: Some("U"),
            title: Some("Fraction"),
            domain: Some([0.0, 1.0]),
        };
        assert_eq!(
            serde_json::to_value(credible_interval_layer("M", ci)).unwrap(),
            json!([
                {
                    "mark": {"type": "rect", "minWidth": 2.0, "minOpacity": 1.0},
                    "encoding": {
                        "y": {"field": "L", "type": "quantitative", "title": null},
                        "y2": {"field": "U"},
                        "color": {"value": "#f70"},
                        "opacity": {"value": 0.3}
                    }
                },
                {
                    "mark": {"type": "rule", "size": 3.0, "minLength": 3.0},
                    "encoding": {
                        "y": {
                            "field": "M",
                            "type": "quantitative",
                            "scale": {"domain": [0.0, 1.0]},
                            "title": "Fraction"
                        },
                        "color": {"value": "black"}
                    }
                }
            ])
        );
    }

    #[test]
    fn chrom_grid_shape() {
        assert_eq!(
            serde_json::to_value(chrom_grid()).unwrap(),
            json!({
                "name": "chromGrid",
                "mark": "rule",
                "data": {"name": "chromSizes"},
                "encoding": {
                    "x": {"chrom": "name", "pos": "size", "type": "quantitative"},
                    "color": {"value": "#d8d8d8"}
                }
            })
        );
    }
}
