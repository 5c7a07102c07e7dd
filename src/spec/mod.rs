//! Spec layer: typed GenomeSpy spec tree and its builders.
//!
//! This module is intentionally separate from file loading and rendering.
//! It owns:
//! - the spec model (serde-serializable, schema key names)
//! - contig filtering for human builds
//! - layer builders and the full assembler

pub mod assemble;
pub mod contig;
pub mod layers;
pub mod model;

pub use assemble::create_spec;
pub use contig::{filter_contigs, get_data};
pub use layers::{CredibleInterval, credible_interval_layer, geometric_zoom_bound};
pub use model::{Genome, Spec, View};
