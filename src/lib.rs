#![doc = include_str!("../README.md")]

pub mod config;
pub mod ellipse;
pub mod io;
pub mod palette;
pub mod record;
pub mod scene;
pub mod types;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + results.
pub use crate::scene::{build_scene, emit_cluster, EllipseSink, RecordFailure, Scene};

// Geometry core.
pub use crate::ellipse::{build_ellipses, InvalidCovarianceShape};

// Line parsers and their error.
pub use crate::record::{parse_cluster, parse_point, MalformedRecord};

// Value types.
pub use crate::types::{
    reference_levels, ClusterRecord, Color, ConfidenceEllipse, ConfidenceLevel, DataPoint,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use em_overlay::prelude::*;
///
/// let record = parse_cluster(1, "0.5 0.5 0.01 0.02 30")?;
/// let ellipses = build_ellipses(&record, &reference_levels(), &Color::from("blue"))?;
///
/// assert_eq!(ellipses.len(), 3);
/// assert_eq!(ellipses[0].rotation_deg, -30.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod prelude {
    pub use crate::palette::{ColorPicker, CyclingPicker, SeededPicker};
    pub use crate::{
        build_ellipses, build_scene, parse_cluster, parse_point, reference_levels, ClusterRecord,
        Color, ConfidenceEllipse, ConfidenceLevel, Scene,
    };
}
