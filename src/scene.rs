//! Scene assembly: drives Parser → Normalize → Build per record and pushes
//! the results into an explicit output channel.
//!
//! The pipeline is single-threaded and deterministic. A failure in one
//! record never aborts the run: failures are collected on the scene and
//! logged, and every other record still renders.

use crate::ellipse::{build_ellipses, InvalidCovarianceShape};
use crate::palette::ColorPicker;
use crate::record::{parse_cluster, parse_point, MalformedRecord};
use crate::types::{ClusterRecord, Color, ConfidenceEllipse, ConfidenceLevel, DataPoint};
use log::{debug, warn};
use serde::Serialize;

/// Receives ellipses as they are built.
///
/// Within one cluster the emission order follows the confidence-level table
/// (innermost ring first in the reference table); layering is the renderer's
/// concern.
pub trait EllipseSink {
    fn push(&mut self, ellipse: ConfidenceEllipse);
}

impl EllipseSink for Vec<ConfidenceEllipse> {
    fn push(&mut self, ellipse: ConfidenceEllipse) {
        Vec::push(self, ellipse);
    }
}

/// A record that failed somewhere in the per-record pipeline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum RecordFailure {
    PointParse(MalformedRecord),
    ClusterParse(MalformedRecord),
    Shape {
        line_no: usize,
        content: String,
        error: InvalidCovarianceShape,
    },
}

impl std::fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFailure::PointParse(err) => write!(f, "point file: {err}"),
            RecordFailure::ClusterParse(err) => write!(f, "cluster file: {err}"),
            RecordFailure::Shape {
                line_no,
                content,
                error,
            } => write!(f, "cluster file: line {line_no} ({content:?}): {error}"),
        }
    }
}

impl std::error::Error for RecordFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordFailure::PointParse(err) | RecordFailure::ClusterParse(err) => Some(err),
            RecordFailure::Shape { error, .. } => Some(error),
        }
    }
}

/// Marker style used for raw data points when none is configured; the
/// reference visualisation draws green crosses.
pub const DEFAULT_POINT_MARKER: &str = "gx";

/// Everything an external renderer needs for one frame.
#[derive(Clone, Debug, Serialize)]
pub struct Scene {
    pub points: Vec<DataPoint>,
    /// Marker hint for drawing the raw points, pass-through config.
    pub marker: String,
    pub ellipses: Vec<ConfidenceEllipse>,
    /// Plot bounds as `[xmin, xmax, ymin, ymax]`, pass-through config.
    pub axis: Option<[f32; 4]>,
    pub clusters_drawn: usize,
    pub failures: Vec<RecordFailure>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            marker: DEFAULT_POINT_MARKER.to_string(),
            ellipses: Vec::new(),
            axis: None,
            clusters_drawn: 0,
            failures: Vec::new(),
        }
    }
}

/// Builds the ellipse set for one record and pushes it into `sink`.
///
/// Returns the number of ellipses emitted (the level-table length).
pub fn emit_cluster<S: EllipseSink>(
    record: &ClusterRecord,
    levels: &[ConfidenceLevel],
    fill: &Color,
    sink: &mut S,
) -> Result<usize, InvalidCovarianceShape> {
    let ellipses = build_ellipses(record, levels, fill)?;
    let count = ellipses.len();
    for ellipse in ellipses {
        sink.push(ellipse);
    }
    Ok(count)
}

/// Runs the full pipeline over raw text lines.
///
/// Blank lines are skipped; line numbers are 1-based over the raw input.
/// The fill color is chosen once per parsed cluster, keeping assignment
/// stable regardless of later shape failures.
pub fn build_scene<'a, P, C>(
    point_lines: P,
    cluster_lines: C,
    levels: &[ConfidenceLevel],
    picker: &mut dyn ColorPicker,
) -> Scene
where
    P: IntoIterator<Item = &'a str>,
    C: IntoIterator<Item = &'a str>,
{
    let mut scene = Scene::default();

    for (idx, line) in point_lines.into_iter().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        match parse_point(line_no, line) {
            Ok(point) => scene.points.push(point),
            Err(err) => {
                warn!("skipping point {err}");
                scene.failures.push(RecordFailure::PointParse(err));
            }
        }
    }

    let mut cluster_ordinal = 0usize;
    for (idx, line) in cluster_lines.into_iter().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let record = match parse_cluster(line_no, line) {
            Ok(record) => record,
            Err(err) => {
                warn!("skipping cluster {err}");
                scene.failures.push(RecordFailure::ClusterParse(err));
                continue;
            }
        };

        let fill = picker.pick(cluster_ordinal);
        cluster_ordinal += 1;

        match emit_cluster(&record, levels, &fill, &mut scene.ellipses) {
            Ok(count) => {
                scene.clusters_drawn += 1;
                debug!("cluster line {line_no}: emitted {count} ellipses, fill={fill}");
            }
            Err(error) => {
                warn!("skipping cluster line {line_no}: {error}");
                scene.failures.push(RecordFailure::Shape {
                    line_no,
                    content: line.to_string(),
                    error,
                });
            }
        }
    }

    scene
}
