use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Raw 2-D observation, passed through to the renderer unchanged.
pub type DataPoint = Point2<f32>;

/// Color identifier understood by the downstream renderer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the cluster result file: centroid plus raw covariance-derived
/// shape parameters, prior to orientation normalization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub center: Point2<f32>,
    pub width: f32,
    pub height: f32,
    /// Orientation in degrees as stored in the file; the rendering
    /// convention negates it.
    pub angle_deg: f32,
}

/// One ring of the confidence overlay: a chi-square critical value `k`
/// (2 degrees of freedom) and the opacity used for that ring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceLevel {
    pub k: f32,
    pub alpha: f32,
}

/// Reference level table: 25%, 90% and 99% two-dimensional chi-square
/// confidence regions, innermost first. Inner rings are drawn more opaque.
pub fn reference_levels() -> [ConfidenceLevel; 3] {
    [
        ConfidenceLevel { k: 1.388, alpha: 0.8 },
        ConfidenceLevel { k: 4.605, alpha: 0.4 },
        ConfidenceLevel { k: 9.210, alpha: 0.1 },
    ]
}

/// Renderable ellipse for one cluster at one confidence level.
///
/// Axis lengths are full axes (`2·sqrt(k·semi_axis)`), matching the wire
/// convention of common plotting backends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceEllipse {
    pub center: Point2<f32>,
    pub axis_major: f32,
    pub axis_minor: f32,
    pub rotation_deg: f32,
    pub alpha: f32,
    pub fill: Color,
}
