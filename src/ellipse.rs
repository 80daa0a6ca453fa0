//! Covariance-ellipse geometry: orientation normalization and per-level
//! confidence-region construction.

use crate::types::{ClusterRecord, Color, ConfidenceEllipse, ConfidenceLevel};
use serde::Serialize;

/// Semi-axis magnitudes must be non-negative after normalization; a negative
/// value has no geometric meaning and is rejected rather than clamped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InvalidCovarianceShape {
    pub width: f32,
    pub height: f32,
}

impl std::fmt::Display for InvalidCovarianceShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid covariance shape (width={}, height={}); semi-axes must be non-negative",
            self.width, self.height
        )
    }
}

impl std::error::Error for InvalidCovarianceShape {}

impl ClusterRecord {
    /// Puts the record into canonical orientation.
    ///
    /// The stored angle is only meaningful when `width <= height`; a record
    /// arriving with the pair swapped is exchanged and the angle sign
    /// flipped, otherwise the displayed ellipse would end up rotated by 90°.
    /// Idempotent: a record already satisfying `width <= height` is
    /// unchanged, including the `width == height` circle case.
    pub fn normalized(mut self) -> Self {
        if self.width > self.height {
            std::mem::swap(&mut self.width, &mut self.height);
            self.angle_deg = -self.angle_deg;
        }
        self
    }
}

/// Builds one ellipse per confidence level, in table order, all sharing
/// `fill`.
///
/// The record is normalized first, so callers may pass raw file records.
/// Axis lengths follow `2·sqrt(k·semi_axis)`; a zero-variance axis yields a
/// degenerate line-segment ellipse with no special casing. Choosing `fill`
/// is the caller's job (see [`crate::palette`]).
///
/// Panics if any level's `k` is not a positive finite number; the axis
/// formula has no meaning for such a scale and must not leak NaN axes.
/// [`crate::config`] enforces the same bound at the config boundary.
pub fn build_ellipses(
    record: &ClusterRecord,
    levels: &[ConfidenceLevel],
    fill: &Color,
) -> Result<Vec<ConfidenceEllipse>, InvalidCovarianceShape> {
    for level in levels {
        assert!(
            level.k > 0.0 && level.k.is_finite(),
            "confidence scale k must be a positive finite number, got {}",
            level.k
        );
    }
    let rec = record.normalized();
    if rec.width < 0.0 || rec.height < 0.0 {
        return Err(InvalidCovarianceShape {
            width: rec.width,
            height: rec.height,
        });
    }

    Ok(levels
        .iter()
        .map(|level| ConfidenceEllipse {
            center: rec.center,
            axis_major: 2.0 * (level.k * rec.height).sqrt(),
            axis_minor: 2.0 * (level.k * rec.width).sqrt(),
            rotation_deg: -rec.angle_deg,
            alpha: level.alpha,
            fill: fill.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::reference_levels;
    use nalgebra::Point2;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn record(width: f32, height: f32, angle_deg: f32) -> ClusterRecord {
        ClusterRecord {
            center: Point2::new(0.0, 0.0),
            width,
            height,
            angle_deg,
        }
    }

    #[test]
    fn normalization_swaps_and_negates() {
        let n = record(8.0, 2.0, 30.0).normalized();
        assert_eq!(n.width, 2.0);
        assert_eq!(n.height, 8.0);
        assert_eq!(n.angle_deg, -30.0);
    }

    #[test]
    fn normalization_keeps_ordered_records() {
        let r = record(2.0, 8.0, 30.0);
        assert_eq!(r.normalized(), r);
        // circle boundary: no swap, angle untouched
        let c = record(3.0, 3.0, 45.0);
        assert_eq!(c.normalized(), c);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = record(8.0, 2.0, 30.0).normalized();
        assert_eq!(once.normalized(), once);
    }

    #[test]
    fn normalized_width_never_exceeds_height() {
        for (w, h) in [(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (5.0, 5.0)] {
            let n = record(w, h, 10.0).normalized();
            assert!(n.width <= n.height);
        }
    }

    #[test]
    fn scaling_follows_chi_square_quantile() {
        let levels = [ConfidenceLevel { k: 1.388, alpha: 0.8 }];
        let out = build_ellipses(&record(2.0, 8.0, 0.0), &levels, &Color::from("gold")).unwrap();
        assert_eq!(out.len(), 1);
        assert!(approx_eq(out[0].axis_minor, 2.0 * (1.388f32 * 2.0).sqrt()));
        assert!(approx_eq(out[0].axis_major, 2.0 * (1.388f32 * 8.0).sqrt()));
    }

    #[test]
    fn zero_variance_axis_is_legal() {
        let levels = [ConfidenceLevel { k: 4.605, alpha: 0.4 }];
        let out = build_ellipses(&record(0.0, 5.0, 0.0), &levels, &Color::from("peru")).unwrap();
        assert_eq!(out[0].axis_minor, 0.0);
        assert!(approx_eq(out[0].axis_major, 2.0 * (4.605f32 * 5.0).sqrt()));
    }

    #[test]
    fn negative_shape_is_rejected_not_nan() {
        let levels = reference_levels();
        let fill = Color::from("gold");
        let err = build_ellipses(&record(-1.0, 5.0, 0.0), &levels, &fill).unwrap_err();
        assert_eq!(err, InvalidCovarianceShape { width: -1.0, height: 5.0 });
        // negative value hidden behind the swap is caught too
        assert!(build_ellipses(&record(5.0, -1.0, 0.0), &levels, &fill).is_err());
    }

    #[test]
    #[should_panic(expected = "positive finite")]
    fn non_positive_scale_is_refused_not_nan() {
        let levels = [ConfidenceLevel { k: -1.388, alpha: 0.8 }];
        let _ = build_ellipses(&record(2.0, 8.0, 0.0), &levels, &Color::from("gold"));
    }

    #[test]
    fn levels_are_emitted_in_table_order() {
        let out = build_ellipses(
            &record(1.0, 2.0, 15.0),
            &reference_levels(),
            &Color::from("lightblue"),
        )
        .unwrap();
        let alphas: Vec<f32> = out.iter().map(|e| e.alpha).collect();
        assert_eq!(alphas, vec![0.8, 0.4, 0.1]);
        assert!(out.windows(2).all(|w| w[0].axis_major < w[1].axis_major));
    }

    #[test]
    fn reference_scenario() {
        let rec = crate::record::parse_cluster(1, "0.5 0.5 0.01 0.02 30").unwrap();
        let out = build_ellipses(
            &rec,
            &[ConfidenceLevel { k: 1.388, alpha: 0.8 }],
            &Color::from("blue"),
        )
        .unwrap();
        let e = &out[0];
        assert_eq!(e.center, Point2::new(0.5, 0.5));
        assert!(approx_eq(e.axis_minor, 0.2356));
        assert!(approx_eq(e.axis_major, 0.3332));
        assert_eq!(e.rotation_deg, -30.0);
        assert_eq!(e.alpha, 0.8);
        assert_eq!(e.fill, Color::from("blue"));
    }
}
