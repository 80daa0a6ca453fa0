//! Parsers for the whitespace-delimited point and cluster input files.
//!
//! Both parsers are pure line → value transforms. Recovery policy for a bad
//! line (skip vs. abort) belongs to the caller; see [`crate::scene`] for the
//! skip-and-report policy used by the overlay pipeline.

use crate::types::{ClusterRecord, DataPoint};
use nalgebra::Point2;
use serde::Serialize;

/// Tokens per cluster line: `x y width height angle`.
pub const CLUSTER_TOKENS: usize = 5;
/// Tokens per point line: `x y`.
pub const POINT_TOKENS: usize = 2;

/// Why a line failed to parse.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum MalformedKind {
    TooFewTokens { found: usize, expected: usize },
    BadToken { index: usize, token: String },
    NonFiniteToken { index: usize, token: String },
}

/// A line that could not be converted into a record.
///
/// Carries the 1-based line number and the raw content for diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MalformedRecord {
    pub line_no: usize,
    pub content: String,
    pub kind: MalformedKind,
}

impl std::fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} ({:?}): ", self.line_no, self.content)?;
        match &self.kind {
            MalformedKind::TooFewTokens { found, expected } => {
                write!(f, "expected {expected} numeric tokens, found {found}")
            }
            MalformedKind::BadToken { index, token } => {
                write!(f, "token {index} ({token:?}) is not a number")
            }
            MalformedKind::NonFiniteToken { index, token } => {
                write!(f, "token {index} ({token:?}) is not finite")
            }
        }
    }
}

impl std::error::Error for MalformedRecord {}

fn parse_tokens(line_no: usize, line: &str, expected: usize) -> Result<Vec<f32>, MalformedRecord> {
    let malformed = |kind| MalformedRecord {
        line_no,
        content: line.to_string(),
        kind,
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < expected {
        return Err(malformed(MalformedKind::TooFewTokens {
            found: tokens.len(),
            expected,
        }));
    }

    // Extra trailing tokens are ignored; the reference files pad with
    // leading whitespace and may carry per-dimension extras.
    let mut values = Vec::with_capacity(expected);
    for (index, token) in tokens.iter().take(expected).enumerate() {
        let value: f32 = token.parse().map_err(|_| {
            malformed(MalformedKind::BadToken {
                index,
                token: token.to_string(),
            })
        })?;
        if !value.is_finite() {
            return Err(malformed(MalformedKind::NonFiniteToken {
                index,
                token: token.to_string(),
            }));
        }
        values.push(value);
    }
    Ok(values)
}

/// Parses one cluster line into `(center, width, height, angle)`.
pub fn parse_cluster(line_no: usize, line: &str) -> Result<ClusterRecord, MalformedRecord> {
    let v = parse_tokens(line_no, line, CLUSTER_TOKENS)?;
    Ok(ClusterRecord {
        center: Point2::new(v[0], v[1]),
        width: v[2],
        height: v[3],
        angle_deg: v[4],
    })
}

/// Parses one data-point line into an `(x, y)` point.
pub fn parse_point(line_no: usize, line: &str) -> Result<DataPoint, MalformedRecord> {
    let v = parse_tokens(line_no, line, POINT_TOKENS)?;
    Ok(Point2::new(v[0], v[1]))
}
