//! Error types for the Strand planner.
//!
//! Every error here is a local, caller-correctable fault raised
//! synchronously by the offending call, before any state is mutated.
//! Numeric faults during relaxation (non-finite forces, out-of-bounds
//! lookups) are absorbed internally and never appear here.

use std::error::Error;
use std::fmt;

use crate::mode::PlanPhase;

/// Invalid geometry or tuning configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid resolution must be finite and strictly positive.
    InvalidResolution {
        /// The rejected resolution.
        value: f64,
    },
    /// Grid origin must be finite.
    InvalidOrigin {
        /// Rejected origin x.
        x: f64,
        /// Rejected origin y.
        y: f64,
    },
    /// `width * height` does not fit in `usize`.
    GridTooLarge {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
    },
    /// A cost buffer's length does not match the configured cell count.
    CostBufferSize {
        /// `width * height` of the configured geometry.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// An operation needs grid geometry but `configure` was never called.
    Unconfigured,
    /// A tuning parameter is out of range.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
    /// The realtime planning rate must be finite and positive.
    InvalidPlanRate {
        /// The rejected rate in Hz.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution { value } => {
                write!(f, "grid resolution must be finite and > 0, got {value}")
            }
            Self::InvalidOrigin { x, y } => {
                write!(f, "grid origin must be finite, got ({x}, {y})")
            }
            Self::GridTooLarge { width, height } => {
                write!(f, "grid {width}x{height} exceeds addressable cell count")
            }
            Self::CostBufferSize { expected, actual } => write!(
                f,
                "cost buffer holds {actual} cells, configured grid needs {expected}"
            ),
            Self::Unconfigured => write!(f, "grid geometry has not been configured"),
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
            Self::InvalidPlanRate { value } => {
                write!(f, "plan rate must be finite and > 0, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors raised by planner operations.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanError {
    /// Geometry or tuning configuration was rejected.
    Config(ConfigError),
    /// The reference path has fewer than two points.
    EmptyPath {
        /// Number of points supplied.
        points: usize,
    },
    /// A reference path point has a non-finite coordinate.
    NonFinitePoint {
        /// Index of the offending point.
        index: usize,
    },
    /// Resampling the reference path would exceed the node limit.
    PathTooLong {
        /// Polyline length of the reference path, in world units.
        length: f64,
        /// Requested node spacing, in world units.
        spacing: f64,
        /// Largest chain the planner accepts.
        max_nodes: usize,
    },
    /// The operation was called out of sequence.
    NotPrepared {
        /// The rejected operation.
        operation: &'static str,
        /// Phase the planner was in.
        phase: PlanPhase,
    },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::EmptyPath { points } => write!(
                f,
                "reference path needs at least 2 points, got {points}"
            ),
            Self::NonFinitePoint { index } => {
                write!(f, "reference path point {index} is not finite")
            }
            Self::PathTooLong {
                length,
                spacing,
                max_nodes,
            } => write!(
                f,
                "reference path of length {length} at spacing {spacing} needs more than {max_nodes} nodes"
            ),
            Self::NotPrepared { operation, phase } => {
                write!(f, "'{operation}' is not allowed in phase {phase}")
            }
        }
    }
}

impl Error for PlanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for PlanError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_and_chains() {
        let err: PlanError = ConfigError::Unconfigured.into();
        assert_eq!(err, PlanError::Config(ConfigError::Unconfigured));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("grid geometry has not been configured"));
    }

    #[test]
    fn not_prepared_names_operation_and_phase() {
        let err = PlanError::NotPrepared {
            operation: "iterate",
            phase: PlanPhase::Unprepared,
        };
        assert_eq!(err.to_string(), "'iterate' is not allowed in phase unprepared");
        assert!(err.source().is_none());
    }

    #[test]
    fn path_too_long_reports_limit() {
        let msg = PlanError::PathTooLong {
            length: 1e300,
            spacing: 0.5,
            max_nodes: 65_536,
        }
        .to_string();
        assert!(msg.contains("65536"));
        assert!(msg.contains("0.5"));
    }

    #[test]
    fn buffer_size_message_reports_both_lengths() {
        let msg = ConfigError::CostBufferSize {
            expected: 100,
            actual: 99,
        }
        .to_string();
        assert!(msg.contains("99"));
        assert!(msg.contains("100"));
    }
}
