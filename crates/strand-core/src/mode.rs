//! Detour side selection and planner lifecycle phases.

use std::fmt;

/// Which side of an obstacle the refined path should prefer.
///
/// Closed two-variant enumeration: the side is fixed for a planning
/// session and turned into a per-node lateral bias sign when the path
/// graph is prepared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DetourMode {
    /// Deflect toward the left-hand side of the direction of travel.
    Left,
    /// Deflect toward the right-hand side of the direction of travel.
    #[default]
    Right,
}

impl DetourMode {
    /// Lateral bias sign: `+1.0` for [`Right`](Self::Right), `-1.0` for
    /// [`Left`](Self::Left).
    pub fn bias_sign(self) -> f64 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

impl fmt::Display for DetourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Lifecycle phase of the relaxation state machine.
///
/// ```text
/// Unprepared ──prepare──▶ Ready ──iterate──▶ Iterating ──▶ Converged
///                                                 └──────▶ Aborted
/// ```
///
/// Ingesting a new path returns the planner to `Unprepared` from any
/// phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlanPhase {
    /// No prepared path graph. `iterate` is rejected.
    #[default]
    Unprepared,
    /// Path graph built and tagged; no relaxation step taken yet.
    Ready,
    /// At least one relaxation step taken, not yet terminal.
    Iterating,
    /// Maximum node displacement fell below the convergence tolerance.
    Converged,
    /// The iteration budget ran out before convergence.
    Aborted,
}

impl PlanPhase {
    /// `true` for [`Converged`](Self::Converged) and
    /// [`Aborted`](Self::Aborted).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::Aborted)
    }

    /// `true` if `iterate` may perform a relaxation step.
    pub fn can_iterate(self) -> bool {
        matches!(self, Self::Ready | Self::Iterating)
    }
}

impl fmt::Display for PlanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unprepared => "unprepared",
            Self::Ready => "ready",
            Self::Iterating => "iterating",
            Self::Converged => "converged",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_signs_are_opposite() {
        assert_eq!(DetourMode::Right.bias_sign(), 1.0);
        assert_eq!(DetourMode::Left.bias_sign(), -1.0);
    }

    #[test]
    fn only_converged_and_aborted_are_terminal() {
        let terminal: Vec<PlanPhase> = [
            PlanPhase::Unprepared,
            PlanPhase::Ready,
            PlanPhase::Iterating,
            PlanPhase::Converged,
            PlanPhase::Aborted,
        ]
        .into_iter()
        .filter(|p| p.is_terminal())
        .collect();
        assert_eq!(terminal, vec![PlanPhase::Converged, PlanPhase::Aborted]);
    }

    #[test]
    fn iterate_allowed_only_when_ready_or_iterating() {
        assert!(PlanPhase::Ready.can_iterate());
        assert!(PlanPhase::Iterating.can_iterate());
        assert!(!PlanPhase::Unprepared.can_iterate());
        assert!(!PlanPhase::Converged.can_iterate());
    }
}
