use thiserror::Error;

/// Which paired constraint an [`QpError::IncompleteConstraint`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind
{
    /// \\(Gx \le h\\)
    Inequality,
    /// \\(Ax = b\\)
    Equality,
}

impl core::fmt::Display for ConstraintKind
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        match self {
            ConstraintKind::Inequality => write!(f, "inequality"),
            ConstraintKind::Equality => write!(f, "equality"),
        }
    }
}

/// Errors of normalization and dispatch.
///
/// A backend that ran but found no solution is not an error of this layer:
/// [`crate::QpSolver::solve`] returns `Ok(None)` in that case.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QpError
{
    /// One of a paired constraint supplied without its partner.
    #[error("incomplete {kind} constraint (missing {missing})")]
    IncompleteConstraint
    {
        kind: ConstraintKind,
        missing: &'static str,
    },

    /// Matrix or vector with a size inconsistent with the problem dimensions.
    #[error("dimension mismatch of {what}: expected {expected:?}, found {found:?}")]
    DimensionMismatch
    {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Solver name not among the enumerated backends.
    #[error("solver '{0}' not recognized")]
    UnknownSolver(String),

    /// Known backend which is not compiled into this build.
    #[error("solver '{0}' not available (enable its cargo feature)")]
    SolverUnavailable(String),

    /// The relaxed problem of [`crate::ProbSaferQP`] has no solution.
    #[error("no solution found for the relaxed problem")]
    Infeasible,
}

//

#[test]
fn test_error_message()
{
    let e = QpError::IncompleteConstraint {
        kind: ConstraintKind::Inequality,
        missing: "h",
    };
    assert_eq!(e.to_string(), "incomplete inequality constraint (missing h)");

    let e = QpError::UnknownSolver("foo".to_string());
    assert_eq!(e.to_string(), "solver 'foo' not recognized");
}
