use crate::{ProbQP, ProbSaferQP, QpError, normalize, dispatch, registry};

//

/// Parameters of [`QpSolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct QpParam
{
    /// Backend name. `None` means [`registry::DEFAULT_SOLVER`],
    /// or [`registry::DEFAULT_DENSE_SOLVER`] for [`QpSolver::solve_safer`].
    pub solver: Option<String>,
    /// Replaces \\(P\\) with its symmetric projection.
    pub sym_proj: bool,
    /// Progress output of the backend.
    pub verbose: bool,
}

impl Default for QpParam
{
    fn default() -> Self
    {
        QpParam {
            solver: None,
            sym_proj: false,
            verbose: false,
        }
    }
}

//

/// QP solver
///
/// Normalizes a [`ProbQP`] and dispatches it to a backend chosen by name.
#[derive(Debug, Clone, Default)]
pub struct QpSolver
{
    /// Solver parameters.
    pub par: QpParam,
}

impl QpSolver
{
    /// Creates an instance.
    ///
    /// Returns [`QpSolver`] instance with default parameters.
    pub fn new() -> Self
    {
        QpSolver {
            par: QpParam::default(),
        }
    }

    /// Changes parameters by a function.
    ///
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<F>(mut self, f: F) -> Self
    where F: FnOnce(&mut QpParam)
    {
        f(&mut self.par);
        self
    }

    /// Solves a QP.
    ///
    /// Returns `Ok(Some(x))` with a solution, or `Ok(None)` if the backend found none
    /// (infeasible, unbounded or not converged).
    /// Errors of normalization and dispatch are returned without solving.
    /// * `qp` is the problem.
    pub fn solve(&self, qp: &ProbQP) -> Result<Option<Vec<f64>>, QpError>
    {
        let name = self.par.solver.as_deref().unwrap_or(registry::DEFAULT_SOLVER);
        registry::backend(name)?;

        let data = normalize(qp, self.par.sym_proj)?;

        dispatch(name, &data, qp.initvals.as_deref(), self.par.verbose)
    }

    /// Solves a safer QP.
    ///
    /// Returns a solution \\(x\\) pushed into the interior of \\(G x \preceq h\\),
    /// or [`QpError::Infeasible`] if the relaxed problem has no solution.
    /// * `safer` is the problem.
    ///
    /// The backend shall be an available one taking dense matrices;
    /// see [`registry::dense_solvers`].
    pub fn solve_safer(&self, safer: &ProbSaferQP) -> Result<Vec<f64>, QpError>
    {
        let name = self.par.solver.as_deref().unwrap_or(registry::DEFAULT_DENSE_SOLVER);
        assert!(
            registry::dense_solvers().contains(&name),
            "solver '{}' is not an available dense solver", name
        );

        let qp = safer.augmented()?;
        let data = normalize(&qp, self.par.sym_proj)?;

        let z = dispatch(name, &data, qp.initvals.as_deref(), self.par.verbose)?
            .ok_or(QpError::Infeasible)?;

        Ok(safer.extract(&z))
    }
}

//

#[test]
fn test_solver_unknown()
{
    use crate::MatBuild;

    let s = QpSolver::new().par(|p| {
        p.solver = Some("foo".to_string());
    });

    let qp = ProbQP::new(MatBuild::identity(2), vec![1., 1.]);
    assert_eq!(s.solve(&qp), Err(QpError::UnknownSolver("foo".to_string())));

    // regardless of the problem
    let mut qp = ProbQP::new(MatBuild::identity(2), vec![1., 1.]);
    qp.vec_h = Some(vec![1.]);
    assert_eq!(s.solve(&qp), Err(QpError::UnknownSolver("foo".to_string())));
}
