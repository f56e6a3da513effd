use std::sync::atomic::{AtomicBool, Ordering};
use clarabel::algebra::CscMatrix;
use clarabel::solver::{DefaultSettings, DefaultSolver, IPSolver, SolverStatus, SupportedConeT};
use crate::{Mat, QpData};
use super::{Backend, num_by_env, csc_parts, stack_constraints};

//

/// Parameters of [`ClarabelQP`], passed to [`clarabel::solver::DefaultSettings`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClarabelParam
{
    /// Max iteration number.
    pub max_iter: u32,
    /// Absolute tolerance of the duality gap.
    pub tol_gap_abs: f64,
    /// Relative tolerance of the duality gap.
    pub tol_gap_rel: f64,
    /// Tolerance of the primal and dual residuals.
    pub tol_feas: f64,
}

impl Default for ClarabelParam
{
    fn default() -> Self
    {
        ClarabelParam {
            max_iter: 200,
            tol_gap_abs: 1e-8,
            tol_gap_rel: 1e-8,
            tol_feas: 1e-8,
        }
    }
}

impl ClarabelParam
{
    /// Overrides parameters by environment variables
    /// `CLARABEL_MAX_ITER`, `CLARABEL_TOL_GAP_ABS`, `CLARABEL_TOL_GAP_REL` and `CLARABEL_TOL_FEAS`.
    pub fn set_by_env(&mut self)
    {
        self.max_iter = num_by_env("CLARABEL_MAX_ITER").unwrap_or(self.max_iter);
        self.tol_gap_abs = num_by_env("CLARABEL_TOL_GAP_ABS").unwrap_or(self.tol_gap_abs);
        self.tol_gap_rel = num_by_env("CLARABEL_TOL_GAP_REL").unwrap_or(self.tol_gap_rel);
        self.tol_feas = num_by_env("CLARABEL_TOL_FEAS").unwrap_or(self.tol_feas);
    }
}

//

fn to_csc(mat: &Mat, upper: bool) -> CscMatrix<f64>
{
    let c = csc_parts(mat, upper);

    CscMatrix {
        m: c.nrows,
        n: c.ncols,
        colptr: c.indptr,
        rowval: c.indices,
        nzval: c.data,
    }
}

/// `clarabel` backend
///
/// Interior-point solver taking sparse matrices.
/// Equality rows go to a zero cone and inequality rows to a nonnegative cone.
/// No warm start.
pub struct ClarabelQP
{
    /// Solver parameters.
    pub par: ClarabelParam,
    verbose: AtomicBool,
}

impl ClarabelQP
{
    /// Creates an instance with default parameters overridden by environment variables.
    pub fn new() -> Self
    {
        let mut par = ClarabelParam::default();
        par.set_by_env();

        ClarabelQP {
            par,
            verbose: AtomicBool::new(false),
        }
    }

    /// Changes parameters by a function.
    ///
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<F>(mut self, f: F) -> Self
    where F: FnOnce(&mut ClarabelParam)
    {
        f(&mut self.par);
        self
    }
}

impl Default for ClarabelQP
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Backend for ClarabelQP
{
    fn set_verbosity(&self, verbose: bool)
    {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    fn solve(&self, data: &QpData, initvals: Option<&[f64]>) -> Option<Vec<f64>>
    {
        let verbose = self.verbose.load(Ordering::Relaxed);

        if initvals.is_some() {
            log::debug!("clarabel: warm start not supported, initvals ignored");
        }

        // A x + s = b, s in {0}^p x R_+^m
        let (mat, rhs, p, m) = stack_constraints(data);

        let mut cones = Vec::new();
        if p > 0 {
            cones.push(SupportedConeT::ZeroConeT(p));
        }
        if m > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(m));
        }

        let mut settings = DefaultSettings::default();
        settings.verbose = verbose;
        settings.max_iter = self.par.max_iter;
        settings.tol_gap_abs = self.par.tol_gap_abs;
        settings.tol_gap_rel = self.par.tol_gap_rel;
        settings.tol_feas = self.par.tol_feas;

        if verbose {
            log::info!("clarabel: n = {}, m = {}, p = {}", data.dim(), m, p);
        }

        let mut solver = DefaultSolver::new(
            &to_csc(&data.sym_p, true),
            &data.vec_q,
            &to_csc(&mat, false),
            &rhs,
            &cones,
            settings,
        );
        solver.solve();

        let status = solver.solution.status;
        if matches!(status, SolverStatus::Solved | SolverStatus::AlmostSolved) {
            if verbose {
                log::info!("clarabel: {:?}", status);
            }
            Some(solver.solution.x.clone())
        }
        else {
            log::warn!("clarabel: {:?}", status);
            None
        }
    }
}

//

#[test]
fn test_clarabel_qp1()
{
    use float_eq::assert_float_eq;
    use crate::{MatBuild, ProbQP, normalize};

    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![1., 2.])
        .ineq(vec![-1. / 2., -1. / 3.], vec![-1.]);
    let data = normalize(&qp, false).unwrap();

    let b = ClarabelQP::new();
    let x = b.solve(&data, None).unwrap();

    assert_float_eq!(x.as_slice(), [2., 0.].as_ref(), abs_all <= 1e-6);
}
