use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use osqp::{CscMatrix, Problem, Settings, Status};
use crate::{Mat, QpData};
use super::{Backend, num_by_env, csc_parts, stack_constraints};

// values beyond this are infinite for OSQP
const OSQP_INFTY: f64 = 1e30;

//

/// Parameters of [`OsqpQP`], passed to [`osqp::Settings`].
#[derive(Debug, Clone, PartialEq)]
pub struct OsqpParam
{
    /// Max iteration number.
    pub max_iter: u32,
    /// Absolute tolerance.
    pub eps_abs: f64,
    /// Relative tolerance.
    pub eps_rel: f64,
    /// Solution polishing.
    pub polish: bool,
}

impl Default for OsqpParam
{
    fn default() -> Self
    {
        OsqpParam {
            max_iter: 10_000,
            eps_abs: 1e-5,
            eps_rel: 1e-5,
            polish: true,
        }
    }
}

impl OsqpParam
{
    /// Overrides parameters by environment variables
    /// `OSQP_MAX_ITER`, `OSQP_EPS_ABS` and `OSQP_EPS_REL`.
    pub fn set_by_env(&mut self)
    {
        self.max_iter = num_by_env("OSQP_MAX_ITER").unwrap_or(self.max_iter);
        self.eps_abs = num_by_env("OSQP_EPS_ABS").unwrap_or(self.eps_abs);
        self.eps_rel = num_by_env("OSQP_EPS_REL").unwrap_or(self.eps_rel);
    }
}

//

fn to_csc(mat: &Mat, upper: bool) -> CscMatrix<'static>
{
    let c = csc_parts(mat, upper);

    CscMatrix {
        nrows: c.nrows,
        ncols: c.ncols,
        indptr: Cow::Owned(c.indptr),
        indices: Cow::Owned(c.indices),
        data: Cow::Owned(c.data),
    }
}

/// `osqp` backend
///
/// ADMM solver taking sparse matrices, constraints as \\(l \preceq A x \preceq u\\).
/// Warm-started with `initvals` if given.
pub struct OsqpQP
{
    /// Solver parameters.
    pub par: OsqpParam,
    verbose: AtomicBool,
}

impl OsqpQP
{
    /// Creates an instance with default parameters overridden by environment variables.
    pub fn new() -> Self
    {
        let mut par = OsqpParam::default();
        par.set_by_env();

        OsqpQP {
            par,
            verbose: AtomicBool::new(false),
        }
    }

    /// Changes parameters by a function.
    ///
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<F>(mut self, f: F) -> Self
    where F: FnOnce(&mut OsqpParam)
    {
        f(&mut self.par);
        self
    }
}

impl Default for OsqpQP
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Backend for OsqpQP
{
    fn set_verbosity(&self, verbose: bool)
    {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    fn solve(&self, data: &QpData, initvals: Option<&[f64]>) -> Option<Vec<f64>>
    {
        let verbose = self.verbose.load(Ordering::Relaxed);

        // [b; -inf] <= [A; G] x <= [b; h]
        let (mat, rhs, p, m) = stack_constraints(data);
        let vec_l: Vec<f64> = rhs.iter().enumerate()
            .map(|(i, v)| if i < p {*v} else {-OSQP_INFTY})
            .collect();

        let settings = Settings::default()
            .verbose(verbose)
            .max_iter(self.par.max_iter)
            .eps_abs(self.par.eps_abs)
            .eps_rel(self.par.eps_rel)
            .polish(self.par.polish);

        if verbose {
            log::info!("osqp: n = {}, m = {}, p = {}", data.dim(), m, p);
        }

        let mut prob = match Problem::new(
            to_csc(&data.sym_p, true),
            &data.vec_q,
            to_csc(&mat, false),
            &vec_l,
            &rhs,
            &settings,
        ) {
            Ok(prob) => prob,
            Err(e) => {
                log::warn!("osqp: setup failed: {:?}", e);
                return None;
            },
        };

        if let Some(x0) = initvals {
            prob.warm_start_x(x0);
        }

        match prob.solve() {
            Status::Solved(sol) => {
                if verbose {
                    log::info!("osqp: solved");
                }
                Some(sol.x().to_vec())
            },
            _ => {
                log::warn!("osqp: not solved");
                None
            },
        }
    }
}

//

#[test]
fn test_osqp_qp1()
{
    use float_eq::assert_float_eq;
    use crate::{MatBuild, ProbQP, normalize};

    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![1., 2.])
        .ineq(vec![-1. / 2., -1. / 3.], vec![-1.])
        .initvals(vec![1., 1.]);
    let data = normalize(&qp, false).unwrap();

    let b = OsqpQP::new().par(|p| {
        p.eps_abs = 1e-8;
        p.eps_rel = 1e-8;
    });
    let x = b.solve(&data, qp.initvals.as_deref()).unwrap();

    assert_float_eq!(x.as_slice(), [2., 0.].as_ref(), abs_all <= 1e-4);
}
