use std::sync::atomic::{AtomicBool, Ordering};
use crate::{MatBuild, QpData};
use super::{Backend, num_by_env, stack_constraints};

//

/// Parameters of [`QuadprogQP`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuadprogParam
{
    /// Diagonal shift added to \\(P\\), which shall be positive definite for the solver.
    pub reg: f64,
}

impl Default for QuadprogParam
{
    fn default() -> Self
    {
        QuadprogParam {
            reg: 0.,
        }
    }
}

impl QuadprogParam
{
    /// Overrides parameters by environment variable `QUADPROG_REG`.
    pub fn set_by_env(&mut self)
    {
        self.reg = num_by_env("QUADPROG_REG").unwrap_or(self.reg);
    }
}

//

fn rowmaj(mat: &MatBuild) -> Vec<f64>
{
    let (nr, _) = mat.size();

    (0.. nr).flat_map(|r| mat.row(r)).collect()
}

/// `quadprog` backend
///
/// Goldfarb-Idnani dual active-set solver in pure Rust, taking dense row-major arrays.
/// \\(P\\) shall be positive definite, possibly after the shift of [`QuadprogParam::reg`].
/// No warm start.
pub struct QuadprogQP
{
    /// Solver parameters.
    pub par: QuadprogParam,
    verbose: AtomicBool,
}

impl QuadprogQP
{
    /// Creates an instance with default parameters overridden by environment variables.
    pub fn new() -> Self
    {
        let mut par = QuadprogParam::default();
        par.set_by_env();

        QuadprogQP {
            par,
            verbose: AtomicBool::new(false),
        }
    }

    /// Changes parameters by a function.
    ///
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<F>(mut self, f: F) -> Self
    where F: FnOnce(&mut QuadprogParam)
    {
        f(&mut self.par);
        self
    }
}

impl Default for QuadprogQP
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Backend for QuadprogQP
{
    fn set_verbosity(&self, verbose: bool)
    {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    fn solve(&self, data: &QpData, initvals: Option<&[f64]>) -> Option<Vec<f64>>
    {
        let verbose = self.verbose.load(Ordering::Relaxed);
        let n = data.dim();

        if initvals.is_some() {
            log::debug!("quadprog: warm start not supported, initvals ignored");
        }

        let mut sym_p = data.sym_p.to_dense();
        for i in 0.. n {
            sym_p[(i, i)] += self.par.reg;
        }
        let mut qmat = rowmaj(&sym_p);

        // first p rows are equalities
        let (mat, rhs, p, m) = stack_constraints(data);
        let amat = rowmaj(&mat.to_dense());

        if verbose {
            log::info!("quadprog: n = {}, m = {}, p = {}", n, m, p);
        }

        match quadprog::solve_qp(&mut qmat, &data.vec_q, &amat, &rhs, p, false) {
            Ok(sol) => {
                if verbose {
                    log::info!("quadprog: solved, {} active constraints", sol.iact.len());
                }
                Some(sol.sol)
            },
            Err(e) => {
                log::warn!("quadprog: {}", e);
                None
            },
        }
    }
}

//

#[test]
fn test_quadprog_qp1()
{
    use float_eq::assert_float_eq;
    use crate::{ProbQP, normalize};

    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![1., 2.])
        .ineq(vec![-1. / 2., -1. / 3.], vec![-1.]);
    let data = normalize(&qp, false).unwrap();

    let b = QuadprogQP::new();
    b.set_verbosity(true);
    let x = b.solve(&data, None).unwrap();

    assert_float_eq!(x.as_slice(), [2., 0.].as_ref(), abs_all <= 1e-9);
}

#[test]
fn test_quadprog_eq_and_reg()
{
    use float_eq::assert_float_eq;
    use crate::{ProbQP, normalize};

    let _ = env_logger::builder().is_test(true).try_init();

    // P is singular along x1; x1 is fixed by the equality
    let sym_p = MatBuild::new(2, 2).iter_rowmaj(&[
        1., 0.,
        0., 0.,
    ]);
    let qp = ProbQP::new(sym_p, vec![-1., 0.])
        .eq(vec![0., 1.], vec![3.]);
    let data = normalize(&qp, false).unwrap();

    let b = QuadprogQP::new().par(|p| {
        p.reg = 1e-9;
    });
    let x = b.solve(&data, None).unwrap();

    assert_float_eq!(x.as_slice(), [1., 3.].as_ref(), abs_all <= 1e-6);
}
