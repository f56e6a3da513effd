use std::sync::atomic::{AtomicBool, Ordering};
use totsu::prelude::*;
use crate::QpData;
use super::{Backend, num_by_env};

type La = FloatGeneric<f64>;
type AMatBuild = totsu::MatBuild<La>;
type AProbQP = totsu::ProbQP<La>;
type ASolver = Solver<La>;

//

/// Parameters of [`TotsuQP`], passed to [`totsu::prelude::SolverParam`].
#[derive(Debug, Clone, PartialEq)]
pub struct TotsuParam
{
    /// Max iteration number. `None` means no upper limit.
    pub max_iter: Option<usize>,
    /// Tolerance of the primal residual, dual residual and duality gap.
    pub eps_acc: f64,
    /// Tolerance of the unboundness and infeasibility.
    pub eps_inf: f64,
    /// Tolerance of small positive value to avoid division by zero.
    pub eps_zero: f64,
    /// Period of iterations to output progress log.
    pub log_period: usize,
}

impl Default for TotsuParam
{
    fn default() -> Self
    {
        TotsuParam {
            max_iter: Some(1_000_000),
            eps_acc: 1e-6,
            eps_inf: 1e-6,
            eps_zero: 1e-12,
            log_period: 10_000,
        }
    }
}

impl TotsuParam
{
    /// Overrides parameters by environment variables
    /// `TOTSU_MAX_ITER`, `TOTSU_EPS_ACC`, `TOTSU_EPS_INF`, `TOTSU_EPS_ZERO` and `TOTSU_LOG_PERIOD`.
    pub fn set_by_env(&mut self)
    {
        self.max_iter = num_by_env("TOTSU_MAX_ITER").or(self.max_iter);
        self.eps_acc = num_by_env("TOTSU_EPS_ACC").unwrap_or(self.eps_acc);
        self.eps_inf = num_by_env("TOTSU_EPS_INF").unwrap_or(self.eps_inf);
        self.eps_zero = num_by_env("TOTSU_EPS_ZERO").unwrap_or(self.eps_zero);
        self.log_period = num_by_env("TOTSU_LOG_PERIOD").unwrap_or(self.log_period);
    }
}

//

/// `totsu` backend
///
/// First-order conic solver in pure Rust.
/// \\(P\\) is factorized by a dense eigenvalue decomposition, so every matrix is densified.
/// No warm start.
pub struct TotsuQP
{
    /// Solver parameters.
    pub par: TotsuParam,
    verbose: AtomicBool,
}

impl TotsuQP
{
    /// Creates an instance with default parameters overridden by environment variables.
    pub fn new() -> Self
    {
        let mut par = TotsuParam::default();
        par.set_by_env();

        TotsuQP {
            par,
            verbose: AtomicBool::new(false),
        }
    }

    /// Changes parameters by a function.
    ///
    /// * `f` is a function to change parameters given by its argument.
    pub fn par<F>(mut self, f: F) -> Self
    where F: FnOnce(&mut TotsuParam)
    {
        f(&mut self.par);
        self
    }
}

impl Default for TotsuQP
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Backend for TotsuQP
{
    fn set_verbosity(&self, verbose: bool)
    {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    fn solve(&self, data: &QpData, initvals: Option<&[f64]>) -> Option<Vec<f64>>
    {
        let verbose = self.verbose.load(Ordering::Relaxed);
        let n = data.dim();
        let m = data.n_ineq();
        let p = data.n_eq();

        if initvals.is_some() {
            log::debug!("totsu: warm start not supported, initvals ignored");
        }

        let p_dense = data.sym_p.to_dense();
        let sym_p = AMatBuild::new(MatType::SymPack(n))
            .by_fn(|r, c| p_dense[(r, c)]);
        let vec_q = AMatBuild::new(MatType::General(n, 1))
            .iter_colmaj(&data.vec_q);

        let mut mat_g = AMatBuild::new(MatType::General(m, n));
        let mut vec_h = AMatBuild::new(MatType::General(m, 1));
        if let Some((g, h)) = &data.ineq {
            let g = g.to_dense();
            mat_g.set_by_fn(|r, c| g[(r, c)]);
            vec_h.set_iter_colmaj(h);
        }

        let mut mat_a = AMatBuild::new(MatType::General(p, n));
        let mut vec_b = AMatBuild::new(MatType::General(p, 1));
        if let Some((a, b)) = &data.eq {
            let a = a.to_dense();
            mat_a.set_by_fn(|r, c| a[(r, c)]);
            vec_b.set_iter_colmaj(b);
        }

        let par = &self.par;
        let s = ASolver::new().par(|sp| {
            sp.max_iter = par.max_iter;
            sp.eps_acc = par.eps_acc;
            sp.eps_inf = par.eps_inf;
            sp.eps_zero = par.eps_zero;
            sp.log_period = par.log_period;
        });

        if verbose {
            log::info!("totsu: n = {}, m = {}, p = {}", n, m, p);
        }

        let mut qp = AProbQP::new(sym_p, vec_q, mat_g, vec_h, mat_a, vec_b, s.par.eps_zero);
        match s.solve(qp.problem()) {
            Ok(rslt) => {
                if verbose {
                    log::info!("totsu: solved");
                }
                Some(rslt.0[0.. n].to_vec())
            },
            Err(e) => {
                log::warn!("totsu: {:?}", e);
                None
            },
        }
    }
}

//

#[test]
fn test_totsu_qp1()
{
    use float_eq::assert_float_eq;
    use crate::{MatBuild, ProbQP, normalize};

    let _ = env_logger::builder().is_test(true).try_init();

    // perpendicular from (-1, -2) to 1 - x0/2 - x1/3 = 0
    let qp = ProbQP::new(MatBuild::identity(2), vec![1., 2.])
        .ineq(vec![-1. / 2., -1. / 3.], vec![-1.]);
    let data = normalize(&qp, false).unwrap();

    let b = TotsuQP::new().par(|p| {
        p.max_iter = Some(100_000);
    });
    b.set_verbosity(true);
    let x = b.solve(&data, None).unwrap();

    assert_float_eq!(x.as_slice(), [2., 0.].as_ref(), abs_all <= 1e-3);
}
