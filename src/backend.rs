use crate::QpData;
#[cfg(any(feature = "clarabel", feature = "osqp", feature = "quadprog"))]
use crate::Mat;
#[cfg(any(feature = "clarabel", feature = "osqp"))]
use crate::mat::sparse_from_triplets;

#[cfg(feature = "clarabel")]
mod clarabel_qp;
#[cfg(feature = "osqp")]
mod osqp_qp;
#[cfg(feature = "quadprog")]
mod quadprog_qp;
#[cfg(feature = "totsu")]
mod totsu_qp;

#[cfg(feature = "clarabel")]
pub use clarabel_qp::*;
#[cfg(feature = "osqp")]
pub use osqp_qp::*;
#[cfg(feature = "quadprog")]
pub use quadprog_qp::*;
#[cfg(feature = "totsu")]
pub use totsu_qp::*;

//

/// Class of matrices a backend takes natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability
{
    Dense,
    Sparse,
}

/// Numerical QP solver behind the dispatcher.
///
/// Implementations convert [`QpData`] into their own input format;
/// any matrix class is accepted regardless of [`Capability`].
pub trait Backend: Send + Sync
{
    /// Turns progress output of the solver on or off.
    fn set_verbosity(&self, verbose: bool);

    /// Solves a normalized QP.
    ///
    /// Returns a solution \\(x\\), or `None` if the solver did not find one
    /// for whatever reason (infeasible, unbounded, not converged).
    /// * `data` is the normalized problem.
    /// * `initvals` is a warm-start vector, ignored if the solver does not support it.
    fn solve(&self, data: &QpData, initvals: Option<&[f64]>) -> Option<Vec<f64>>;
}

//

/// Creates a backend by name if its feature is compiled in.
///
/// Registry population calls this once per enumerated name.
pub fn probe(name: &str) -> Option<Box<dyn Backend>>
{
    match name {
        #[cfg(feature = "clarabel")]
        "clarabel" => Some(Box::new(ClarabelQP::new())),
        #[cfg(feature = "osqp")]
        "osqp" => Some(Box::new(OsqpQP::new())),
        #[cfg(feature = "quadprog")]
        "quadprog" => Some(Box::new(QuadprogQP::new())),
        #[cfg(feature = "totsu")]
        "totsu" => Some(Box::new(TotsuQP::new())),
        _ => None,
    }
}

//

/// Reads a number from an environment variable.
///
/// Returns `None` if the variable is unset or does not parse.
pub fn num_by_env<N: num_traits::Num + core::fmt::Display>(e: &str) -> Option<N>
{
    if let Some(v) = std::env::var(e).ok()
                     .and_then(|s| {N::from_str_radix(&s, 10).ok()}) {
        log::info!("{}: {}", e, v);
        Some(v)
    }
    else {
        None
    }
}

//

/// Compressed sparse column arrays.
#[cfg(any(feature = "clarabel", feature = "osqp"))]
pub(crate) struct CscParts
{
    pub nrows: usize,
    pub ncols: usize,
    pub indptr: Vec<usize>,
    pub indices: Vec<usize>,
    pub data: Vec<f64>,
}

/// CSC arrays of a matrix, with sorted row indices and no duplicates.
///
/// * `upper` keeps only the upper triangular part.
#[cfg(any(feature = "clarabel", feature = "osqp"))]
pub(crate) fn csc_parts(mat: &Mat, upper: bool) -> CscParts
{
    let (nrows, ncols) = mat.size();
    let t = mat.triplets().into_iter().filter(|(r, c, _)| !upper || r <= c);
    let (indptr, indices, data) = sparse_from_triplets(nrows, ncols, t).into_raw_storage();

    CscParts {
        nrows,
        ncols,
        indptr,
        indices,
        data,
    }
}

/// Stacked constraint \\([A; G]\\) with its right-hand side \\([b; h]\\).
///
/// Returns the stacked matrix, the right-hand side, and the numbers of rows \\(p\\) and \\(m\\).
#[cfg(any(feature = "clarabel", feature = "osqp", feature = "quadprog"))]
pub(crate) fn stack_constraints(data: &QpData) -> (Mat, Vec<f64>, usize, usize)
{
    let n = data.dim();
    let class = data.sym_p.class();

    let mut mat = Mat::zeros(0, n, class);
    let mut rhs = Vec::new();

    if let Some((a, b)) = &data.eq {
        mat = mat.vstack(a);
        rhs.extend_from_slice(b);
    }
    if let Some((g, h)) = &data.ineq {
        mat = mat.vstack(g);
        rhs.extend_from_slice(h);
    }

    (mat, rhs, data.n_eq(), data.n_ineq())
}

//

#[cfg(any(feature = "clarabel", feature = "osqp"))]
#[test]
fn test_csc_parts()
{
    use crate::MatBuild;

    let p = Mat::from(MatBuild::new(2, 2).iter_rowmaj(&[
        4., 1.,
        1., 2.,
    ]));

    let c = csc_parts(&p, true);
    assert_eq!((c.nrows, c.ncols), (2, 2));
    assert_eq!(c.indptr, vec![0, 1, 3]);
    assert_eq!(c.indices, vec![0, 0, 1]);
    assert_eq!(c.data, vec![4., 1., 2.]);

    let c = csc_parts(&p, false);
    assert_eq!(c.indptr, vec![0, 2, 4]);
}

#[cfg(any(feature = "clarabel", feature = "osqp", feature = "quadprog"))]
#[test]
fn test_stack_constraints()
{
    use crate::{MatBuild, ProbQP, normalize};

    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.])
        .ineq(vec![1., 1.], vec![3.])
        .eq(vec![1., -1.], vec![0.])
        .ub(vec![2., 2.]);
    let data = normalize(&qp, false).unwrap();

    let (mat, rhs, p, m) = stack_constraints(&data);
    assert_eq!((p, m), (1, 3));
    assert_eq!(mat.size(), (4, 2));
    assert_eq!(rhs, vec![0., 3., 2., 2.]);
    assert_eq!(mat.to_dense().row(0), vec![1., -1.]);
}
