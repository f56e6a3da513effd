use crate::{Mat, MatClass, ProbQP, QpError, check_problem, check_dims};

//

/// Normalized QP to be fed to a backend.
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
///
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & {1 \over 2} x^T P x + q^T x \\\\
/// {\rm subject \ to} & G x \preceq h \\\\
/// & A x = b
/// \end{array}
/// \\]
/// Constraint matrices are rank-2 and box bounds are already folded into \\(G, h\\).
#[derive(Debug, Clone)]
pub struct QpData
{
    /// \\(P\\)
    pub sym_p: Mat,
    /// \\(q\\)
    pub vec_q: Vec<f64>,
    /// \\(G, h\\)
    pub ineq: Option<(Mat, Vec<f64>)>,
    /// \\(A, b\\)
    pub eq: Option<(Mat, Vec<f64>)>,
}

impl QpData
{
    /// Number of variables \\(n\\).
    pub fn dim(&self) -> usize
    {
        self.vec_q.len()
    }

    /// Number of inequality rows \\(m\\).
    pub fn n_ineq(&self) -> usize
    {
        self.ineq.as_ref().map_or(0, |(_, h)| h.len())
    }

    /// Number of equality rows \\(p\\).
    pub fn n_eq(&self) -> usize
    {
        self.eq.as_ref().map_or(0, |(_, b)| b.len())
    }
}

//

fn fold(ineq: Option<(Mat, Vec<f64>)>, class_p: MatClass, sign: f64, bound: &[f64]) -> Option<(Mat, Vec<f64>)>
{
    let n = bound.len();
    let rhs = bound.iter().map(|v| sign * v);

    match ineq {
        None => {
            let mat = Mat::identity(n, class_p).scale(sign);
            Some((mat, rhs.collect()))
        },
        Some((mat_g, mut vec_h)) => {
            let mat = Mat::identity(n, mat_g.class()).scale(sign);
            vec_h.extend(rhs);
            Some((mat_g.vstack(&mat), vec_h))
        },
    }
}

/// Normalizes a QP.
///
/// Returns [`QpData`], or an error of [`check_problem`] or [`check_dims`].
/// * `qp` is the problem, which is left untouched.
/// * `sym_proj` replaces \\(P\\) with \\({1 \over 2}(P + P^T)\\) before anything else.
///
/// An unshaped row of \\(G\\) or \\(A\\) becomes a \\(1 \times n\\) matrix
/// of the class of \\(P\\).
/// \\(lb \preceq x\\) is folded as \\(-I x \preceq -lb\\) and then \\(x \preceq ub\\) as \\(I x \preceq ub\\),
/// appended to \\(G, h\\) or creating them.
/// An appended identity has the class of \\(G\\), or of \\(P\\) if \\(G\\) is absent.
pub fn normalize(qp: &ProbQP, sym_proj: bool) -> Result<QpData, QpError>
{
    let n = qp.dim();

    let (pr, pc) = qp.sym_p.size();
    let sym_p = if sym_proj && pr == pc {
        log::debug!("symmetric projection of P ({} x {})", pr, pc);
        qp.sym_p.sym_proj()
    }
    else {
        qp.sym_p.clone()
    };
    let class_p = sym_p.class();

    check_problem(qp)?;
    check_dims(qp)?;

    let mut ineq = qp.mat_g.as_ref()
        .zip(qp.vec_h.as_ref())
        .map(|(g, h)| (g.to_mat(class_p), h.clone()));
    let eq = qp.mat_a.as_ref()
        .zip(qp.vec_b.as_ref())
        .map(|(a, b)| (a.to_mat(class_p), b.clone()));

    if let Some(lb) = &qp.vec_lb {
        ineq = fold(ineq, class_p, -1., lb);
        log::debug!("lb folded into {} inequality rows", n);
    }
    if let Some(ub) = &qp.vec_ub {
        ineq = fold(ineq, class_p, 1., ub);
        log::debug!("ub folded into {} inequality rows", n);
    }

    let data = QpData {
        sym_p,
        vec_q: qp.vec_q.clone(),
        ineq,
        eq,
    };
    log::debug!("normalized: n = {}, m = {}, p = {}, {:?}", data.dim(), data.n_ineq(), data.n_eq(), class_p);

    Ok(data)
}

//

#[test]
fn test_normalize_empty()
{
    use crate::MatBuild;

    let qp = ProbQP::new(MatBuild::new(0, 0), vec![]).lb(vec![]);
    let data = normalize(&qp, false).unwrap();

    let (g, h) = data.ineq.unwrap();
    assert_eq!(g.size(), (0, 0));
    assert!(h.is_empty());
}
