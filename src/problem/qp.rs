use crate::{Mat, ConstraintMat};

//

/// Quadratic program
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
///
/// The problem is
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & {1 \over 2} x^T P x + q^T x \\\\
/// {\rm subject \ to} & lb \preceq x \preceq ub \\\\
/// & G x \preceq h \\\\
/// & A x = b,
/// \end{array}
/// \\]
/// where
/// - variables \\( x \in \mathbb{R}^n \\)
/// - \\( P \in \mathcal{S}_{+}^n,\ q \in \mathbb{R}^n \\)
/// - \\( G \in \mathbb{R}^{m \times n},\ h \in \mathbb{R}^m \\)
/// - \\( A \in \mathbb{R}^{p \times n},\ b \in \mathbb{R}^p \\)
/// - \\( lb, ub \in \mathbb{R}^n \\).
///
/// Every constraint is optional. \\(G, h\\) and \\(A, b\\) go in pairs,
/// which is checked by [`crate::check_problem`] rather than by the type,
/// so that the fields can be filled one by one.
/// \\(lb\\) and \\(ub\\) are independent of each other.
#[derive(Debug, Clone)]
pub struct ProbQP
{
    /// \\(P\\), symmetric unless [`crate::QpParam::sym_proj`] is set.
    pub sym_p: Mat,
    /// \\(q\\)
    pub vec_q: Vec<f64>,
    /// \\(G\\)
    pub mat_g: Option<ConstraintMat>,
    /// \\(h\\)
    pub vec_h: Option<Vec<f64>>,
    /// \\(A\\)
    pub mat_a: Option<ConstraintMat>,
    /// \\(b\\)
    pub vec_b: Option<Vec<f64>>,
    /// \\(lb\\)
    pub vec_lb: Option<Vec<f64>>,
    /// \\(ub\\)
    pub vec_ub: Option<Vec<f64>>,
    /// Warm-start vector, passed to a solver as it is.
    pub initvals: Option<Vec<f64>>,
}

impl ProbQP
{
    /// Creates an unconstrained QP.
    ///
    /// Returns a [`ProbQP`] instance.
    /// * `sym_p` is \\(P\\).
    /// * `vec_q` is \\(q\\).
    pub fn new<M: Into<Mat>>(sym_p: M, vec_q: Vec<f64>) -> Self
    {
        ProbQP {
            sym_p: sym_p.into(),
            vec_q,
            mat_g: None,
            vec_h: None,
            mat_a: None,
            vec_b: None,
            vec_lb: None,
            vec_ub: None,
            initvals: None,
        }
    }

    /// Adds \\(G x \preceq h\\).
    pub fn ineq<M: Into<ConstraintMat>>(mut self, mat_g: M, vec_h: Vec<f64>) -> Self
    {
        self.mat_g = Some(mat_g.into());
        self.vec_h = Some(vec_h);
        self
    }

    /// Adds \\(A x = b\\).
    pub fn eq<M: Into<ConstraintMat>>(mut self, mat_a: M, vec_b: Vec<f64>) -> Self
    {
        self.mat_a = Some(mat_a.into());
        self.vec_b = Some(vec_b);
        self
    }

    /// Adds \\(lb \preceq x\\).
    pub fn lb(mut self, vec_lb: Vec<f64>) -> Self
    {
        self.vec_lb = Some(vec_lb);
        self
    }

    /// Adds \\(x \preceq ub\\).
    pub fn ub(mut self, vec_ub: Vec<f64>) -> Self
    {
        self.vec_ub = Some(vec_ub);
        self
    }

    /// Sets a warm-start vector.
    pub fn initvals(mut self, x: Vec<f64>) -> Self
    {
        self.initvals = Some(x);
        self
    }

    /// Number of variables \\(n\\), that is the length of \\(q\\).
    pub fn dim(&self) -> usize
    {
        self.vec_q.len()
    }

    /// Objective value \\({1 \over 2} x^T P x + q^T x\\).
    pub fn objective(&self, x: &[f64]) -> f64
    {
        let px = self.sym_p.mul_vec(x);
        let xpx: f64 = x.iter().zip(&px).map(|(u, v)| u * v).sum();
        let qx: f64 = x.iter().zip(&self.vec_q).map(|(u, v)| u * v).sum();

        0.5 * xpx + qx
    }
}

//

#[test]
fn test_probqp_objective()
{
    use crate::MatBuild;

    let qp = ProbQP::new(MatBuild::identity(2).scale(2.), vec![-2., -5.]);

    assert_eq!(qp.dim(), 2);
    assert_eq!(qp.objective(&[0., 0.]), 0.);
    assert_eq!(qp.objective(&[1., 1.]), 2. - 7.);
}
