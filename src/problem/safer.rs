use crate::{Mat, ConstraintMat, ProbQP, QpError};

//

/// Default regularization of the slack variables.
pub const SAFER_REG_DEFAULT: f64 = 1e-8;

/// Safer quadratic program
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
///
/// An inequality-constrained QP
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & {1 \over 2} x^T P x + q^T x \\\\
/// {\rm subject \ to} & G x \preceq h
/// \end{array}
/// \\]
/// is relaxed with slack variables \\(s \in \mathbb{R}^m\\) rewarded by a weight \\(w\\):
/// \\[
/// \begin{array}{ll}
/// {\rm minimize} & {1 \over 2} x^T P x + q^T x + {\epsilon \over 2} s^T s - w 1^T s \\\\
/// {\rm subject \ to} & -s \preceq 0 \\\\
/// & G x + s = h.
/// \end{array}
/// \\]
/// \\(s = h - G x\\) is a distance to the boundary of each inequality,
/// so a positive \\(w\\) pushes the solution into the interior of the feasible region.
/// \\(\epsilon\\) is a small regularization which makes the slack block positive definite.
///
/// The relaxed problem is solved as an ordinary [`ProbQP`] of \\(z = [x; s]\\)
/// and \\(x\\) is recovered as the first \\(n\\) entries of \\(z\\).
#[derive(Debug, Clone)]
pub struct ProbSaferQP
{
    /// \\(P\\)
    pub sym_p: Mat,
    /// \\(q\\)
    pub vec_q: Vec<f64>,
    /// \\(G\\)
    pub mat_g: ConstraintMat,
    /// \\(h\\)
    pub vec_h: Vec<f64>,
    /// Slack weight \\(w\\).
    pub sw: f64,
    /// Slack regularization \\(\epsilon\\).
    pub reg: f64,
    /// Warm-start vector of either \\(x\\) or \\(z\\).
    pub initvals: Option<Vec<f64>>,
}

impl ProbSaferQP
{
    /// Creates a safer QP with given data.
    ///
    /// Returns a [`ProbSaferQP`] instance with \\(\epsilon\\) of [`SAFER_REG_DEFAULT`].
    /// * `sym_p` is \\(P\\).
    /// * `vec_q` is \\(q\\).
    /// * `mat_g` is \\(G\\), or a single row of it.
    /// * `vec_h` is \\(h\\).
    /// * `sw` is \\(w\\).
    pub fn new<M, C>(sym_p: M, vec_q: Vec<f64>, mat_g: C, vec_h: Vec<f64>, sw: f64) -> Self
    where M: Into<Mat>, C: Into<ConstraintMat>
    {
        ProbSaferQP {
            sym_p: sym_p.into(),
            vec_q,
            mat_g: mat_g.into(),
            vec_h,
            sw,
            reg: SAFER_REG_DEFAULT,
            initvals: None,
        }
    }

    /// Sets \\(\epsilon\\).
    pub fn reg(mut self, reg: f64) -> Self
    {
        self.reg = reg;
        self
    }

    /// Sets a warm-start vector.
    ///
    /// A vector of length \\(n\\) is a guess of \\(x\\) and is extended with \\(s = h - G x\\);
    /// a vector of length \\(n + m\\) is taken as \\(z\\) as it is.
    pub fn initvals(mut self, x: Vec<f64>) -> Self
    {
        self.initvals = Some(x);
        self
    }

    /// Number of variables \\(n\\) before relaxation.
    pub fn dim(&self) -> usize
    {
        self.vec_q.len()
    }

    /// Builds the relaxed problem of \\(z = [x; s]\\).
    ///
    /// Returns the augmented [`ProbQP`], or [`QpError::DimensionMismatch`]
    /// if \\(G\\) or \\(h\\) does not fit \\(n\\).
    pub fn augmented(&self) -> Result<ProbQP, QpError>
    {
        let n = self.vec_q.len();
        let m = self.vec_h.len();

        let class = self.sym_p.class();
        let mat_g = self.mat_g.to_mat(class);

        if mat_g.size() != (m, n) {
            log::error!("safer QP: G {:?} does not fit (m, n) = {:?}", mat_g.size(), (m, n));
            return Err(QpError::DimensionMismatch {
                what: "G",
                expected: (m, n),
                found: mat_g.size(),
            });
        }

        let g_class = mat_g.class();

        let sym_p2 = self.sym_p.block_diag(&Mat::identity(m, class).scale(self.reg));

        let mut vec_q2 = self.vec_q.clone();
        vec_q2.extend(std::iter::repeat(-self.sw).take(m));

        // -s <= 0
        let mat_g2 = Mat::zeros(m, n, g_class).hstack(&Mat::identity(m, g_class).scale(-1.));
        let vec_h2 = vec![0.; m];

        // G x + s = h
        let mat_a2 = mat_g.hstack(&Mat::identity(m, g_class));
        let vec_b2 = self.vec_h.clone();

        log::debug!("safer QP: n = {}, m = {}, sw = {:e}, reg = {:e}", n, m, self.sw, self.reg);

        let mut qp = ProbQP::new(sym_p2, vec_q2)
            .ineq(mat_g2, vec_h2)
            .eq(mat_a2, vec_b2);

        if let Some(x0) = &self.initvals {
            if x0.len() == n {
                let gx = mat_g.mul_vec(x0);
                let mut z0 = x0.clone();
                z0.extend(self.vec_h.iter().zip(&gx).map(|(h, g)| h - g));
                qp.initvals = Some(z0);
            }
            else {
                qp.initvals = Some(x0.clone());
            }
        }

        Ok(qp)
    }

    /// Extracts \\(x\\) from a solution \\(z\\) of the relaxed problem.
    pub fn extract(&self, z: &[f64]) -> Vec<f64>
    {
        let n = self.vec_q.len();
        assert!(z.len() >= n);

        z[0.. n].to_vec()
    }
}

//

#[test]
fn test_safer_augmented()
{
    use float_eq::assert_float_eq;
    use crate::MatBuild;

    let g = MatBuild::new(2, 2).iter_rowmaj(&[
        1., 2.,
        3., 4.,
    ]);
    let safer = ProbSaferQP::new(MatBuild::identity(2), vec![-1., 0.], g, vec![5., 6.], 2.)
        .reg(0.5)
        .initvals(vec![1., 1.]);

    let qp = safer.augmented().unwrap();
    assert_eq!(qp.dim(), 4);
    assert_float_eq!(qp.vec_q.as_slice(), [-1., 0., -2., -2.].as_ref(), abs_all <= 1e-12);

    let p2 = qp.sym_p.to_dense();
    assert_float_eq!(p2.row(2).as_slice(), [0., 0., 0.5, 0.].as_ref(), abs_all <= 1e-12);

    let a2 = qp.mat_a.as_ref().unwrap().to_mat(qp.sym_p.class()).to_dense();
    assert_float_eq!(a2.row(1).as_slice(), [3., 4., 0., 1.].as_ref(), abs_all <= 1e-12);

    let g2 = qp.mat_g.as_ref().unwrap().to_mat(qp.sym_p.class()).to_dense();
    assert_float_eq!(g2.row(0).as_slice(), [0., 0., -1., 0.].as_ref(), abs_all <= 1e-12);

    // s = h - G x0
    assert_float_eq!(qp.initvals.unwrap().as_slice(), [1., 1., 2., -1.].as_ref(), abs_all <= 1e-12);

    assert_eq!(safer.extract(&[7., 8., 9., 10.]), vec![7., 8.]);
}

#[test]
fn test_safer_mismatch()
{
    use crate::MatBuild;

    let safer = ProbSaferQP::new(MatBuild::identity(2), vec![0., 0.], vec![1., 1., 1.], vec![1.], 1.);

    assert_eq!(
        safer.augmented().unwrap_err(),
        QpError::DimensionMismatch { what: "G", expected: (1, 2), found: (1, 3) }
    );
}
