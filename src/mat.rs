use sprs::{CsMat, TriMat};
use crate::MatBuild;

//

/// Sparse matrix in CSC format.
pub type SparseMat = CsMat<f64>;

/// Sparsity class of a matrix.
///
/// Transformations applied by this crate never change the class of the matrix they act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatClass
{
    Dense,
    Sparse,
}

/// Rank-2 matrix, either dense or sparse.
#[derive(Debug, Clone)]
pub enum Mat
{
    Dense(MatBuild),
    Sparse(SparseMat),
}

pub(crate) fn sparse_from_triplets<I>(nrows: usize, ncols: usize, triplets: I) -> SparseMat
where I: IntoIterator<Item=(usize, usize, f64)>
{
    let mut tri = TriMat::new((nrows, ncols));
    for (r, c, v) in triplets {
        tri.add_triplet(r, c, v);
    }
    tri.to_csc()
}

impl Mat
{
    /// Identity matrix \\(I_n\\) of the given class.
    pub fn identity(n: usize, class: MatClass) -> Self
    {
        match class {
            MatClass::Dense => Mat::Dense(MatBuild::identity(n)),
            MatClass::Sparse => Mat::Sparse(sparse_from_triplets(n, n, (0.. n).map(|i| (i, i, 1.)))),
        }
    }

    /// Zero matrix of the given class.
    pub fn zeros(nrows: usize, ncols: usize, class: MatClass) -> Self
    {
        match class {
            MatClass::Dense => Mat::Dense(MatBuild::new(nrows, ncols)),
            MatClass::Sparse => Mat::Sparse(sparse_from_triplets(nrows, ncols, std::iter::empty())),
        }
    }

    pub fn class(&self) -> MatClass
    {
        match self {
            Mat::Dense(_) => MatClass::Dense,
            Mat::Sparse(_) => MatClass::Sparse,
        }
    }

    /// Size of the matrix.
    ///
    /// Returns a tuple of a number of rows and columns.
    pub fn size(&self) -> (usize, usize)
    {
        match self {
            Mat::Dense(m) => m.size(),
            Mat::Sparse(m) => (m.rows(), m.cols()),
        }
    }

    /// Entries as `(row, column, value)`.
    ///
    /// Zeros of a dense matrix are skipped; stored entries of a sparse matrix are all listed.
    pub fn triplets(&self) -> Vec<(usize, usize, f64)>
    {
        match self {
            Mat::Dense(m) => {
                let (nr, nc) = m.size();
                let mut t = Vec::new();
                for c in 0.. nc {
                    for r in 0.. nr {
                        if m[(r, c)] != 0. {
                            t.push((r, c, m[(r, c)]));
                        }
                    }
                }
                t
            },
            Mat::Sparse(m) => {
                m.iter().map(|(v, (r, c))| (r, c, *v)).collect()
            },
        }
    }

    /// Dense copy.
    pub fn to_dense(&self) -> MatBuild
    {
        match self {
            Mat::Dense(m) => m.clone(),
            Mat::Sparse(m) => {
                let mut d = MatBuild::new(m.rows(), m.cols());
                for (v, (r, c)) in m.iter() {
                    d[(r, c)] += *v;
                }
                d
            },
        }
    }

    /// Sparse copy.
    pub fn to_sparse(&self) -> SparseMat
    {
        match self {
            Mat::Dense(_) => {
                let (nr, nc) = self.size();
                sparse_from_triplets(nr, nc, self.triplets())
            },
            Mat::Sparse(m) => m.clone(),
        }
    }

    /// Copy converted into the given class.
    pub fn to_class(&self, class: MatClass) -> Self
    {
        match class {
            MatClass::Dense => Mat::Dense(self.to_dense()),
            MatClass::Sparse => Mat::Sparse(self.to_sparse()),
        }
    }

    /// Scaled copy \\(\alpha A\\).
    pub fn scale(&self, alpha: f64) -> Self
    {
        match self {
            Mat::Dense(m) => Mat::Dense(m.clone().scale(alpha)),
            Mat::Sparse(m) => {
                let t = m.iter().map(|(v, (r, c))| (r, c, alpha * *v));
                Mat::Sparse(sparse_from_triplets(m.rows(), m.cols(), t))
            },
        }
    }

    /// Transposed copy \\(A^T\\).
    pub fn transpose(&self) -> Self
    {
        match self {
            Mat::Dense(m) => Mat::Dense(m.transpose()),
            Mat::Sparse(m) => {
                let t = m.iter().map(|(v, (r, c))| (c, r, *v));
                Mat::Sparse(sparse_from_triplets(m.cols(), m.rows(), t))
            },
        }
    }

    /// Symmetric projection \\({1 \over 2}(A + A^T)\\) of a square matrix.
    pub fn sym_proj(&self) -> Self
    {
        match self {
            Mat::Dense(m) => Mat::Dense(m.clone().sym_proj()),
            Mat::Sparse(m) => {
                assert_eq!(m.rows(), m.cols());

                // duplicates are summed up on conversion
                let t = m.iter().flat_map(|(v, (r, c))| {
                    let h = 0.5 * *v;
                    [(r, c, h), (c, r, h)]
                });
                Mat::Sparse(sparse_from_triplets(m.rows(), m.cols(), t))
            },
        }
    }

    /// Row-wise concatenation \\(\left[ \begin{array}{c} A \\\\ B \end{array} \right]\\).
    ///
    /// The result has the class of `self`.
    pub fn vstack(&self, other: &Mat) -> Self
    {
        match self {
            Mat::Dense(m) => Mat::Dense(m.vstack(&other.to_dense())),
            Mat::Sparse(m) => {
                let (nr, nc) = (m.rows(), m.cols());
                let (or, oc) = other.size();
                assert_eq!(nc, oc);

                let t = self.triplets().into_iter()
                    .chain(other.triplets().into_iter().map(|(r, c, v)| (r + nr, c, v)));
                Mat::Sparse(sparse_from_triplets(nr + or, nc, t))
            },
        }
    }

    /// Column-wise concatenation \\(\left[ \begin{array}{cc} A & B \end{array} \right]\\).
    ///
    /// The result has the class of `self`.
    pub fn hstack(&self, other: &Mat) -> Self
    {
        match self {
            Mat::Dense(m) => Mat::Dense(m.hstack(&other.to_dense())),
            Mat::Sparse(m) => {
                let (nr, nc) = (m.rows(), m.cols());
                let (or, oc) = other.size();
                assert_eq!(nr, or);

                let t = self.triplets().into_iter()
                    .chain(other.triplets().into_iter().map(|(r, c, v)| (r, c + nc, v)));
                Mat::Sparse(sparse_from_triplets(nr, nc + oc, t))
            },
        }
    }

    /// Block-diagonal matrix \\({\rm diag}(A, B)\\).
    ///
    /// The result has the class of `self`.
    pub fn block_diag(&self, other: &Mat) -> Self
    {
        match self {
            Mat::Dense(m) => Mat::Dense(m.block_diag(&other.to_dense())),
            Mat::Sparse(m) => {
                let (nr, nc) = (m.rows(), m.cols());
                let (or, oc) = other.size();

                let t = self.triplets().into_iter()
                    .chain(other.triplets().into_iter().map(|(r, c, v)| (r + nr, c + nc, v)));
                Mat::Sparse(sparse_from_triplets(nr + or, nc + oc, t))
            },
        }
    }

    /// Matrix-vector product \\(Ax\\).
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64>
    {
        match self {
            Mat::Dense(m) => m.mul_vec(x),
            Mat::Sparse(m) => {
                assert_eq!(m.cols(), x.len());

                let mut y = vec![0.; m.rows()];
                for (v, (r, c)) in m.iter() {
                    y[r] += *v * x[c];
                }
                y
            },
        }
    }
}

impl From<MatBuild> for Mat
{
    fn from(m: MatBuild) -> Self
    {
        Mat::Dense(m)
    }
}

impl From<SparseMat> for Mat
{
    fn from(m: SparseMat) -> Self
    {
        Mat::Sparse(m)
    }
}

//

/// Constraint matrix as given by a caller.
///
/// A [`ConstraintMat::Row`] is a one-dimensional vector without a row dimension,
/// that is a single constraint row. It is reshaped into a one-row [`Mat`] by normalization.
#[derive(Debug, Clone)]
pub enum ConstraintMat
{
    Mat(Mat),
    Row(Vec<f64>),
}

impl ConstraintMat
{
    /// Size of the matrix, as \\(1 \times n\\) if unshaped.
    pub fn size(&self) -> (usize, usize)
    {
        match self {
            ConstraintMat::Mat(m) => m.size(),
            ConstraintMat::Row(v) => (1, v.len()),
        }
    }

    /// Number of columns, as the length of a row if unshaped.
    pub fn ncols(&self) -> usize
    {
        self.size().1
    }

    /// Reshapes into a rank-2 matrix.
    ///
    /// An unshaped row becomes a \\(1 \times n\\) matrix of the given class;
    /// a matrix is returned as it is.
    pub fn to_mat(&self, class: MatClass) -> Mat
    {
        match self {
            ConstraintMat::Mat(m) => m.clone(),
            ConstraintMat::Row(v) => Mat::Dense(MatBuild::from_row(v)).to_class(class),
        }
    }
}

impl From<Mat> for ConstraintMat
{
    fn from(m: Mat) -> Self
    {
        ConstraintMat::Mat(m)
    }
}

impl From<MatBuild> for ConstraintMat
{
    fn from(m: MatBuild) -> Self
    {
        ConstraintMat::Mat(Mat::Dense(m))
    }
}

impl From<SparseMat> for ConstraintMat
{
    fn from(m: SparseMat) -> Self
    {
        ConstraintMat::Mat(Mat::Sparse(m))
    }
}

impl From<Vec<f64>> for ConstraintMat
{
    fn from(v: Vec<f64>) -> Self
    {
        ConstraintMat::Row(v)
    }
}

//

#[test]
fn test_mat_sparse_ops()
{
    use float_eq::assert_float_eq;

    let g = Mat::from(MatBuild::new(2, 3).iter_rowmaj(&[
        1., 0., 2.,
        0., 3., 0.,
    ]));
    let gs = Mat::Sparse(g.to_sparse());
    assert_eq!(gs.class(), MatClass::Sparse);

    let v = gs.vstack(&Mat::identity(3, MatClass::Dense).scale(-1.));
    assert_eq!(v.class(), MatClass::Sparse);
    assert_eq!(v.size(), (5, 3));

    let d = v.to_dense();
    assert_float_eq!(d.row(0).as_slice(), [1., 0., 2.].as_ref(), abs_all <= 1e-12);
    assert_float_eq!(d.row(4).as_slice(), [0., 0., -1.].as_ref(), abs_all <= 1e-12);

    let t = gs.transpose().to_dense();
    assert_float_eq!(t.row(2).as_slice(), [2., 0.].as_ref(), abs_all <= 1e-12);

    let y = gs.mul_vec(&[1., 1., 1.]);
    assert_float_eq!(y.as_slice(), [3., 3.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_mat_sparse_sym_proj()
{
    let p = Mat::from(MatBuild::new(2, 2).iter_rowmaj(&[
        4., 2.,
        0., 1.,
    ]));
    let ps = Mat::Sparse(p.to_sparse()).sym_proj();
    assert_eq!(ps.class(), MatClass::Sparse);

    let d = ps.to_dense();
    assert!(d.is_symmetric(1e-12));
    assert_eq!(d, p.sym_proj().to_dense());
}

#[test]
fn test_constraint_row()
{
    let a = ConstraintMat::from(vec![1., 2., 3.]);
    assert_eq!(a.ncols(), 3);

    let m = a.to_mat(MatClass::Sparse);
    assert_eq!(m.class(), MatClass::Sparse);
    assert_eq!(m.size(), (1, 3));
}
