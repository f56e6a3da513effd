use std::ops::{Index, IndexMut, Deref};

//

/// Dense matrix builder
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
///
/// Matrix struct which owns a `Vec` of `f64` data array in column-major order.
/// Every operation that changes the shape returns a new instance;
/// `set_*` methods modify in place and have builder-pattern counterparts.
#[derive(Debug, Clone, PartialEq)]
pub struct MatBuild
{
    nrows: usize,
    ncols: usize,
    array: Vec<f64>,
}

impl MatBuild
{
    /// Creates an instance.
    ///
    /// Returns the [`MatBuild`] instance with zero data.
    /// * `nrows` is a number of rows.
    /// * `ncols` is a number of columns.
    pub fn new(nrows: usize, ncols: usize) -> Self
    {
        MatBuild {
            nrows,
            ncols,
            array: vec![0.; nrows * ncols],
        }
    }

    /// Creates an identity matrix \\(I_n\\).
    pub fn identity(n: usize) -> Self
    {
        MatBuild::new(n, n).by_fn(|r, c| if r == c {1.} else {0.})
    }

    /// Creates a one-row matrix from a vector.
    pub fn from_row(row: &[f64]) -> Self
    {
        MatBuild::new(1, row.len()).iter_rowmaj(row)
    }

    /// Size of the matrix.
    ///
    /// Returns a tuple of a number of rows and columns.
    pub fn size(&self) -> (usize, usize)
    {
        (self.nrows, self.ncols)
    }

    /// Data by a function.
    ///
    /// * `func` takes a row and a column of the matrix and returns data of each element.
    pub fn set_by_fn<M>(&mut self, mut func: M)
    where M: FnMut(usize, usize) -> f64
    {
        for c in 0.. self.ncols {
            for r in 0.. self.nrows {
                self[(r, c)] = func(r, c);
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_by_fn`].
    pub fn by_fn<M>(mut self, func: M) -> Self
    where M: FnMut(usize, usize) -> f64
    {
        self.set_by_fn(func);
        self
    }

    /// Data by an iterator in column-major.
    ///
    /// * `iter` iterates matrix data in column-major.
    pub fn set_iter_colmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=f64>
    {
        let mut i = iter.into_iter();

        for c in 0.. self.ncols {
            for r in 0.. self.nrows {
                if let Some(v) = i.next() {
                    self[(r, c)] = *v;
                }
                else {
                    return;
                }
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_colmaj`].
    pub fn iter_colmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=f64>
    {
        self.set_iter_colmaj(iter);
        self
    }

    /// Data by an iterator in row-major.
    ///
    /// * `iter` iterates matrix data in row-major.
    pub fn set_iter_rowmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=f64>
    {
        let mut i = iter.into_iter();

        for r in 0.. self.nrows {
            for c in 0.. self.ncols {
                if let Some(v) = i.next() {
                    self[(r, c)] = *v;
                }
                else {
                    return;
                }
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_rowmaj`].
    pub fn iter_rowmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=f64>
    {
        self.set_iter_rowmaj(iter);
        self
    }

    /// Scales by \\(\alpha\\).
    ///
    /// * `alpha` is a scalar \\(\alpha\\).
    pub fn set_scale(&mut self, alpha: f64)
    {
        for v in self.array.iter_mut() {
            *v *= alpha;
        }
    }
    /// Builder pattern of [`MatBuild::set_scale`].
    pub fn scale(mut self, alpha: f64) -> Self
    {
        self.set_scale(alpha);
        self
    }

    /// Projects onto the symmetric part \\({1 \over 2}(A + A^T)\\).
    ///
    /// The matrix shall be square.
    pub fn set_sym_proj(&mut self)
    {
        assert_eq!(self.nrows, self.ncols);

        let n = self.nrows;
        for c in 0.. n {
            for r in 0.. c {
                let v = 0.5 * (self[(r, c)] + self[(c, r)]);
                self[(r, c)] = v;
                self[(c, r)] = v;
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_sym_proj`].
    pub fn sym_proj(mut self) -> Self
    {
        self.set_sym_proj();
        self
    }

    /// Transposed copy \\(A^T\\).
    pub fn transpose(&self) -> Self
    {
        MatBuild::new(self.ncols, self.nrows).by_fn(|r, c| self[(c, r)])
    }

    /// Row-wise concatenation \\(\left[ \begin{array}{c} A \\\\ B \end{array} \right]\\).
    ///
    /// Both matrices shall have the same number of columns.
    pub fn vstack(&self, other: &MatBuild) -> Self
    {
        assert_eq!(self.ncols, other.ncols);

        let nr = self.nrows;
        MatBuild::new(nr + other.nrows, self.ncols).by_fn(|r, c| {
            if r < nr {
                self[(r, c)]
            }
            else {
                other[(r - nr, c)]
            }
        })
    }

    /// Column-wise concatenation \\(\left[ \begin{array}{cc} A & B \end{array} \right]\\).
    ///
    /// Both matrices shall have the same number of rows.
    pub fn hstack(&self, other: &MatBuild) -> Self
    {
        assert_eq!(self.nrows, other.nrows);

        // column-major: columns of `other` simply follow
        let mut array = self.array.clone();
        array.extend_from_slice(&other.array);

        MatBuild {
            nrows: self.nrows,
            ncols: self.ncols + other.ncols,
            array,
        }
    }

    /// Block-diagonal matrix \\({\rm diag}(A, B)\\).
    pub fn block_diag(&self, other: &MatBuild) -> Self
    {
        let (nr, nc) = self.size();
        let (mr, mc) = other.size();

        MatBuild::new(nr + mr, nc + mc).by_fn(|r, c| {
            if r < nr && c < nc {
                self[(r, c)]
            }
            else if r >= nr && c >= nc {
                other[(r - nr, c - nc)]
            }
            else {
                0.
            }
        })
    }

    /// Checks if symmetric within an absolute tolerance.
    pub fn is_symmetric(&self, eps: f64) -> bool
    {
        if self.nrows != self.ncols {
            return false;
        }

        (0.. self.ncols).all(|c| {
            (0.. c).all(|r| (self[(r, c)] - self[(c, r)]).abs() <= eps)
        })
    }

    /// Matrix-vector product \\(Ax\\).
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64>
    {
        assert_eq!(self.ncols, x.len());

        let mut y = vec![0.; self.nrows];
        for (c, xc) in x.iter().enumerate() {
            let col = &self.array[c * self.nrows.. (c + 1) * self.nrows];
            for (yr, a) in y.iter_mut().zip(col) {
                *yr += a * xc;
            }
        }
        y
    }

    /// Copy of a row.
    pub fn row(&self, r: usize) -> Vec<f64>
    {
        (0.. self.ncols).map(|c| self[(r, c)]).collect()
    }

    fn index(&self, (r, c): (usize, usize)) -> usize
    {
        assert!(r < self.nrows);
        assert!(c < self.ncols);

        c * self.nrows + r
    }
}

//

impl Index<(usize, usize)> for MatBuild
{
    type Output = f64;
    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        let i = self.index(index);

        &self.array[i]
    }
}

impl IndexMut<(usize, usize)> for MatBuild
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output
    {
        let i = self.index(index);

        &mut self.array[i]
    }
}

//

// column-major data
impl AsRef<[f64]> for MatBuild
{
    fn as_ref(&self) -> &[f64]
    {
        &self.array
    }
}

//

impl core::fmt::Display for MatBuild
{
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error>
    {
        let (nr, nc) = self.size();
        if nr == 0 || nc == 0 {
            write!(f, "[ ]")?;
        }
        else {
            write!(f, "[ {:.3e}", self[(0, 0)])?;
            if nc > 2 {
                write!(f, " ...")?;
            }
            if nc > 1 {
                write!(f, " {:.3e}", self[(0, nc - 1)])?;
            }

            if nr > 2 {
                writeln!(f)?;
                write!(f, "  ...")?;
            }

            if nr > 1 {
                writeln!(f)?;
                write!(f, "  {:.3e}", self[(nr - 1, 0)])?;
                if nc > 2 {
                    write!(f, " ...")?;
                }
                if nc > 1 {
                    write!(f, " {:.3e}", self[(nr - 1, nc - 1)])?;
                }
            }
            write!(f, " ]")?;
        }

        write!(f, " ({} x {})", nr, nc)
    }
}

//

#[test]
fn test_matbuild1()
{
    use float_eq::assert_float_eq;

    let m = MatBuild::new(2, 3).iter_rowmaj(&[
        1., 2., 3.,
        4., 5., 6.,
    ]);

    // column-major
    assert_float_eq!(m.as_ref(), [1., 4., 2., 5., 3., 6.].as_ref(), abs_all <= 1e-12);

    let t = m.transpose();
    assert_eq!(t.size(), (3, 2));
    assert_float_eq!(t.row(2).as_slice(), [3., 6.].as_ref(), abs_all <= 1e-12);

    let y = m.mul_vec(&[1., 0., -1.]);
    assert_float_eq!(y.as_slice(), [-2., -2.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_matbuild2()
{
    use float_eq::assert_float_eq;

    let a = MatBuild::new(1, 2).iter_rowmaj(&[1., 2.]);
    let b = MatBuild::identity(2).scale(-1.);

    let v = a.vstack(&b);
    assert_eq!(v.size(), (3, 2));
    assert_float_eq!(v.row(0).as_slice(), [1., 2.].as_ref(), abs_all <= 1e-12);
    assert_float_eq!(v.row(2).as_slice(), [0., -1.].as_ref(), abs_all <= 1e-12);

    let h = a.hstack(&MatBuild::from_row(&[3.]));
    assert_float_eq!(h.row(0).as_slice(), [1., 2., 3.].as_ref(), abs_all <= 1e-12);

    let d = MatBuild::identity(1).block_diag(&MatBuild::identity(2).scale(5.));
    assert_eq!(d.size(), (3, 3));
    assert_float_eq!(d.row(1).as_slice(), [0., 5., 0.].as_ref(), abs_all <= 1e-12);
    assert_float_eq!(d.row(0).as_slice(), [1., 0., 0.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_matbuild3()
{
    let p = MatBuild::new(2, 2).iter_rowmaj(&[
        1., 3.,
        1., 2.,
    ]);
    assert!(!p.is_symmetric(1e-12));

    let s = p.sym_proj();
    assert!(s.is_symmetric(1e-12));
    assert_eq!(s[(0, 1)], 2.);
    assert_eq!(s[(1, 0)], 2.);
    assert_eq!(s[(1, 1)], 2.);
}
