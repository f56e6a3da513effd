/*!
Unified entry point to **convex quadratic programming** solvers.

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

This crate normalizes a QP given in a solver-agnostic form and dispatches it
to one of several backends, each of which is compiled in by its cargo feature:

| name       | feature    | matrices | default |
|------------|------------|----------|---------|
| `clarabel` | `clarabel` | sparse   | yes     |
| `osqp`     | `osqp`     | sparse   | no      |
| `quadprog` | `quadprog` | dense    | yes     |
| `totsu`    | `totsu`    | dense    | yes     |

# General usage

1. Express your problem as [`ProbQP`]: \\(P, q\\) with any of \\(G x \preceq h\\), \\(A x = b\\),
   \\(lb \preceq x\\) and \\(x \preceq ub\\).
   Matrices are either dense [`MatBuild`] or sparse [`SparseMat`].
1. Create a [`QpSolver`] instance and optionally set its parameters, a backend name among them.
1. Invoke [`QpSolver::solve`] to get a resulted solution.

Box bounds are folded into \\(G x \preceq h\\) before being passed to a backend,
so every backend supports them.
[`ProbSaferQP`] solved by [`QpSolver::solve_safer`] gives a solution
kept away from the boundary of the inequality constraints.

# Examples

\\[
\begin{array}{ll}
{\rm minimize} & x_0^2 + x_1^2 - 2 x_0 - 5 x_1 \\\\
{\rm subject \ to} & x_0 + 2 x_1 \le 2 \\\\
& x_0 - 4 x_1 \le -3 \\\\
& 5 x_0 + 76 x_1 \le 1
\end{array}
\\]

```
use float_eq::assert_float_eq;
use qpsolvers::prelude::*;

//env_logger::init(); // Use any logger crate as `qpsolvers` uses `log` crate.

let sym_p = MatBuild::identity(2).scale(2.);
let vec_q = vec![-2., -5.];

let mat_g = MatBuild::new(3, 2).iter_rowmaj(&[
    1., 2.,
    1., -4.,
    5., 76.,
]);
let vec_h = vec![2., -3., 1.];

let qp = ProbQP::new(sym_p, vec_q).ineq(mat_g, vec_h);

let s = QpSolver::new().par(|p| {
    p.solver = Some("clarabel".to_string());
});
let x = s.solve(&qp).unwrap().unwrap();

assert_float_eq!(x.as_slice(), [-7. / 3., 1. / 6.].as_ref(), abs_all <= 1e-6);
```
*/

mod matbuild;
mod mat;

pub use matbuild::*;
pub use mat::*;

//

mod error;
mod problem;
mod check;
mod normalize;

pub use error::*;
pub use problem::*;
pub use check::*;
pub use normalize::*;

//

pub mod backend;
pub mod registry;

mod dispatch;
mod solver;

pub use dispatch::*;
pub use solver::*;
pub use registry::{available_solvers, dense_solvers, sparse_solvers};

//

/// Prelude
pub mod prelude
{
   pub use crate::{MatBuild, Mat, MatClass, SparseMat, ConstraintMat};
   pub use crate::{ProbQP, ProbSaferQP, QpSolver, QpParam, QpError};
   pub use crate::{available_solvers, dense_solvers, sparse_solvers};
}
