use float_eq::assert_float_eq;
use qpsolvers::*;

//

fn tol(name: &str) -> f64
{
    match name {
        "clarabel" | "quadprog" => 1e-6,
        _ => 1e-3,
    }
}

fn solver(name: &str) -> QpSolver
{
    QpSolver::new().par(|p| {
        p.solver = Some(name.to_string());
    })
}

//

#[test]
fn test_qp1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let sym_p = MatBuild::identity(2).scale(2.);
    let vec_q = vec![-2., -5.];

    let mat_g = MatBuild::new(3, 2).iter_rowmaj(&[
        1., 2.,
        1., -4.,
        5., 76.,
    ]);
    let vec_h = vec![2., -3., 1.];

    let qp = ProbQP::new(sym_p, vec_q).ineq(mat_g, vec_h);

    for name in available_solvers() {
        let x = solver(name).solve(&qp).unwrap().unwrap();
        println!("{}: {:?}", name, x);

        assert_float_eq!(x.as_slice(), [-7. / 3., 1. / 6.].as_ref(), abs_all <= tol(name));
    }
}

#[test]
fn test_qp1_dense()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let sym_p = MatBuild::identity(2).scale(2.);
    let mat_g = MatBuild::new(3, 2).iter_rowmaj(&[
        1., 2.,
        1., -4.,
        5., 76.,
    ]);

    let qp = ProbQP::new(sym_p, vec![-2., -5.]).ineq(mat_g, vec![2., -3., 1.]);

    let xs: Vec<Vec<f64>> = dense_solvers().iter()
        .map(|name| solver(name).solve(&qp).unwrap().unwrap())
        .collect();

    for (name, x) in dense_solvers().iter().zip(&xs) {
        println!("{}: {:?}", name, x);

        assert_float_eq!(x.as_slice(), [-7. / 3., 1. / 6.].as_ref(), abs_all <= 1e-6);
    }

    // dense backends agree with each other
    for (i, xi) in xs.iter().enumerate() {
        for xj in &xs[i + 1..] {
            assert_float_eq!(xi.as_slice(), xj.as_slice(), abs_all <= 1e-6);
        }
    }
}

#[test]
fn test_qp1_sparse()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let sym_p = Mat::from(MatBuild::identity(2).scale(2.)).to_sparse();
    let mat_g = Mat::from(MatBuild::new(3, 2).iter_rowmaj(&[
        1., 2.,
        1., -4.,
        5., 76.,
    ])).to_sparse();

    let qp = ProbQP::new(sym_p, vec![-2., -5.]).ineq(mat_g, vec![2., -3., 1.]);

    for name in available_solvers() {
        let x = solver(name).solve(&qp).unwrap().unwrap();

        assert_float_eq!(x.as_slice(), [-7. / 3., 1. / 6.].as_ref(), abs_all <= tol(name));
    }
}

#[test]
fn test_qp_eq_row()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // projection of (1, 1) onto x0 + x1 = 1
    let base = ProbQP::new(MatBuild::identity(2), vec![-1., -1.]);
    let qp_row = base.clone().eq(vec![1., 1.], vec![1.]);
    let qp_mat = base.clone().eq(MatBuild::new(1, 2).iter_rowmaj(&[1., 1.]), vec![1.]);

    for name in available_solvers() {
        let x_row = solver(name).solve(&qp_row).unwrap().unwrap();
        let x_mat = solver(name).solve(&qp_mat).unwrap().unwrap();

        assert_float_eq!(x_row.as_slice(), [0.5, 0.5].as_ref(), abs_all <= tol(name));
        assert_float_eq!(x_row.as_slice(), x_mat.as_slice(), abs_all <= tol(name));
    }
}

#[test]
fn test_qp_box()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // unconstrained minimum at (2, -2)
    let qp = ProbQP::new(MatBuild::identity(2), vec![-2., 2.])
        .lb(vec![-1., -1.])
        .ub(vec![1., 1.]);

    for name in available_solvers() {
        let x = solver(name).solve(&qp).unwrap().unwrap();

        assert_float_eq!(x.as_slice(), [1., -1.].as_ref(), abs_all <= tol(name));
    }
}

#[test]
fn test_qp_sym_proj()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // symmetric part is 2I
    let sym_p = MatBuild::new(2, 2).iter_rowmaj(&[
        2., 1.,
        -1., 2.,
    ]);
    let qp = ProbQP::new(sym_p, vec![-2., -5.])
        .ineq(MatBuild::new(3, 2).iter_rowmaj(&[
            1., 2.,
            1., -4.,
            5., 76.,
        ]), vec![2., -3., 1.]);

    for name in available_solvers() {
        let s = solver(name).par(|p| {
            p.sym_proj = true;
        });
        let x = s.solve(&qp).unwrap().unwrap();

        assert_float_eq!(x.as_slice(), [-7. / 3., 1. / 6.].as_ref(), abs_all <= tol(name));
    }
}

#[cfg(feature = "clarabel")]
#[test]
fn test_qp_infeasible()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(1), vec![0.])
        .lb(vec![1.])
        .ub(vec![0.]);

    let rslt = solver("clarabel").par(|p| {
        p.verbose = true;
    }).solve(&qp);

    assert_eq!(rslt, Ok(None));
}

#[cfg(feature = "osqp")]
#[test]
fn test_qp_initvals()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![-1., -1.])
        .eq(vec![1., 1.], vec![1.])
        .initvals(vec![0.5, 0.5]);

    let x = solver("osqp").solve(&qp).unwrap().unwrap();

    assert_float_eq!(x.as_slice(), [0.5, 0.5].as_ref(), abs_all <= 1e-3);
}

#[test]
fn test_qp_unknown()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.]);

    assert_eq!(solver("foo").solve(&qp), Err(QpError::UnknownSolver("foo".to_string())));
}

#[cfg(not(feature = "osqp"))]
#[test]
fn test_qp_unavailable()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.]);

    assert_eq!(solver("osqp").solve(&qp), Err(QpError::SolverUnavailable("osqp".to_string())));
}

#[test]
fn test_qp_dimension_mismatch()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.])
        .lb(vec![0., 0., 0.]);

    for name in available_solvers() {
        assert_eq!(
            solver(name).solve(&qp),
            Err(QpError::DimensionMismatch {what: "lb", expected: (2, 1), found: (3, 1)})
        );
    }
}
