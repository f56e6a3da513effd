use float_eq::assert_float_eq;
use qpsolvers::*;

//

fn sparse(m: MatBuild) -> SparseMat
{
    Mat::from(m).to_sparse()
}

//

#[test]
fn test_fold_lb()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(3), vec![1., 1., 1.])
        .lb(vec![1., 2., 3.]);
    let data = normalize(&qp, false).unwrap();

    let (g, h) = data.ineq.unwrap();
    assert_eq!(g.size(), (3, 3));
    assert_eq!(g.to_dense(), MatBuild::identity(3).scale(-1.));
    assert_float_eq!(h.as_slice(), [-1., -2., -3.].as_ref(), abs_all <= 1e-12);
    assert!(data.eq.is_none());
}

#[test]
fn test_fold_ub()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![1., 1.])
        .ub(vec![4., 5.]);
    let data = normalize(&qp, false).unwrap();

    let (g, h) = data.ineq.unwrap();
    assert_eq!(g.to_dense(), MatBuild::identity(2));
    assert_float_eq!(h.as_slice(), [4., 5.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_fold_lb_ub_with_ineq()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 3;
    let m = 2;

    let mat_g = MatBuild::new(m, n).iter_rowmaj(&[
        1., 2., 3.,
        4., 5., 6.,
    ]);
    let qp = ProbQP::new(MatBuild::identity(n), vec![0.; n])
        .ineq(mat_g.clone(), vec![7., 8.])
        .lb(vec![-1., -2., -3.])
        .ub(vec![1., 2., 3.]);
    let data = normalize(&qp, false).unwrap();

    let (g, h) = data.ineq.unwrap();
    assert_eq!(g.size(), (m + 2 * n, n));

    let g = g.to_dense();
    for r in 0.. m {
        assert_eq!(g.row(r), mat_g.row(r));
    }
    // lower first, then upper
    for i in 0.. n {
        let mut e = vec![0.; n];
        e[i] = -1.;
        assert_eq!(g.row(m + i), e);
        e[i] = 1.;
        assert_eq!(g.row(m + n + i), e);
    }

    assert_float_eq!(h.as_slice(), [7., 8., 1., 2., 3., 1., 2., 3.].as_ref(), abs_all <= 1e-12);

    // untouched
    assert_eq!(qp.mat_g.unwrap().size(), (m, n));
    assert_eq!(qp.vec_h.unwrap().len(), m);
}

#[test]
fn test_fold_class()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mat_g = MatBuild::new(1, 2).iter_rowmaj(&[1., 1.]);

    // sparse G with dense P stays sparse
    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.])
        .ineq(sparse(mat_g.clone()), vec![1.])
        .lb(vec![0., 0.]);
    let (g, _) = normalize(&qp, false).unwrap().ineq.unwrap();
    assert_eq!(g.class(), MatClass::Sparse);
    assert_eq!(g.size(), (3, 2));

    // dense G with sparse P stays dense
    let qp = ProbQP::new(sparse(MatBuild::identity(2)), vec![0., 0.])
        .ineq(mat_g.clone(), vec![1.])
        .ub(vec![1., 1.]);
    let (g, _) = normalize(&qp, false).unwrap().ineq.unwrap();
    assert_eq!(g.class(), MatClass::Dense);

    // no G takes the class of P
    let qp = ProbQP::new(sparse(MatBuild::identity(2)), vec![0., 0.])
        .lb(vec![0., 0.])
        .ub(vec![1., 1.]);
    let data = normalize(&qp, false).unwrap();
    assert_eq!(data.sym_p.class(), MatClass::Sparse);
    let (g, h) = data.ineq.unwrap();
    assert_eq!(g.class(), MatClass::Sparse);
    assert_eq!(g.size(), (4, 2));
    assert_float_eq!(h.as_slice(), [0., 0., 1., 1.].as_ref(), abs_all <= 1e-12);
}

#[test]
fn test_row_reshape()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(3), vec![0.; 3])
        .eq(vec![1., 2., 3.], vec![1.])
        .ineq(vec![0., 1., 0.], vec![2.]);
    let data = normalize(&qp, false).unwrap();

    let (a, b) = data.eq.unwrap();
    assert_eq!(a.size(), (1, 3));
    assert_eq!(a.class(), MatClass::Dense);
    assert_eq!(a.to_dense().row(0), vec![1., 2., 3.]);
    assert_eq!(b, vec![1.]);

    let (g, _) = data.ineq.unwrap();
    assert_eq!(g.size(), (1, 3));

    // row of sparse P becomes sparse
    let qp = ProbQP::new(sparse(MatBuild::identity(3)), vec![0.; 3])
        .eq(vec![1., 2., 3.], vec![1.]);
    let (a, _) = normalize(&qp, false).unwrap().eq.unwrap();
    assert_eq!(a.class(), MatClass::Sparse);
    assert_eq!(a.size(), (1, 3));
}

#[test]
fn test_sym_proj()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let p = MatBuild::new(2, 2).iter_rowmaj(&[
        2., 1.,
        3., 4.,
    ]);
    let expected = MatBuild::new(2, 2).iter_rowmaj(&[
        2., 2.,
        2., 4.,
    ]);

    let qp = ProbQP::new(p.clone(), vec![0., 0.]);

    let data = normalize(&qp, true).unwrap();
    let sym_p = data.sym_p.to_dense();
    assert_eq!(sym_p, sym_p.transpose());
    assert_eq!(sym_p, expected);

    let data = normalize(&qp, false).unwrap();
    assert_eq!(data.sym_p.to_dense(), p);

    let qp = ProbQP::new(sparse(p), vec![0., 0.]);
    let data = normalize(&qp, true).unwrap();
    assert_eq!(data.sym_p.class(), MatClass::Sparse);
    assert_eq!(data.sym_p.to_dense(), expected);
}

#[test]
fn test_validator_through_normalize()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let mut qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.]);
    qp.vec_b = Some(vec![1.]);

    assert_eq!(
        normalize(&qp, false).unwrap_err(),
        QpError::IncompleteConstraint {kind: ConstraintKind::Equality, missing: "A"}
    );

    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.])
        .ineq(MatBuild::new(2, 3), vec![1., 1.]);
    assert_eq!(
        normalize(&qp, false).unwrap_err(),
        QpError::DimensionMismatch {what: "G", expected: (2, 2), found: (2, 3)}
    );
}
