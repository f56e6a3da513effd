use float_eq::assert_float_eq;
use qpsolvers::*;

//

// minimize (x0 - 2)^2 / 2 + x1^2 / 2 s.t. x0 <= 1, whose constraint is tight at (1, 0)
fn tight_problem() -> (ProbQP, ProbSaferQP)
{
    let sym_p = MatBuild::identity(2);
    let vec_q = vec![-2., 0.];
    let mat_g = MatBuild::new(1, 2).iter_rowmaj(&[1., 0.]);
    let vec_h = vec![1.];

    let qp = ProbQP::new(sym_p.clone(), vec_q.clone())
        .ineq(mat_g.clone(), vec_h.clone());
    let safer = ProbSaferQP::new(sym_p, vec_q, mat_g, vec_h, 1.5);

    (qp, safer)
}

#[cfg(feature = "totsu")]
#[test]
fn test_safer_interior()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (qp, safer) = tight_problem();
    let s = QpSolver::new().par(|p| {
        p.solver = Some("totsu".to_string());
    });

    let x_opt = s.solve(&qp).unwrap().unwrap();
    assert_float_eq!(x_opt.as_slice(), [1., 0.].as_ref(), abs_all <= 1e-3);

    let x_safe = s.solve_safer(&safer).unwrap();
    println!("{:?}", x_safe);
    assert_float_eq!(x_safe.as_slice(), [0.5, 0.].as_ref(), abs_all <= 1e-3);

    // strictly slack now
    let s_opt = 1. - x_opt[0];
    let s_safe = 1. - x_safe[0];
    assert!(s_safe > 0.1);

    // bounded objective increase
    let inc = qp.objective(&x_safe) - qp.objective(&x_opt);
    let bound = safer.sw * (s_safe - s_opt) + 0.5 * safer.reg * s_opt * s_opt;
    assert!(inc > 0.);
    assert!(inc <= bound + 1e-3);
}

#[cfg(feature = "totsu")]
#[test]
fn test_safer_default_solver()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // single row of G, warm start ignored by the default dense solver
    let safer = ProbSaferQP::new(MatBuild::identity(2), vec![-2., 0.], vec![1., 0.], vec![1.], 1.5)
        .initvals(vec![0., 0.]);

    let x = QpSolver::new().solve_safer(&safer).unwrap();

    assert_float_eq!(x.as_slice(), [0.5, 0.].as_ref(), abs_all <= 1e-3);
}

#[cfg(feature = "clarabel")]
#[test]
#[should_panic]
fn test_safer_sparse_solver()
{
    let (_, safer) = tight_problem();
    let s = QpSolver::new().par(|p| {
        p.solver = Some("clarabel".to_string());
    });

    let _ = s.solve_safer(&safer);
}

#[test]
#[should_panic]
fn test_safer_unknown_solver()
{
    let (_, safer) = tight_problem();
    let s = QpSolver::new().par(|p| {
        p.solver = Some("foo".to_string());
    });

    let _ = s.solve_safer(&safer);
}

#[test]
fn test_safer_augmented_normalizes()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let (_, safer) = tight_problem();
    let qp = safer.augmented().unwrap();
    let data = normalize(&qp, false).unwrap();

    assert_eq!(data.dim(), 3);
    assert_eq!(data.n_ineq(), 1);
    assert_eq!(data.n_eq(), 1);

    // x on the boundary with zero slack is feasible for the relaxed problem
    let z = [1., 0., 0.];
    let (a, b) = data.eq.unwrap();
    assert_float_eq!(a.mul_vec(&z).as_slice(), b.as_slice(), abs_all <= 1e-12);
    let (g, h) = data.ineq.unwrap();
    assert!(g.mul_vec(&z).iter().zip(&h).all(|(l, r)| l <= r));
}
