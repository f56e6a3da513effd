use qpsolvers::*;
use qpsolvers::backend::Capability;

//

#[test]
fn test_default_features()
{
    let _ = env_logger::builder().is_test(true).try_init();

    assert_eq!(registry::is_available("clarabel"), cfg!(feature = "clarabel"));
    assert_eq!(registry::is_available("osqp"), cfg!(feature = "osqp"));
    assert_eq!(registry::is_available("quadprog"), cfg!(feature = "quadprog"));
    assert_eq!(registry::is_available("totsu"), cfg!(feature = "totsu"));

    assert_eq!(dense_solvers().contains(&registry::DEFAULT_DENSE_SOLVER), cfg!(feature = "totsu"));
    assert_eq!(sparse_solvers().contains(&registry::DEFAULT_SOLVER), cfg!(feature = "clarabel"));
}

#[test]
fn test_capability()
{
    for (name, cap) in registry::SOLVERS.iter() {
        assert_eq!(registry::capability(name), Ok(*cap));
    }
    assert_eq!(registry::capability("osqp"), Ok(Capability::Sparse));
    assert_eq!(registry::capability("quadprog"), Ok(Capability::Dense));
    assert_eq!(registry::capability("totsu"), Ok(Capability::Dense));
}

#[test]
fn test_enumeration_order()
{
    let names: Vec<&str> = registry::SOLVERS.iter().map(|(n, _)| *n).collect();

    let mut prev = None;
    for s in available_solvers() {
        let i = names.iter().position(|n| n == s).unwrap();
        if let Some(p) = prev {
            assert!(p < i);
        }
        prev = Some(i);
    }
}

#[test]
fn test_set_verbosity()
{
    let _ = env_logger::builder().is_test(true).try_init();

    for (name, _) in registry::SOLVERS.iter() {
        // silent for unavailable ones
        assert_eq!(registry::set_verbosity(name, false), Ok(()));
    }
    assert!(registry::set_verbosity("foo", true).is_err());
}

#[test]
fn test_backend_access()
{
    for (name, _) in registry::SOLVERS.iter() {
        match registry::backend(name) {
            Ok(_) => assert!(registry::is_available(name)),
            Err(e) => assert_eq!(e, QpError::SolverUnavailable(name.to_string())),
        }
    }
}

#[cfg(feature = "totsu")]
#[test]
fn test_backend_direct()
{
    use float_eq::assert_float_eq;
    use qpsolvers::backend::Backend;

    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![-1., -1.]).ub(vec![0.5, 2.]);
    let data = normalize(&qp, false).unwrap();

    let x = registry::backend("totsu").unwrap().solve(&data, None).unwrap();

    assert_float_eq!(x.as_slice(), [0.5, 1.].as_ref(), abs_all <= 1e-3);
}
