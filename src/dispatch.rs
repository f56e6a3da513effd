use crate::{QpData, QpError, registry};

/// Routes a normalized QP to a backend.
///
/// Returns `Ok(Some(x))` with a solution, `Ok(None)` if the backend found none,
/// or an error if the backend is unknown or unavailable.
/// * `name` is a backend name of [`registry::SOLVERS`].
/// * `data` is the normalized problem.
/// * `initvals` is a warm-start vector passed to the backend as it is.
/// * `verbose` is set to the backend before solving.
pub fn dispatch(name: &str, data: &QpData, initvals: Option<&[f64]>, verbose: bool) -> Result<Option<Vec<f64>>, QpError>
{
    let backend = registry::backend(name)?;

    backend.set_verbosity(verbose);
    log::debug!("dispatch to {}", name);

    let x = backend.solve(data, initvals);
    if x.is_none() {
        log::debug!("{}: no solution", name);
    }

    Ok(x)
}

//

#[test]
fn test_dispatch_errors()
{
    use crate::{MatBuild, ProbQP, normalize};

    let _ = env_logger::builder().is_test(true).try_init();

    let qp = ProbQP::new(MatBuild::identity(2), vec![-1., -1.]);
    let data = normalize(&qp, false).unwrap();

    assert_eq!(dispatch("foo", &data, None, false), Err(QpError::UnknownSolver("foo".to_string())));

    #[cfg(not(feature = "osqp"))]
    assert_eq!(dispatch("osqp", &data, None, false), Err(QpError::SolverUnavailable("osqp".to_string())));
}
