use crate::{ProbQP, QpError, ConstraintKind};

//

fn check_pair<M, V>(kind: ConstraintKind, mat: &Option<M>, mat_name: &'static str, vec: &Option<V>, vec_name: &'static str) -> Result<(), QpError>
{
    match (mat, vec) {
        (Some(_), None) => Err(QpError::IncompleteConstraint {kind, missing: vec_name}),
        (None, Some(_)) => Err(QpError::IncompleteConstraint {kind, missing: mat_name}),
        _ => Ok(()),
    }
}

/// Checks that paired constraints are complete.
///
/// Returns `Ok` if each of \\(G, h\\) and \\(A, b\\) are both present or both absent,
/// otherwise [`QpError::IncompleteConstraint`] naming the missing one.
/// Box bounds \\(lb, ub\\) are independent and not checked.
pub fn check_problem(qp: &ProbQP) -> Result<(), QpError>
{
    check_pair(ConstraintKind::Inequality, &qp.mat_g, "G", &qp.vec_h, "h")?;
    check_pair(ConstraintKind::Equality, &qp.mat_a, "A", &qp.vec_b, "b")?;

    Ok(())
}

//

fn check_size(what: &'static str, expected: (usize, usize), found: (usize, usize)) -> Result<(), QpError>
{
    if expected == found {
        Ok(())
    }
    else {
        log::error!("{}: expected {:?}, found {:?}", what, expected, found);
        Err(QpError::DimensionMismatch {what, expected, found})
    }
}

fn check_len(what: &'static str, n: usize, vec: &Option<Vec<f64>>) -> Result<(), QpError>
{
    if let Some(v) = vec {
        check_size(what, (n, 1), (v.len(), 1))
    }
    else {
        Ok(())
    }
}

/// Checks that the sizes of matrices and vectors agree with each other.
///
/// \\(n\\) is the length of \\(q\\); the number of constraint rows is given by \\(h\\) and \\(b\\).
/// Paired constraints are assumed complete by [`check_problem`].
pub fn check_dims(qp: &ProbQP) -> Result<(), QpError>
{
    let n = qp.dim();

    check_size("P", (n, n), qp.sym_p.size())?;

    if let (Some(g), Some(h)) = (&qp.mat_g, &qp.vec_h) {
        check_size("G", (h.len(), n), g.size())?;
    }
    if let (Some(a), Some(b)) = (&qp.mat_a, &qp.vec_b) {
        check_size("A", (b.len(), n), a.size())?;
    }

    check_len("lb", n, &qp.vec_lb)?;
    check_len("ub", n, &qp.vec_ub)?;
    check_len("initvals", n, &qp.initvals)?;

    Ok(())
}

//

#[test]
fn test_check_problem()
{
    use crate::MatBuild;

    let p = MatBuild::identity(2);
    let g = MatBuild::identity(2);
    let base = ProbQP::new(p, vec![0., 0.]);

    // both or neither
    assert!(check_problem(&base).is_ok());
    assert!(check_problem(&base.clone().ineq(g.clone(), vec![1., 1.])).is_ok());
    assert!(check_problem(&base.clone().eq(g.clone(), vec![1., 1.])).is_ok());
    assert!(check_problem(&base.clone().ineq(g.clone(), vec![1., 1.]).eq(g.clone(), vec![1., 1.])).is_ok());

    let mut qp = base.clone();
    qp.mat_g = Some(g.clone().into());
    assert_eq!(
        check_problem(&qp).unwrap_err(),
        QpError::IncompleteConstraint {kind: ConstraintKind::Inequality, missing: "h"}
    );

    let mut qp = base.clone();
    qp.vec_h = Some(vec![1., 1.]);
    assert_eq!(
        check_problem(&qp).unwrap_err(),
        QpError::IncompleteConstraint {kind: ConstraintKind::Inequality, missing: "G"}
    );

    let mut qp = base.clone();
    qp.mat_a = Some(g.clone().into());
    assert_eq!(
        check_problem(&qp).unwrap_err(),
        QpError::IncompleteConstraint {kind: ConstraintKind::Equality, missing: "b"}
    );

    let mut qp = base.clone();
    qp.vec_b = Some(vec![1., 1.]);
    assert_eq!(
        check_problem(&qp).unwrap_err(),
        QpError::IncompleteConstraint {kind: ConstraintKind::Equality, missing: "A"}
    );

    // bounds are not paired
    assert!(check_problem(&base.clone().lb(vec![0., 0.])).is_ok());
    assert!(check_problem(&base.clone().ub(vec![0., 0.])).is_ok());
}

#[test]
fn test_check_dims()
{
    use crate::MatBuild;

    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.])
        .ineq(vec![1., 1.], vec![1.])
        .lb(vec![0., 0.]);
    assert!(check_dims(&qp).is_ok());

    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0., 0.]);
    assert_eq!(
        check_dims(&qp).unwrap_err(),
        QpError::DimensionMismatch {what: "P", expected: (3, 3), found: (2, 2)}
    );

    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.])
        .eq(MatBuild::new(2, 2), vec![1.]);
    assert_eq!(
        check_dims(&qp).unwrap_err(),
        QpError::DimensionMismatch {what: "A", expected: (1, 2), found: (2, 2)}
    );

    let qp = ProbQP::new(MatBuild::identity(2), vec![0., 0.])
        .ub(vec![1.]);
    assert_eq!(
        check_dims(&qp).unwrap_err(),
        QpError::DimensionMismatch {what: "ub", expected: (2, 1), found: (1, 1)}
    );
}
