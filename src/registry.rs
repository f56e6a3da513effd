//! Process-wide table of backends.
//!
//! Every enumerated backend is probed once, on first access.
//! A backend whose cargo feature is disabled stays in the table as unavailable.

use lazy_static::lazy_static;
use crate::QpError;
use crate::backend::{Backend, Capability, probe};

//

/// Enumerated backend names and their capability classes.
pub const SOLVERS: [(&str, Capability); 4] = [
    ("clarabel", Capability::Sparse),
    ("osqp", Capability::Sparse),
    ("quadprog", Capability::Dense),
    ("totsu", Capability::Dense),
];

/// Solver used when none is specified.
pub const DEFAULT_SOLVER: &str = "clarabel";

/// Solver used for dense-only operations when none is specified.
pub const DEFAULT_DENSE_SOLVER: &str = "totsu";

struct Entry
{
    name: &'static str,
    capability: Capability,
    backend: Option<Box<dyn Backend>>,
}

struct Registry
{
    entries: Vec<Entry>,
    available: Vec<&'static str>,
    dense: Vec<&'static str>,
    sparse: Vec<&'static str>,
}

impl Registry
{
    fn new() -> Self
    {
        let entries: Vec<Entry> = SOLVERS.iter()
            .map(|&(name, capability)| Entry {name, capability, backend: probe(name)})
            .collect();

        let filter = |cap: Option<Capability>| -> Vec<&'static str> {
            entries.iter()
                .filter(|e| e.backend.is_some() && cap.map_or(true, |c| c == e.capability))
                .map(|e| e.name)
                .collect()
        };
        let available = filter(None);
        let dense = filter(Some(Capability::Dense));
        let sparse = filter(Some(Capability::Sparse));

        log::debug!("available solvers: {:?}", available);

        Registry {
            entries,
            available,
            dense,
            sparse,
        }
    }

    fn entry(&self, name: &str) -> Result<&Entry, QpError>
    {
        self.entries.iter()
            .find(|e| e.name == name)
            .ok_or_else(|| QpError::UnknownSolver(name.to_string()))
    }
}

lazy_static! {
    static ref REGISTRY: Registry = Registry::new();
}

//

/// Names of available backends, in enumeration order.
pub fn available_solvers() -> &'static [&'static str]
{
    &REGISTRY.available
}

/// Names of available backends taking dense matrices.
pub fn dense_solvers() -> &'static [&'static str]
{
    &REGISTRY.dense
}

/// Names of available backends taking sparse matrices.
pub fn sparse_solvers() -> &'static [&'static str]
{
    &REGISTRY.sparse
}

/// Checks if a backend is compiled in. `false` for unknown names.
pub fn is_available(name: &str) -> bool
{
    REGISTRY.entry(name).map_or(false, |e| e.backend.is_some())
}

/// Capability class of a backend, available or not.
pub fn capability(name: &str) -> Result<Capability, QpError>
{
    REGISTRY.entry(name).map(|e| e.capability)
}

/// Direct access to a backend.
///
/// Returns [`QpError::UnknownSolver`] for a name not enumerated
/// or [`QpError::SolverUnavailable`] for a backend not compiled in.
pub fn backend(name: &str) -> Result<&'static dyn Backend, QpError>
{
    let e = REGISTRY.entry(name)?;

    e.backend.as_deref().ok_or_else(|| QpError::SolverUnavailable(name.to_string()))
}

/// Turns progress output of a backend on or off.
///
/// Does nothing for an unavailable backend.
pub fn set_verbosity(name: &str, verbose: bool) -> Result<(), QpError>
{
    let e = REGISTRY.entry(name)?;

    if let Some(b) = &e.backend {
        b.set_verbosity(verbose);
    }
    Ok(())
}

//

#[test]
fn test_registry_unknown()
{
    assert!(!is_available("foo"));
    assert_eq!(capability("foo"), Err(QpError::UnknownSolver("foo".to_string())));
    assert!(matches!(backend("foo"), Err(QpError::UnknownSolver(_))));
    assert_eq!(set_verbosity("foo", true), Err(QpError::UnknownSolver("foo".to_string())));
}

#[test]
fn test_registry_lists()
{
    assert_eq!(capability("totsu"), Ok(Capability::Dense));
    assert_eq!(capability("quadprog"), Ok(Capability::Dense));
    assert_eq!(capability("clarabel"), Ok(Capability::Sparse));

    for name in available_solvers() {
        assert!(is_available(name));
        assert!(dense_solvers().contains(name) != sparse_solvers().contains(name));
    }
    assert_eq!(available_solvers().len(), dense_solvers().len() + sparse_solvers().len());
}
