use std::backtrace::Backtrace;

use crate::solver::engine::VariableId;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Contract violations raised by the solver core.
///
/// Every kind here means an invariant was broken, either by the caller or by
/// the engine itself. None of them is a normal search outcome: a domain
/// wipeout during propagation is reported through
/// [`Propagation::Wipeout`](crate::solver::propagate::Propagation) and
/// handled by backtracking, not through this type.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// A value outside a variable's original domain was assigned to it.
    #[error("cannot assign {value} to variable {variable}: not in its domain")]
    InvalidAssignment { variable: String, value: String },

    /// Propagation tried to prune a value that was not in the current
    /// domain. The prune bookkeeping is out of sync with the domains.
    #[error("cannot prune {value} from variable {variable}: not in its current domain")]
    PruneInconsistency { variable: String, value: String },

    /// A constraint scope named a variable id outside the graph's arena.
    #[error("constraint {constraint} in graph {graph} references unknown variable id {variable}")]
    ScopeMismatch {
        graph: String,
        constraint: String,
        variable: VariableId,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl Error {
    /// The underlying contract violation.
    pub fn inner(&self) -> &SolverError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
