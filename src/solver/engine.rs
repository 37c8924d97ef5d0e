use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::{
    error::Result,
    solver::{
        graph::ConstraintGraph,
        solution::SolutionSink,
        strategy::BacktrackingSearch,
        undo::UndoLog,
        value::ValueEquality,
    },
};

pub type VariableId = u32;
pub type ConstraintId = usize;

/// Propagation effort attributed to one constraint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerConstraintStats {
    pub revisions: u64,
    pub prunings: u64,
    pub time_spent_micros: u64,
}

/// Counters accumulated over one solve.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// Search tree nodes entered, complete assignments included.
    pub nodes_visited: u64,
    /// Branches abandoned because propagation wiped out a domain.
    pub backtracks: u64,
    /// Complete consistent assignments reported to the sink.
    pub solutions: u64,
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

/// The main entry point for solving constraint satisfaction problems.
///
/// The engine walks the whole assignment space of a [`ConstraintGraph`]:
/// depth-first backtracking search over the unassigned variables, with
/// generalized arc consistency propagation pruning domains after every
/// tentative assignment. Every complete consistent assignment is handed to
/// the sink; the search does not stop at the first one.
///
/// Each call owns its undo log, so independent solves (sequential or on
/// separate graphs) never interfere.
pub struct SolverEngine;

impl SolverEngine {
    /// Creates a new `SolverEngine`.
    pub fn new() -> Self {
        Self
    }

    /// Enumerates every solution of `graph`, invoking `sink` once per
    /// complete consistent assignment.
    ///
    /// Variables already assigned when this is called keep their values and
    /// are not searched over; propagation only ever runs against values the
    /// search itself assigns, so known cells of a puzzle are better modeled
    /// as variables with a singleton domain. On return the graph is exactly
    /// as it was handed in: same assignments, same current domains.
    ///
    /// # Returns
    ///
    /// The accumulated [`SearchStats`], or an error if an engine invariant
    /// was violated mid-search. A problem with no solutions is not an
    /// error; the sink is simply never invoked.
    pub fn solve<V: ValueEquality>(
        &self,
        graph: &mut ConstraintGraph<V>,
        sink: &mut dyn SolutionSink<V>,
    ) -> Result<SearchStats> {
        let mut stats = SearchStats::default();
        let mut undo = UndoLog::new();
        let unassigned: Vec<VariableId> = graph
            .variable_ids()
            .filter(|&id| !graph.variable(id).is_assigned())
            .collect();

        debug!(
            graph = %graph.name(),
            variables = unassigned.len(),
            constraints = graph.constraints().len(),
            "starting exhaustive search"
        );
        BacktrackingSearch::new().search(graph, unassigned, &mut undo, sink, &mut stats)?;
        debug_assert!(
            undo.is_empty(),
            "prune journal must be empty once the search unwinds"
        );
        debug!(
            solutions = stats.solutions,
            nodes = stats.nodes_visited,
            backtracks = stats.backtracks,
            "assignment space exhausted"
        );
        Ok(stats)
    }
}

impl Default for SolverEngine {
    fn default() -> Self {
        Self::new()
    }
}
