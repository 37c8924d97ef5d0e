use tracing::debug;

use crate::{
    error::Result,
    solver::{
        engine::{ConstraintId, SearchStats, VariableId},
        graph::ConstraintGraph,
        propagate::{ArcConsistencyEnforcer, Propagation},
        solution::{Solution, SolutionSink},
        undo::UndoLog,
        value::ValueEquality,
    },
};

/// Exhaustive depth-first search with propagation at every assignment.
///
/// Variables are selected in the graph's fixed order, never reordered
/// dynamically. For each value in the selected variable's current domain
/// the search assigns, propagates the variable's constraints, recurses
/// unless a domain wiped out, and unwinds the prunes journaled under that
/// `(variable, value)` before moving to the next value. A fully assigned
/// graph is reported to the sink and the search keeps going: every
/// consistent complete assignment is enumerated.
pub struct BacktrackingSearch {
    enforcer: ArcConsistencyEnforcer,
}

impl BacktrackingSearch {
    pub fn new() -> Self {
        Self {
            enforcer: ArcConsistencyEnforcer::new(),
        }
    }

    /// Explores every assignment of `unassigned`, reporting complete
    /// consistent ones to `sink`. Whatever happens inside, domains and
    /// assignments are back in their entry state when this returns; the
    /// subtree leaves no trace.
    pub fn search<V: ValueEquality>(
        &self,
        graph: &mut ConstraintGraph<V>,
        mut unassigned: Vec<VariableId>,
        undo: &mut UndoLog<V>,
        sink: &mut dyn SolutionSink<V>,
        stats: &mut SearchStats,
    ) -> Result<()> {
        // The list is consumed as a stack from the back; flip it so the
        // first variable handed in is also the first one tried.
        unassigned.reverse();
        self.explore(graph, &mut unassigned, undo, sink, stats)
    }

    fn explore<V: ValueEquality>(
        &self,
        graph: &mut ConstraintGraph<V>,
        unassigned: &mut Vec<VariableId>,
        undo: &mut UndoLog<V>,
        sink: &mut dyn SolutionSink<V>,
        stats: &mut SearchStats,
    ) -> Result<()> {
        stats.nodes_visited += 1;

        let Some(variable) = unassigned.pop() else {
            stats.solutions += 1;
            let solution = Solution::capture(graph.variables());
            debug!(nth = stats.solutions, "complete assignment found");
            sink.on_solution(&solution);
            return Ok(());
        };

        let seed: Vec<ConstraintId> = graph.constraints_of(variable).to_vec();
        for value in graph.variable(variable).current_domain() {
            let reason = (variable, value.clone());

            // Assign, propagate, maybe recurse, and always unwind this
            // reason's prunes before the next value or the return below.
            let descend = match graph.variable_mut(variable).assign(value) {
                Ok(()) => match self.enforcer.enforce(
                    graph,
                    seed.iter().copied(),
                    &reason,
                    undo,
                    stats,
                ) {
                    Ok(Propagation::Fixpoint) => {
                        self.explore(graph, unassigned, undo, sink, stats)
                    }
                    Ok(Propagation::Wipeout(_)) => {
                        stats.backtracks += 1;
                        Ok(())
                    }
                    Err(error) => Err(error),
                },
                Err(error) => Err(error),
            };
            undo.undo(&reason, graph.variables_mut());

            if let Err(error) = descend {
                graph.variable_mut(variable).unassign();
                unassigned.push(variable);
                return Err(error);
            }
        }

        graph.variable_mut(variable).unassign();
        unassigned.push(variable);
        Ok(())
    }
}

impl Default for BacktrackingSearch {
    fn default() -> Self {
        Self::new()
    }
}
