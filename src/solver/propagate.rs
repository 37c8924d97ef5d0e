use tracing::{debug, trace};

use crate::{
    error::Result,
    solver::{
        engine::{ConstraintId, SearchStats, VariableId},
        graph::ConstraintGraph,
        undo::{Reason, UndoLog},
        value::ValueEquality,
        work_list::WorkList,
    },
};

/// Outcome of running propagation to a fixpoint.
///
/// A wipeout is not an error: it proves the partial assignment that seeded
/// this pass cannot be extended, and the search simply backtracks past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Propagation {
    /// The worklist drained; every rechecked constraint is
    /// generalized-arc-consistent.
    Fixpoint,
    /// Pruning emptied this variable's current domain.
    Wipeout(VariableId),
}

/// Worklist-driven generalized arc consistency (GAC).
///
/// Pops constraints off the worklist and prunes every variable/value pair
/// in their scopes that has no supporting extension, enqueueing the other
/// constraints of each pruned variable until nothing changes. Pruning is
/// journaled in the undo log under the reason that seeded the pass, so the
/// search can unwind it.
pub struct ArcConsistencyEnforcer;

impl ArcConsistencyEnforcer {
    pub fn new() -> Self {
        Self
    }

    /// Runs the worklist to a fixpoint.
    ///
    /// `seed` is the initial set of constraints to recheck and `reason` the
    /// tentative assignment this pass is a consequence of; every prune is
    /// recorded under it in `undo`. Running to a fixpoint twice in a row
    /// prunes nothing on the second pass.
    pub fn enforce<V: ValueEquality>(
        &self,
        graph: &mut ConstraintGraph<V>,
        seed: impl IntoIterator<Item = ConstraintId>,
        reason: &Reason<V>,
        undo: &mut UndoLog<V>,
        stats: &mut SearchStats,
    ) -> Result<Propagation> {
        let mut worklist = WorkList::from_seed(seed);
        let (variables, constraints, constraints_of) = graph.split_mut();

        while let Some(constraint_id) = worklist.pop_front() {
            let constraint = &constraints[constraint_id];
            let constraint_stats = stats.constraint_stats.entry(constraint_id).or_default();
            let start_time = std::time::Instant::now();
            constraint_stats.revisions += 1;

            for &variable in constraint.scope() {
                for value in variables[variable as usize].current_domain() {
                    if constraint.has_support(variables, variable, &value) {
                        continue;
                    }
                    trace!(
                        variable = %variables[variable as usize].name(),
                        ?value,
                        constraint = %constraint.name(),
                        "pruning unsupported value"
                    );
                    variables[variable as usize].remove_value(&value)?;
                    undo.record(reason, variable, value);
                    constraint_stats.prunings += 1;

                    if variables[variable as usize].current_domain_size() == 0 {
                        debug!(
                            variable = %variables[variable as usize].name(),
                            "domain wipeout"
                        );
                        constraint_stats.time_spent_micros +=
                            start_time.elapsed().as_micros() as u64;
                        return Ok(Propagation::Wipeout(variable));
                    }
                    for &recheck in &constraints_of[variable as usize] {
                        if recheck != constraint_id {
                            worklist.push_back(recheck);
                        }
                    }
                }
            }
            constraint_stats.time_spent_micros += start_time.elapsed().as_micros() as u64;
        }

        debug!("propagation reached a fixpoint");
        Ok(Propagation::Fixpoint)
    }
}

impl Default for ArcConsistencyEnforcer {
    fn default() -> Self {
        Self::new()
    }
}
