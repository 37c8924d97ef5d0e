use tracing::warn;

use crate::{
    error::{Result, SolverError},
    solver::{
        constraint::Constraint,
        engine::{ConstraintId, VariableId},
        solution::Solution,
        value::ValueEquality,
        variable::Variable,
    },
};

/// The constraint-satisfaction problem itself: the variable arena, the
/// constraints over it, and the index from each variable to the constraints
/// that name it.
///
/// Variables are owned here and referred to everywhere else by
/// [`VariableId`], an index into the arena. Two variables may legitimately
/// share a name and a domain; their identity is their id alone.
#[derive(Debug)]
pub struct ConstraintGraph<V: ValueEquality> {
    name: String,
    variables: Vec<Variable<V>>,
    constraints: Vec<Constraint<V>>,
    constraints_of: Vec<Vec<ConstraintId>>,
}

impl<V: ValueEquality> ConstraintGraph<V> {
    /// Builds the graph and precomputes the variable-to-constraint index.
    ///
    /// Fails with [`SolverError::ScopeMismatch`] if any constraint scope
    /// names a variable id outside the arena. A variable that appears in no
    /// constraint scope is legal but can never be pruned or checked; it is
    /// reported as a warning and left free.
    pub fn new(
        name: impl Into<String>,
        variables: Vec<Variable<V>>,
        constraints: Vec<Constraint<V>>,
    ) -> Result<Self> {
        let name = name.into();
        let mut constraints_of: Vec<Vec<ConstraintId>> = vec![Vec::new(); variables.len()];
        for (constraint_id, constraint) in constraints.iter().enumerate() {
            for &variable in constraint.scope() {
                let Some(referencing) = constraints_of.get_mut(variable as usize) else {
                    return Err(SolverError::ScopeMismatch {
                        graph: name,
                        constraint: constraint.name().to_string(),
                        variable,
                    }
                    .into());
                };
                referencing.push(constraint_id);
            }
        }
        for (index, referencing) in constraints_of.iter().enumerate() {
            if referencing.is_empty() {
                warn!(
                    graph = %name,
                    variable = %variables[index].name(),
                    "variable is in no constraint scope and will never be pruned"
                );
            }
        }
        Ok(Self {
            name,
            variables,
            constraints,
            constraints_of,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable<V>] {
        &self.variables
    }

    pub fn variable(&self, id: VariableId) -> &Variable<V> {
        &self.variables[id as usize]
    }

    pub fn variable_mut(&mut self, id: VariableId) -> &mut Variable<V> {
        &mut self.variables[id as usize]
    }

    pub fn variable_ids(&self) -> std::ops::Range<VariableId> {
        0..self.variables.len() as VariableId
    }

    pub fn constraints(&self) -> &[Constraint<V>] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint<V> {
        &self.constraints[id]
    }

    /// The constraints whose scope contains `variable`. Runs in time
    /// proportional to the returned list; the index is built once at
    /// construction.
    pub fn constraints_of(&self, variable: VariableId) -> &[ConstraintId] {
        &self.constraints_of[variable as usize]
    }

    /// Clears every variable's assignment.
    pub fn unassign_all(&mut self) {
        for variable in &mut self.variables {
            variable.unassign();
        }
    }

    /// Restores every variable to its original domain, unassigned.
    pub fn reset(&mut self) {
        for variable in &mut self.variables {
            variable.reset();
        }
    }

    pub(crate) fn variables_mut(&mut self) -> &mut [Variable<V>] {
        &mut self.variables
    }

    pub(crate) fn split_mut(
        &mut self,
    ) -> (
        &mut [Variable<V>],
        &[Constraint<V>],
        &[Vec<ConstraintId>],
    ) {
        (
            &mut self.variables,
            &self.constraints,
            &self.constraints_of,
        )
    }

    /// Checks a batch of candidate solutions against every constraint,
    /// returning `(solution index, complaint)` for each one that is not in
    /// fact a solution of this graph. The graph's assignment state is
    /// saved and put back around the check.
    pub fn verify_solutions(&mut self, solutions: &[Solution<V>]) -> Result<Vec<(usize, String)>> {
        let saved: Vec<Option<V>> = self.variables.iter().map(|v| v.value().cloned()).collect();
        let mut complaints = Vec::new();

        'candidates: for (index, solution) in solutions.iter().enumerate() {
            if solution.len() != self.variables.len() {
                complaints.push((index, "wrong number of variables".to_string()));
                continue;
            }
            let mut seen = std::collections::HashSet::new();
            for (variable, _) in solution.iter() {
                if (*variable as usize) >= self.variables.len() {
                    complaints.push((index, format!("unknown variable id {}", variable)));
                    continue 'candidates;
                }
                if !seen.insert(*variable) {
                    complaints.push((
                        index,
                        format!(
                            "duplicate assignment to variable {}",
                            self.variables[*variable as usize].name()
                        ),
                    ));
                    continue 'candidates;
                }
            }

            self.unassign_all();
            for (variable, value) in solution.iter() {
                if self.variables[*variable as usize].assign(value.clone()).is_err() {
                    complaints.push((
                        index,
                        format!(
                            "value {:?} is outside the domain of {}",
                            value,
                            self.variables[*variable as usize].name()
                        ),
                    ));
                    continue 'candidates;
                }
            }
            if let Some(violated) = self.constraints.iter().find(|c| !c.check(&self.variables)) {
                complaints.push((index, format!("violates constraint {}", violated.name())));
            }
        }

        for (index, value) in saved.into_iter().enumerate() {
            match value {
                Some(value) => self.variables[index].assign(value)?,
                None => self.variables[index].unassign(),
            }
        }
        Ok(complaints)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::SolverError,
        solver::constraints::table::TableConstraint,
    };

    fn xor_constraint(scope: Vec<VariableId>) -> Constraint<i64> {
        Constraint::Table(TableConstraint::new(
            "xor",
            scope,
            vec![vec![0, 1], vec![1, 0]],
        ))
    }

    #[test]
    fn construction_rejects_a_scope_outside_the_arena() {
        let vars = vec![Variable::new("a", [0, 1])];
        let err = ConstraintGraph::new("bad", vars, vec![xor_constraint(vec![0, 5])]).unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::ScopeMismatch { variable: 5, .. }
        ));
    }

    #[test]
    fn index_lists_exactly_the_referencing_constraints() {
        let vars = vec![
            Variable::new("a", [0, 1]),
            Variable::new("b", [0, 1]),
            Variable::new("c", [0, 1]),
        ];
        let graph = ConstraintGraph::new(
            "g",
            vars,
            vec![xor_constraint(vec![0, 1]), xor_constraint(vec![1, 2])],
        )
        .unwrap();

        assert_eq!(graph.constraints_of(0), &[0]);
        assert_eq!(graph.constraints_of(1), &[0, 1]);
        assert_eq!(graph.constraints_of(2), &[1]);
    }

    #[test]
    fn reset_undoes_assignments_and_prunes_alike() {
        let vars = vec![Variable::new("a", [0, 1]), Variable::new("b", [0, 1])];
        let mut graph = ConstraintGraph::new("g", vars, vec![xor_constraint(vec![0, 1])]).unwrap();
        graph.variable_mut(0).assign(1).unwrap();
        graph.variable_mut(1).remove_value(&0).unwrap();

        graph.unassign_all();
        assert!(!graph.variable(0).is_assigned());
        assert_eq!(graph.variable(1).current_domain_size(), 1);

        graph.reset();
        assert_eq!(graph.variable(1).current_domain_size(), 2);
    }

    #[test]
    fn verify_solutions_flags_violations_and_keeps_assignments() {
        let vars = vec![Variable::new("a", [0, 1]), Variable::new("b", [0, 1])];
        let mut graph = ConstraintGraph::new("g", vars, vec![xor_constraint(vec![0, 1])]).unwrap();
        graph.variable_mut(0).assign(1).unwrap();

        let good = Solution::from_pairs(vec![(0, 0), (1, 1)]);
        let violating = Solution::from_pairs(vec![(0, 0), (1, 0)]);
        let short = Solution::from_pairs(vec![(0, 0)]);

        let complaints = graph
            .verify_solutions(&[good, violating, short])
            .unwrap();
        assert_eq!(complaints.len(), 2);
        assert_eq!(complaints[0].0, 1);
        assert!(complaints[0].1.contains("xor"));
        assert_eq!(complaints[1].0, 2);

        // The pre-existing assignment survived the round trip.
        assert_eq!(graph.variable(0).value(), Some(&1));
        assert!(!graph.variable(1).is_assigned());
    }
}
