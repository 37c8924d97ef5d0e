//! A constraint given extensionally, as the full set of scope assignments
//! that satisfy it.

use crate::solver::{
    constraint::ConstraintDescriptor,
    engine::VariableId,
    value::ValueEquality,
    variable::Variable,
};

/// Stores the satisfying tuples of its scope explicitly.
///
/// Any relation over a small scope can be written this way, at the price of
/// materializing it in full: `satisfying_tuples[k][i]` is the value tuple
/// `k` gives to `scope[i]`. An all-different over three variables with
/// domains `1..=3`, for instance, is the six permutations of `[1, 2, 3]`.
#[derive(Debug, Clone)]
pub struct TableConstraint<V: ValueEquality> {
    name: String,
    scope: Vec<VariableId>,
    satisfying_tuples: Vec<Vec<V>>,
}

impl<V: ValueEquality> TableConstraint<V> {
    /// Creates a table constraint. Every tuple must assign one value per
    /// scope variable, positionally.
    pub fn new(
        name: impl Into<String>,
        scope: Vec<VariableId>,
        satisfying_tuples: Vec<Vec<V>>,
    ) -> Self {
        let name = name.into();
        debug_assert!(
            satisfying_tuples.iter().all(|t| t.len() == scope.len()),
            "tuple arity mismatch in table constraint {}",
            name
        );
        Self {
            name,
            scope,
            satisfying_tuples,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn satisfying_tuples(&self) -> &[Vec<V>] {
        &self.satisfying_tuples
    }

    /// Looks for a satisfying tuple that gives `variable` the value `value`
    /// and draws every other position from that variable's current domain.
    /// Stops at the first such tuple; which one is found is irrelevant to
    /// the result. The current domain of `variable` itself is deliberately
    /// not consulted.
    pub(crate) fn has_support(
        &self,
        variables: &[Variable<V>],
        variable: VariableId,
        value: &V,
    ) -> bool {
        let Some(position) = self.scope.iter().position(|&id| id == variable) else {
            // The pair is unconstrained here.
            return true;
        };
        self.satisfying_tuples.iter().any(|tuple| {
            tuple[position] == *value
                && self.scope.iter().enumerate().all(|(i, &id)| {
                    i == position || variables[id as usize].in_current_domain(&tuple[i])
                })
        })
    }

    pub(crate) fn check(&self, variables: &[Variable<V>]) -> bool {
        let mut assignment = Vec::with_capacity(self.scope.len());
        for &id in &self.scope {
            match variables[id as usize].value() {
                Some(value) => assignment.push(value.clone()),
                None => return true,
            }
        }
        self.satisfying_tuples.contains(&assignment)
    }

    pub(crate) fn descriptor(&self) -> ConstraintDescriptor {
        let vars_str = self
            .scope
            .iter()
            .map(|v| format!("?{}", v))
            .collect::<Vec<_>>()
            .join(", ");
        ConstraintDescriptor {
            name: "TableConstraint".to_string(),
            description: format!("{}({})", self.name, vars_str),
        }
    }
}
