//! A bound on how many variables in a scope take one of a set of values.

use crate::solver::{
    constraint::ConstraintDescriptor,
    engine::VariableId,
    value::ValueEquality,
    variable::Variable,
};

/// Satisfied when the number of scope variables assigned a value from
/// `required_values` lies in `[lower_bound, upper_bound]`.
///
/// With four variables and `required_values = {1, 4}`, bounds `2..=3` say
/// that at least two and at most three of them take the value 1 or 4. Row
/// and column tallies of grid puzzles are the typical use, with the bounds
/// pinned to the same number.
#[derive(Debug, Clone)]
pub struct CardinalityConstraint<V: ValueEquality> {
    name: String,
    scope: Vec<VariableId>,
    required_values: Vec<V>,
    lower_bound: usize,
    upper_bound: usize,
}

impl<V: ValueEquality> CardinalityConstraint<V> {
    pub fn new(
        name: impl Into<String>,
        scope: Vec<VariableId>,
        required_values: Vec<V>,
        lower_bound: usize,
        upper_bound: usize,
    ) -> Self {
        Self {
            name: name.into(),
            scope,
            required_values,
            lower_bound,
            upper_bound,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    fn counts(&self, value: &V) -> bool {
        self.required_values.contains(value)
    }

    pub(crate) fn check(&self, variables: &[Variable<V>]) -> bool {
        let mut hits = 0;
        for &id in &self.scope {
            match variables[id as usize].value() {
                Some(value) => {
                    if self.counts(value) {
                        hits += 1;
                    }
                }
                None => return true,
            }
        }
        self.lower_bound <= hits && hits <= self.upper_bound
    }

    /// Feasibility search: can `variable = value` be extended over the rest
    /// of the scope, drawing from current domains, to a tuple whose
    /// required-value count lands in the bounds?
    ///
    /// Works on a local copy of the scope so the shared scope order is
    /// never disturbed. Only the boolean result is contractual; internally
    /// the variable with the smallest current domain is extended first.
    pub(crate) fn has_support(
        &self,
        variables: &[Variable<V>],
        variable: VariableId,
        value: &V,
    ) -> bool {
        if !self.scope.contains(&variable) {
            return true;
        }

        let mut remaining: Vec<VariableId> = self
            .scope
            .iter()
            .copied()
            .filter(|&id| id != variable)
            .collect();
        // Sorted largest-domain-first; `extend` pops from the back.
        remaining.sort_by_key(|&id| {
            std::cmp::Reverse(variables[id as usize].current_domain_size())
        });

        let hits = if self.counts(value) { 1 } else { 0 };
        self.extend(variables, &mut remaining, hits)
    }

    /// Depth-first extension of a partial tuple. With `hits` required
    /// values among the chosen so far, each remaining variable can
    /// contribute at most one more hit, so a prefix is infeasible once
    /// `hits` exceeds the upper bound or `hits + remaining` cannot reach
    /// the lower bound.
    fn extend(
        &self,
        variables: &[Variable<V>],
        remaining: &mut Vec<VariableId>,
        hits: usize,
    ) -> bool {
        if hits > self.upper_bound || hits + remaining.len() < self.lower_bound {
            return false;
        }
        let Some(id) = remaining.pop() else {
            return true;
        };
        for candidate in variables[id as usize].current_domain() {
            let next_hits = if self.counts(&candidate) { hits + 1 } else { hits };
            if self.extend(variables, remaining, next_hits) {
                remaining.push(id);
                return true;
            }
        }
        remaining.push(id);
        false
    }

    pub(crate) fn descriptor(&self) -> ConstraintDescriptor {
        let vars_str = self
            .scope
            .iter()
            .map(|v| format!("?{}", v))
            .collect::<Vec<_>>()
            .join(", ");
        ConstraintDescriptor {
            name: "CardinalityConstraint".to_string(),
            description: format!(
                "{}[{}..={} of {:?}]({})",
                self.name, self.lower_bound, self.upper_bound, self.required_values, vars_str
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn four_vars() -> Vec<Variable<i64>> {
        (0..4)
            .map(|i| Variable::new(format!("v{}", i), [1, 2, 3, 4]))
            .collect()
    }

    fn two_to_three_ones() -> CardinalityConstraint<i64> {
        CardinalityConstraint::new("ones", vec![0, 1, 2, 3], vec![1], 2, 3)
    }

    fn assign_all(vars: &mut [Variable<i64>], values: [i64; 4]) {
        for (var, value) in vars.iter_mut().zip(values) {
            var.assign(value).unwrap();
        }
    }

    #[test]
    fn check_counts_required_values_against_both_bounds() {
        let constraint = two_to_three_ones();

        let mut vars = four_vars();
        assign_all(&mut vars, [1, 1, 1, 4]);
        assert!(constraint.check(&vars), "three hits is within 2..=3");

        let mut vars = four_vars();
        assign_all(&mut vars, [1, 1, 4, 4]);
        assert!(constraint.check(&vars), "two hits is within 2..=3");

        let mut vars = four_vars();
        assign_all(&mut vars, [1, 4, 4, 4]);
        assert!(!constraint.check(&vars), "one hit is below the lower bound");

        let mut vars = four_vars();
        assign_all(&mut vars, [1, 1, 1, 1]);
        assert!(!constraint.check(&vars), "four hits is above the upper bound");
    }

    #[test]
    fn check_is_vacuous_while_a_scope_variable_is_unassigned() {
        let constraint = two_to_three_ones();
        let mut vars = four_vars();
        vars[0].assign(1).unwrap();
        assert!(constraint.check(&vars));
    }

    #[test]
    fn support_fails_when_the_rest_cannot_reach_the_lower_bound() {
        let constraint = two_to_three_ones();
        let mut vars = four_vars();
        // Nothing but v0 can contribute a hit any more.
        for var in vars.iter_mut().skip(1) {
            var.remove_value(&1).unwrap();
        }
        assert!(!constraint.has_support(&vars, 0, &1));
        assert!(!constraint.has_support(&vars, 0, &2));
    }

    #[test]
    fn support_fails_when_the_upper_bound_is_already_exceeded() {
        let constraint = CardinalityConstraint::new("ones", vec![0, 1, 2, 3], vec![1], 0, 1);
        let mut vars = four_vars();
        vars[1].assign(1).unwrap();
        vars[2].assign(1).unwrap();
        assert!(!constraint.has_support(&vars, 0, &2));
        assert!(!constraint.has_support(&vars, 0, &1));
    }

    #[test]
    fn support_finds_a_feasible_extension() {
        let constraint = two_to_three_ones();
        let vars = four_vars();
        assert!(constraint.has_support(&vars, 0, &1));
        assert!(constraint.has_support(&vars, 0, &4));
    }

    #[test]
    fn support_is_vacuous_for_a_variable_outside_the_scope() {
        let constraint = CardinalityConstraint::new("ones", vec![0, 1, 2], vec![1], 0, 0);
        let mut vars = four_vars();
        vars[0].assign(1).unwrap();
        assert!(constraint.has_support(&vars, 3, &1));
    }

    #[test]
    fn leaves_the_scope_order_untouched() {
        let constraint = two_to_three_ones();
        let vars = four_vars();
        constraint.has_support(&vars, 1, &3);
        assert_eq!(constraint.scope(), &[0, 1, 2, 3]);
    }
}
