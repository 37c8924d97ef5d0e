use crate::solver::{
    constraints::{cardinality::CardinalityConstraint, table::TableConstraint},
    engine::VariableId,
    value::ValueEquality,
    variable::Variable,
};

/// Human-readable identification of a constraint, used by logging and the
/// statistics table.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A rule over an ordered scope of variables.
///
/// The set of constraint kinds is closed: a constraint is either an explicit
/// table of satisfying tuples or a cardinality bound on the values its scope
/// takes, and dispatch happens through this enum rather than trait objects.
///
/// The scope is ordered. Position `i` of a satisfying tuple always refers to
/// `scope()[i]`, so a constraint over `[A, B]` is not the same constraint as
/// one over `[B, A]`.
#[derive(Debug, Clone)]
pub enum Constraint<V: ValueEquality> {
    Table(TableConstraint<V>),
    Cardinality(CardinalityConstraint<V>),
}

impl<V: ValueEquality> Constraint<V> {
    pub fn name(&self) -> &str {
        match self {
            Constraint::Table(c) => c.name(),
            Constraint::Cardinality(c) => c.name(),
        }
    }

    /// The ordered scope of the constraint.
    pub fn scope(&self) -> &[VariableId] {
        match self {
            Constraint::Table(c) => c.scope(),
            Constraint::Cardinality(c) => c.scope(),
        }
    }

    pub fn arity(&self) -> usize {
        self.scope().len()
    }

    /// True iff `variable = value` can be extended to an assignment of the
    /// whole scope, drawn from current domains, that satisfies the
    /// constraint. Vacuously true when `variable` is not in the scope.
    pub fn has_support(
        &self,
        variables: &[Variable<V>],
        variable: VariableId,
        value: &V,
    ) -> bool {
        match self {
            Constraint::Table(c) => c.has_support(variables, variable, value),
            Constraint::Cardinality(c) => c.has_support(variables, variable, value),
        }
    }

    /// Evaluates the constraint against the assigned values of its scope.
    /// While any scope variable is unassigned the constraint is not yet
    /// falsifiable and counts as satisfied.
    pub fn check(&self, variables: &[Variable<V>]) -> bool {
        match self {
            Constraint::Table(c) => c.check(variables),
            Constraint::Cardinality(c) => c.check(variables),
        }
    }

    pub fn descriptor(&self) -> ConstraintDescriptor {
        match self {
            Constraint::Table(c) => c.descriptor(),
            Constraint::Cardinality(c) => c.descriptor(),
        }
    }
}
