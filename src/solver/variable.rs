use crate::{
    error::{Result, SolverError},
    solver::value::ValueEquality,
};

/// A named finite-domain slot.
///
/// A variable carries two domains: the original one, fixed at construction,
/// and the current one, which propagation shrinks and backtracking restores.
/// An assignment is an overlay on top of both: assigning and unassigning
/// never touches the current domain, so the domains seen by support checks
/// stay coherent while the search moves the assignment around.
#[derive(Debug, Clone)]
pub struct Variable<V: ValueEquality> {
    name: String,
    domain: Vec<V>,
    current: Vec<V>,
    assigned: Option<V>,
}

impl<V: ValueEquality> Variable<V> {
    /// Creates a variable with the given name and domain of values.
    pub fn new(name: impl Into<String>, domain: impl IntoIterator<Item = V>) -> Self {
        let domain: Vec<V> = domain.into_iter().collect();
        Self {
            name: name.into(),
            current: domain.clone(),
            domain,
            assigned: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original domain, fixed at construction.
    pub fn domain(&self) -> &[V] {
        &self.domain
    }

    pub fn domain_size(&self) -> usize {
        self.domain.len()
    }

    /// Replaces the original domain, for solving a variant of the same
    /// problem with one graph. Resets the current domain and clears any
    /// assignment along the way.
    pub fn reset_domain(&mut self, domain: impl IntoIterator<Item = V>) {
        self.domain = domain.into_iter().collect();
        self.current = self.domain.clone();
        self.assigned = None;
    }

    pub fn value(&self) -> Option<&V> {
        self.assigned.as_ref()
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    /// Overlays an assignment on the variable.
    ///
    /// Fails with [`SolverError::InvalidAssignment`] if `value` is not in
    /// the original domain.
    pub fn assign(&mut self, value: V) -> Result<()> {
        if !self.domain.contains(&value) {
            return Err(SolverError::InvalidAssignment {
                variable: self.name.clone(),
                value: format!("{:?}", value),
            }
            .into());
        }
        self.assigned = Some(value);
        Ok(())
    }

    /// Clears the assignment. The current domain is unaffected.
    pub fn unassign(&mut self) {
        self.assigned = None;
    }

    /// The values this variable may still take: the assigned value alone if
    /// an assignment stands, otherwise the live current domain. Support
    /// checks treat assigned and unassigned variables uniformly through this
    /// view.
    pub fn current_domain(&self) -> Vec<V> {
        match &self.assigned {
            Some(value) => vec![value.clone()],
            None => self.current.clone(),
        }
    }

    pub fn current_domain_size(&self) -> usize {
        if self.assigned.is_some() {
            1
        } else {
            self.current.len()
        }
    }

    pub fn in_current_domain(&self, value: &V) -> bool {
        match &self.assigned {
            Some(assigned) => assigned == value,
            None => self.current.contains(value),
        }
    }

    /// Removes `value` from the current domain. Only the propagation layer
    /// calls this, and every removal must be journaled by the caller so it
    /// can be undone on backtrack.
    ///
    /// Fails with [`SolverError::PruneInconsistency`] if the value was not
    /// present.
    pub(crate) fn remove_value(&mut self, value: &V) -> Result<()> {
        match self.current.iter().position(|v| v == value) {
            Some(index) => {
                self.current.swap_remove(index);
                Ok(())
            }
            None => Err(SolverError::PruneInconsistency {
                variable: self.name.clone(),
                value: format!("{:?}", value),
            }
            .into()),
        }
    }

    /// Puts a previously pruned value back. Restoring a value that is still
    /// present means a prune was journaled twice.
    pub(crate) fn restore_value(&mut self, value: V) {
        debug_assert!(
            !self.current.contains(&value),
            "value {:?} restored to variable {} twice",
            value,
            self.name
        );
        self.current.push(value);
    }

    /// Restores the current domain to the original domain and clears the
    /// assignment.
    pub fn reset(&mut self) {
        self.current = self.domain.clone();
        self.assigned = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::SolverError;

    #[test]
    fn assign_rejects_value_outside_domain() {
        let mut var = Variable::new("x", [1, 2, 3]);
        let err = var.assign(7).unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::InvalidAssignment { .. }
        ));
        assert!(!var.is_assigned());
    }

    #[test]
    fn assignment_is_an_overlay_over_the_current_domain() {
        let mut var = Variable::new("x", [1, 2, 3]);
        var.assign(2).unwrap();

        assert_eq!(var.current_domain(), vec![2]);
        assert_eq!(var.current_domain_size(), 1);
        assert!(var.in_current_domain(&2));
        assert!(!var.in_current_domain(&1));

        var.unassign();
        assert_eq!(var.current_domain_size(), 3);
        assert!(var.in_current_domain(&1));
    }

    #[test]
    fn prune_and_restore_round_trip() {
        let mut var = Variable::new("x", [1, 2, 3]);
        var.remove_value(&2).unwrap();
        assert!(!var.in_current_domain(&2));
        assert_eq!(var.current_domain_size(), 2);
        assert_eq!(var.domain(), &[1, 2, 3]);

        var.restore_value(2);
        assert_eq!(var.current_domain_size(), 3);
        assert!(var.in_current_domain(&2));
    }

    #[test]
    fn pruning_an_absent_value_is_an_error() {
        let mut var = Variable::new("x", [1, 2]);
        var.remove_value(&1).unwrap();
        let err = var.remove_value(&1).unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::PruneInconsistency { .. }
        ));
    }

    #[test]
    fn reset_domain_swaps_in_a_fresh_domain() {
        let mut var = Variable::new("x", [1, 2]);
        var.remove_value(&2).unwrap();
        var.assign(1).unwrap();

        var.reset_domain([5, 6, 7]);
        assert!(!var.is_assigned());
        assert_eq!(var.domain(), &[5, 6, 7]);
        assert_eq!(var.current_domain_size(), 3);
    }

    #[test]
    fn reset_restores_domain_and_clears_assignment() {
        let mut var = Variable::new("x", [1, 2, 3]);
        var.remove_value(&3).unwrap();
        var.assign(1).unwrap();

        var.reset();
        assert!(!var.is_assigned());
        assert_eq!(var.current_domain_size(), 3);
    }
}
