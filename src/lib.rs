//! Plexo is a generic, reusable engine for finite-domain constraint
//! satisfaction problems.
//!
//! The engine is problem-agnostic: you describe a problem as variables with
//! finite domains and constraints over ordered subsets of them, and the
//! engine enumerates every assignment consistent with all constraints. It
//! interleaves depth-first backtracking search with generalized arc
//! consistency (GAC) propagation, journaling every domain prune so that
//! backtracking restores state exactly.
//!
//! # Core Concepts
//!
//! - **[`Variable`](solver::variable::Variable)**: a named slot with a fixed
//!   original domain and a shrinkable current domain.
//! - **[`Constraint`](solver::constraint::Constraint)**: a rule over an
//!   ordered scope, either a
//!   [`TableConstraint`](solver::constraints::table::TableConstraint) of
//!   explicit satisfying tuples or a
//!   [`CardinalityConstraint`](solver::constraints::cardinality::CardinalityConstraint)
//!   bounding how many scope variables take certain values.
//! - **[`ConstraintGraph`](solver::graph::ConstraintGraph)**: owns the
//!   variables and constraints and indexes which constraints touch which
//!   variable.
//! - **[`SolverEngine`](solver::engine::SolverEngine)**: runs the search and
//!   hands every solution to a
//!   [`SolutionSink`](solver::solution::SolutionSink).
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Two variables over `{1, 2}` that must differ have exactly two solutions:
//!
//! ```
//! use plexo::solver::constraint::Constraint;
//! use plexo::solver::constraints::table::TableConstraint;
//! use plexo::solver::engine::SolverEngine;
//! use plexo::solver::graph::ConstraintGraph;
//! use plexo::solver::solution::SolutionCollector;
//! use plexo::solver::variable::Variable;
//!
//! let a = Variable::new("A", [1, 2]);
//! let b = Variable::new("B", [1, 2]);
//! let differ = TableConstraint::new("differ", vec![0, 1], vec![vec![1, 2], vec![2, 1]]);
//!
//! let mut graph =
//!     ConstraintGraph::new("pair", vec![a, b], vec![Constraint::Table(differ)]).unwrap();
//! let mut sink = SolutionCollector::new();
//! let stats = SolverEngine::new().solve(&mut graph, &mut sink).unwrap();
//!
//! assert_eq!(sink.len(), 2);
//! assert_eq!(stats.solutions, 2);
//! ```
//!
pub mod error;
pub mod solver;
