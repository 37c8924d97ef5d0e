use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plexo::solver::{
    constraint::Constraint,
    constraints::{cardinality::CardinalityConstraint, table::TableConstraint},
    engine::{SearchStats, SolverEngine},
    graph::ConstraintGraph,
    propagate::ArcConsistencyEnforcer,
    solution::SolutionCounter,
    undo::UndoLog,
    variable::Variable,
};

/// An n x n ship/water grid where every row and column holds exactly one
/// ship: the solutions are the n! permutation matrices, so enumeration has
/// real backtracking to chew on.
fn permutation_grid(n: usize) -> ConstraintGraph<char> {
    let variables: Vec<Variable<char>> = (0..n * n)
        .map(|i| Variable::new(format!("cell_{}_{}", i / n, i % n), ['S', '.']))
        .collect();

    let mut constraints = Vec::new();
    for i in 0..n {
        let row: Vec<u32> = (0..n).map(|j| (i * n + j) as u32).collect();
        let col: Vec<u32> = (0..n).map(|j| (j * n + i) as u32).collect();
        constraints.push(Constraint::Cardinality(CardinalityConstraint::new(
            format!("row_{}", i),
            row,
            vec!['S'],
            1,
            1,
        )));
        constraints.push(Constraint::Cardinality(CardinalityConstraint::new(
            format!("col_{}", i),
            col,
            vec!['S'],
            1,
            1,
        )));
    }

    ConstraintGraph::new("permutation_grid", variables, constraints).unwrap()
}

/// A chain of not-equal table constraints over a 0..4 domain.
fn difference_chain(n: usize) -> ConstraintGraph<i64> {
    let variables: Vec<Variable<i64>> = (0..n)
        .map(|i| Variable::new(format!("v{}", i), 0..4i64))
        .collect();

    let mut tuples = Vec::new();
    for a in 0..4i64 {
        for b in 0..4i64 {
            if a != b {
                tuples.push(vec![a, b]);
            }
        }
    }
    let constraints: Vec<Constraint<i64>> = (0..n - 1)
        .map(|i| {
            Constraint::Table(TableConstraint::new(
                format!("ne_{}", i),
                vec![i as u32, (i + 1) as u32],
                tuples.clone(),
            ))
        })
        .collect();

    ConstraintGraph::new("difference_chain", variables, constraints).unwrap()
}

fn bench_exhaustive_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive_enumeration");
    for n in [3usize, 4] {
        group.bench_with_input(BenchmarkId::new("permutation_grid", n), &n, |b, &n| {
            b.iter(|| {
                let mut graph = permutation_grid(n);
                let mut sink = SolutionCounter::new();
                let stats = SolverEngine::new().solve(&mut graph, &mut sink).unwrap();
                black_box((sink.count(), stats.solutions))
            })
        });
    }
    group.finish();
}

fn bench_propagation_fixpoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation_fixpoint");
    for n in [8usize, 32] {
        group.bench_with_input(BenchmarkId::new("difference_chain", n), &n, |b, &n| {
            b.iter(|| {
                let mut graph = difference_chain(n);
                let mut undo = UndoLog::new();
                let mut stats = SearchStats::default();
                let seed: Vec<usize> = (0..graph.constraints().len()).collect();
                let outcome = ArcConsistencyEnforcer::new()
                    .enforce(&mut graph, seed, &(0, 0), &mut undo, &mut stats)
                    .unwrap();
                black_box(outcome)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_exhaustive_enumeration,
    bench_propagation_fixpoint
);
criterion_main!(benches);
