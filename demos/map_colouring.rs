//! The classic Australia map colouring problem, phrased entirely as table
//! constraints: each adjacent pair of regions must take different colours.

use plexo::solver::{
    constraint::Constraint,
    constraints::table::TableConstraint,
    engine::SolverEngine,
    graph::ConstraintGraph,
    solution::SolutionCollector,
    stats::render_stats_table,
    variable::Variable,
};
use tracing_subscriber::EnvFilter;

const COLOURS: [char; 3] = ['R', 'G', 'B'];

const REGIONS: [&str; 7] = ["WA", "NT", "SA", "Q", "NSW", "V", "T"];

// Tasmania borders nothing; the graph will warn that it can never be pruned.
const BORDERS: [(u32, u32); 9] = [
    (0, 1), // WA-NT
    (0, 2), // WA-SA
    (1, 2), // NT-SA
    (1, 3), // NT-Q
    (2, 3), // SA-Q
    (2, 4), // SA-NSW
    (2, 5), // SA-V
    (3, 4), // Q-NSW
    (4, 5), // NSW-V
];

fn different_colours() -> Vec<Vec<char>> {
    let mut tuples = Vec::new();
    for a in COLOURS {
        for b in COLOURS {
            if a != b {
                tuples.push(vec![a, b]);
            }
        }
    }
    tuples
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let variables: Vec<Variable<char>> = REGIONS
        .iter()
        .map(|region| Variable::new(*region, COLOURS))
        .collect();
    let constraints: Vec<Constraint<char>> = BORDERS
        .iter()
        .map(|&(a, b)| {
            Constraint::Table(TableConstraint::new(
                format!("{}|{}", REGIONS[a as usize], REGIONS[b as usize]),
                vec![a, b],
                different_colours(),
            ))
        })
        .collect();

    let mut graph = ConstraintGraph::new("australia", variables, constraints)
        .expect("borders only name known regions");

    let mut sink = SolutionCollector::new();
    let stats = SolverEngine::new()
        .solve(&mut graph, &mut sink)
        .expect("engine invariants hold on a well-formed graph");

    println!(
        "{} colourings found in {} search nodes",
        sink.len(),
        stats.nodes_visited
    );
    if let Some(first) = sink.solutions().first() {
        println!("\nOne of them:");
        for (id, region) in REGIONS.iter().enumerate() {
            println!("  {:>3} = {}", region, first.get(id as u32).unwrap());
        }
    }

    println!("\n{}", render_stats_table(&stats, graph.constraints()));
}
