//! Places a small battleship fleet on a grid from row and column tallies.
//!
//! The engine only sees generic constraints: one cardinality tally per row
//! and column, and table constraints forbidding diagonally touching ships.
//! The fleet-composition rule (nothing longer than a destroyer here) cannot
//! be expressed economically as a constraint, so it lives in the solution
//! sink, which filters the enumerated placements.

use clap::Parser;
use plexo::solver::{
    constraint::Constraint,
    constraints::{cardinality::CardinalityConstraint, table::TableConstraint},
    engine::SolverEngine,
    graph::ConstraintGraph,
    solution::{sink_from_fn, Solution},
    stats::render_stats_table,
    variable::Variable,
};
use tracing_subscriber::EnvFilter;

const SHIP: char = 'S';
const WATER: char = '.';

const SIZE: usize = 4;
const ROW_TALLIES: [usize; SIZE] = [1, 1, 2, 0];
const COL_TALLIES: [usize; SIZE] = [2, 0, 1, 1];

#[derive(Parser, Debug)]
#[command(about = "Solve a miniature battleship placement puzzle.")]
struct Args {
    /// Print at most this many valid placements.
    #[arg(long, default_value_t = 4)]
    max_print: usize,

    /// Write the first valid placement to this file.
    #[arg(long)]
    output: Option<std::path::PathBuf>,

    /// Print the per-constraint propagation statistics table.
    #[arg(long)]
    stats: bool,

    /// Dump the raw statistics as JSON instead of a table.
    #[arg(long)]
    stats_json: bool,
}

fn cell(row: usize, col: usize) -> u32 {
    (row * SIZE + col) as u32
}

fn build_graph() -> ConstraintGraph<char> {
    let variables: Vec<Variable<char>> = (0..SIZE * SIZE)
        .map(|i| Variable::new(format!("cell_{}_{}", i / SIZE, i % SIZE), [SHIP, WATER]))
        .collect();

    let mut constraints = Vec::new();
    for i in 0..SIZE {
        let row: Vec<u32> = (0..SIZE).map(|j| cell(i, j)).collect();
        let col: Vec<u32> = (0..SIZE).map(|j| cell(j, i)).collect();
        constraints.push(Constraint::Cardinality(CardinalityConstraint::new(
            format!("row_{}", i),
            row,
            vec![SHIP],
            ROW_TALLIES[i],
            ROW_TALLIES[i],
        )));
        constraints.push(Constraint::Cardinality(CardinalityConstraint::new(
            format!("col_{}", i),
            col,
            vec![SHIP],
            COL_TALLIES[i],
            COL_TALLIES[i],
        )));
    }

    // Ships never touch diagonally.
    let no_diagonal_contact = vec![
        vec![WATER, WATER],
        vec![WATER, SHIP],
        vec![SHIP, WATER],
    ];
    for row in 0..SIZE - 1 {
        for col in 0..SIZE {
            if col + 1 < SIZE {
                constraints.push(Constraint::Table(TableConstraint::new(
                    format!("diag_{}_{}_se", row, col),
                    vec![cell(row, col), cell(row + 1, col + 1)],
                    no_diagonal_contact.clone(),
                )));
            }
            if col > 0 {
                constraints.push(Constraint::Table(TableConstraint::new(
                    format!("diag_{}_{}_sw", row, col),
                    vec![cell(row, col), cell(row + 1, col - 1)],
                    no_diagonal_contact.clone(),
                )));
            }
        }
    }

    ConstraintGraph::new("battleship", variables, constraints)
        .expect("constraint scopes are built from grid cells")
}

fn to_grid(solution: &Solution<char>) -> Vec<Vec<char>> {
    let mut grid = vec![vec![WATER; SIZE]; SIZE];
    for &(id, value) in solution.iter() {
        grid[id as usize / SIZE][id as usize % SIZE] = value;
    }
    grid
}

/// The fleet here has nothing longer than a destroyer: reject any placement
/// with three ship cells in a row or column.
fn fleet_is_legal(grid: &[Vec<char>]) -> bool {
    let run_too_long = |cells: Vec<char>| {
        let mut run = 0;
        for value in cells {
            run = if value == SHIP { run + 1 } else { 0 };
            if run > 2 {
                return true;
            }
        }
        false
    };
    for i in 0..SIZE {
        if run_too_long((0..SIZE).map(|j| grid[i][j]).collect()) {
            return false;
        }
        if run_too_long((0..SIZE).map(|j| grid[j][i]).collect()) {
            return false;
        }
    }
    true
}

fn render(grid: &[Vec<char>]) -> String {
    let mut out = String::new();
    for row in grid {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut graph = build_graph();

    let mut placements: Vec<Vec<Vec<char>>> = Vec::new();
    let mut rejected = 0u64;
    let stats = {
        let mut sink = sink_from_fn(|solution: &Solution<char>| {
            let grid = to_grid(solution);
            if fleet_is_legal(&grid) {
                placements.push(grid);
            } else {
                rejected += 1;
            }
        });
        SolverEngine::new()
            .solve(&mut graph, &mut sink)
            .expect("engine invariants hold on a well-formed graph")
    };

    println!(
        "{} valid placements ({} rejected by the fleet rule, {} nodes searched)",
        placements.len(),
        rejected,
        stats.nodes_visited
    );
    for grid in placements.iter().take(args.max_print) {
        println!("\n{}", render(grid));
    }

    if let Some(path) = &args.output {
        let first = placements.first().expect("no placement to write");
        std::fs::write(path, render(first)).expect("failed to write output file");
        println!("wrote first placement to {}", path.display());
    }

    if args.stats_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).expect("stats serialize")
        );
    } else if args.stats {
        println!("{}", render_stats_table(&stats, graph.constraints()));
    }
}
