use prettytable::{Cell, Row, Table};

use crate::solver::{
    constraint::Constraint,
    engine::{ConstraintId, PerConstraintStats, SearchStats},
    value::ValueEquality,
};

/// Renders the per-constraint propagation effort of a solve as a text
/// table, cheapest constraints first, prefixed with the search totals.
pub fn render_stats_table<V: ValueEquality>(
    stats: &SearchStats,
    constraints: &[Constraint<V>],
) -> String {
    let header = format!(
        "{} solutions, {} nodes, {} backtracks\n",
        stats.solutions, stats.nodes_visited, stats.backtracks
    );

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint Type"),
        Cell::new("ID"),
        Cell::new("Description"),
        Cell::new("Revise Calls"),
        Cell::new("Prunings"),
        Cell::new("Time / Call (us)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();

    sorted_stats.sort_by_key(|a| a.1.time_spent_micros);

    for (constraint_id, constraint_stats) in sorted_stats {
        let descriptor = constraints[*constraint_id].descriptor();
        let avg_time = if constraint_stats.revisions > 0 {
            constraint_stats.time_spent_micros as f64 / constraint_stats.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(&descriptor.name),
            Cell::new(&constraint_id.to_string()),
            Cell::new(&descriptor.description),
            Cell::new(&constraint_stats.revisions.to_string()),
            Cell::new(&constraint_stats.prunings.to_string()),
            Cell::new(&format!("{:.2}", avg_time)),
            Cell::new(&format!(
                "{:.2}",
                constraint_stats.time_spent_micros as f64 / 1000.0
            )),
        ]));
    }

    header + &table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::constraints::table::TableConstraint;

    fn one_constraint() -> Vec<Constraint<i64>> {
        vec![Constraint::Table(TableConstraint::new(
            "xor",
            vec![0, 1],
            vec![vec![0, 1], vec![1, 0]],
        ))]
    }

    #[test]
    fn renders_a_row_per_tracked_constraint() {
        let mut stats = SearchStats::default();
        stats.constraint_stats.insert(
            0,
            PerConstraintStats {
                revisions: 4,
                prunings: 2,
                time_spent_micros: 120,
            },
        );

        let rendered = render_stats_table(&stats, &one_constraint());
        assert!(rendered.starts_with("0 solutions"));
        assert!(rendered.contains("TableConstraint"));
        assert!(rendered.contains("xor"));
        assert!(rendered.contains('4'));
    }

    #[test]
    fn stats_serialize_to_json() {
        let mut stats = SearchStats::default();
        stats.solutions = 3;
        stats
            .constraint_stats
            .insert(1, PerConstraintStats::default());

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"solutions\":3"));
        assert!(json.contains("\"constraint_stats\""));
    }
}
