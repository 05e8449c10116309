use crate::error::{ProgressionError, Result};
use crate::unit::LearningUnit;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Order units so each one comes after every unit it depends on.
///
/// Depth-first search over "taught before" edges (B -> A when A needs a term
/// B teaches); the result is the reverse of finish order. Reaching a unit
/// that is still in progress fails with the unit ids along the cycle.
pub fn order_units(units: Vec<LearningUnit>) -> Result<Vec<LearningUnit>> {
    let successors = taught_before_edges(&units);

    let mut marks = vec![Mark::Unvisited; units.len()];
    let mut path = Vec::new();
    let mut finished = Vec::with_capacity(units.len());

    // Reverse iteration keeps independent units in construction order
    // once the finish order is reversed.
    for root in (0..units.len()).rev() {
        if marks[root] == Mark::Unvisited {
            visit(root, &successors, &units, &mut marks, &mut path, &mut finished)?;
        }
    }

    let mut slots: Vec<Option<LearningUnit>> = units.into_iter().map(Some).collect();
    Ok(finished
        .into_iter()
        .rev()
        .filter_map(|i| slots[i].take())
        .collect())
}

/// `edges[b]` lists every unit that depends on a term taught by unit `b`
fn taught_before_edges(units: &[LearningUnit]) -> Vec<Vec<usize>> {
    let mut edges = vec![Vec::new(); units.len()];
    for (a, dependent) in units.iter().enumerate() {
        if dependent.prerequisites.is_empty() {
            continue;
        }
        for (b, provider) in units.iter().enumerate() {
            if a != b && dependent.depends_on(provider) {
                edges[b].push(a);
            }
        }
    }
    edges
}

fn visit(
    node: usize,
    successors: &[Vec<usize>],
    units: &[LearningUnit],
    marks: &mut [Mark],
    path: &mut Vec<usize>,
    finished: &mut Vec<usize>,
) -> Result<()> {
    match marks[node] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            let start = path.iter().position(|&n| n == node).unwrap_or(0);
            // Path follows "taught before" edges; report it in dependency
            // direction (dependent -> the unit it needs).
            let cycle: Vec<String> = std::iter::once(node)
                .chain(path[start..].iter().rev().copied())
                .map(|i| units[i].id.clone())
                .collect();
            return Err(ProgressionError::CyclicDependency { cycle });
        }
        Mark::Unvisited => {}
    }

    marks[node] = Mark::InProgress;
    path.push(node);

    for &next in successors[node].iter().rev() {
        visit(next, successors, units, marks, path, finished)?;
    }

    path.pop();
    marks[node] = Mark::Done;
    finished.push(node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use vocab_model::{CefrLevel, VocabularyRecord};

    fn unit(id: &str, teaches: &[&str], needs: &[&str]) -> LearningUnit {
        LearningUnit {
            id: id.to_string(),
            level: CefrLevel::A1,
            focus_area: id.to_string(),
            terms: teaches
                .iter()
                .map(|t| VocabularyRecord::new(*t, "", CefrLevel::A1))
                .collect(),
            prerequisites: needs.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            estimated_minutes: 30,
            review_points: Vec::new(),
        }
    }

    fn ids(units: &[LearningUnit]) -> Vec<&str> {
        units.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn dependencies_come_first() {
        let units = vec![
            unit("advanced", &["c"], &["b"]),
            unit("middle", &["b"], &["a"]),
            unit("basic", &["a"], &[]),
        ];
        let ordered = order_units(units).unwrap();
        assert_eq!(ids(&ordered), vec!["basic", "middle", "advanced"]);
    }

    #[test]
    fn independent_units_keep_construction_order() {
        let units = vec![
            unit("one", &["a"], &[]),
            unit("two", &["b"], &[]),
            unit("three", &["c"], &[]),
        ];
        let ordered = order_units(units).unwrap();
        assert_eq!(ids(&ordered), vec!["one", "two", "three"]);
    }

    #[test]
    fn own_terms_do_not_create_self_edges() {
        let units = vec![unit("solo", &["a", "b"], &["a"])];
        let ordered = order_units(units).unwrap();
        assert_eq!(ids(&ordered), vec!["solo"]);
    }

    #[test]
    fn two_unit_cycle_names_both_units() {
        let units = vec![unit("x", &["x1"], &["y1"]), unit("y", &["y1"], &["x1"])];
        let err = order_units(units).unwrap_err();
        let ProgressionError::CyclicDependency { cycle } = &err else {
            panic!("expected cycle, got {err:?}");
        };
        assert_eq!(cycle.first(), cycle.last());
        let members: BTreeSet<&str> = err.cycle_units().iter().map(String::as_str).collect();
        assert_eq!(members, BTreeSet::from(["x", "y"]));
    }

    #[test]
    fn cycle_report_skips_units_outside_the_cycle() {
        let units = vec![
            unit("entry", &["e"], &["p1"]),
            unit("p", &["p1"], &["q1"]),
            unit("q", &["q1"], &["r1"]),
            unit("r", &["r1"], &["p1"]),
        ];
        let err = order_units(units).unwrap_err();
        let members: BTreeSet<&str> = err.cycle_units().iter().map(String::as_str).collect();
        assert_eq!(members, BTreeSet::from(["p", "q", "r"]));
        assert_eq!(err.cycle_units().len(), 3);
    }

    #[test]
    fn empty_input_orders_to_empty() {
        assert!(order_units(Vec::new()).unwrap().is_empty());
    }
}
