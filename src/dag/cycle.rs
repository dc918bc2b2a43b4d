// src/dag/cycle.rs

//! Cycle detection over task precedence edges.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graphmap::DiGraphMap;

use crate::types::TaskName;

/// Look for a cycle in the graph formed by `nodes` and precedence `edges`.
///
/// Edge direction is "runs before": `(a, b)` means `a` must come before `b`.
///
/// Returns the cycle as an ordered list of names with the first name
/// repeated at the end (`["a", "b", "a"]`). The cycle starts at the earliest
/// node of `nodes` that lies on any cycle and is the shortest one through
/// that node, so the result is stable for a given graph.
pub fn find_cycle<'a>(
    nodes: impl IntoIterator<Item = &'a str>,
    edges: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Option<Vec<TaskName>> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for node in nodes {
        graph.add_node(node);
    }
    for (from, to) in edges {
        graph.add_edge(from, to, ());
    }

    if !is_cyclic_directed(&graph) {
        return None;
    }

    // Nodes that sit on a cycle: members of a non-trivial strongly connected
    // component, or nodes with a self-loop.
    let mut component_of: HashMap<&str, usize> = HashMap::new();
    for (id, component) in tarjan_scc(&graph).into_iter().enumerate() {
        let cyclic = component.len() > 1
            || component
                .first()
                .is_some_and(|&n| graph.contains_edge(n, n));
        if cyclic {
            for node in component {
                component_of.insert(node, id);
            }
        }
    }

    let start = graph.nodes().find(|n| component_of.contains_key(n))?;
    let component = component_of[start];

    // Breadth-first search from `start` back to itself, staying inside its
    // component, gives the shortest cycle through `start`.
    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        for next in graph.neighbors(node) {
            if component_of.get(next) != Some(&component) {
                continue;
            }
            if next == start {
                let mut path = vec![start.to_string()];
                let mut cursor = node;
                let mut tail = Vec::new();
                while cursor != start {
                    tail.push(cursor.to_string());
                    cursor = parent[cursor];
                }
                path.extend(tail.into_iter().rev());
                path.push(start.to_string());
                return Some(path);
            }
            if seen.insert(next) {
                parent.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    None
}
