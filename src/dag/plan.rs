// src/dag/plan.rs

//! Closure computation and deterministic ordering of a single run.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::dag::cycle::find_cycle;
use crate::dag::graph::TaskGraph;
use crate::errors::{Result, TaskdagError};
use crate::types::TaskName;

/// Why a task is part of the closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// A goal, or reachable from a goal through `requires` edges only.
    Demanded,
    /// Present only because some task in the closure is finalized by it
    /// (directly, or as a requirement of such a finalizer).
    Finalizer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub name: TaskName,
    pub inclusion: Inclusion,
}

/// Ordered sequence of tasks for one execution request.
///
/// Built fresh for each request and never stored on the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    entries: Vec<PlanEntry>,
}

impl ExecutionPlan {
    /// Compute the closure of `goals` and order it.
    ///
    /// Precedence constraints inside the closure:
    /// - `requires(a, b)`: `b` before `a`
    /// - `finalized_by(a, b)`: `a` before `b`
    /// - `soft_after(a, b)`: `b` before `a`, only when `b` is in the closure
    ///
    /// Among tasks that are free to go next, the one registered first wins.
    pub fn build<I, S>(graph: &TaskGraph, goals: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut goal_indices = Vec::new();
        for goal in goals {
            let goal = goal.as_ref();
            let idx = graph
                .index_of(goal)
                .ok_or_else(|| TaskdagError::UnknownTask(goal.to_string()))?;
            goal_indices.push(idx);
        }

        let inclusion = compute_closure(graph, &goal_indices);
        let order = order_closure(graph, &inclusion)?;

        let entries: Vec<PlanEntry> = order
            .into_iter()
            .map(|idx| PlanEntry {
                name: graph.task_at(idx).name.clone(),
                inclusion: inclusion[&idx],
            })
            .collect();

        debug!(
            order = ?entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            "computed execution plan"
        );

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Task names in execution order.
    pub fn order(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn inclusion_of(&self, name: &str) -> Option<Inclusion> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.inclusion)
    }
}

/// Goals plus everything they require, then every finalizer of anything
/// already included together with the finalizer's own requirements, until
/// nothing new is added. `soft_after` never pulls a task in.
fn compute_closure(graph: &TaskGraph, goals: &[usize]) -> HashMap<usize, Inclusion> {
    let mut inclusion: HashMap<usize, Inclusion> = HashMap::new();

    let mut stack: Vec<usize> = goals.to_vec();
    while let Some(idx) = stack.pop() {
        if inclusion.insert(idx, Inclusion::Demanded).is_some() {
            continue;
        }
        for dep in &graph.task_at(idx).requires {
            if let Some(dep_idx) = graph.index_of(dep) {
                stack.push(dep_idx);
            }
        }
    }

    let mut stack: Vec<usize> = inclusion.keys().copied().collect();
    while let Some(idx) = stack.pop() {
        let task = graph.task_at(idx);
        for name in task.finalized_by.iter().chain(task.requires.iter()) {
            let Some(next) = graph.index_of(name) else {
                continue;
            };
            if !inclusion.contains_key(&next) {
                trace!(task = %name, via = %task.name, "pulled into closure by finalization");
                inclusion.insert(next, Inclusion::Finalizer);
                stack.push(next);
            }
        }
    }

    inclusion
}

/// Kahn's algorithm with registration order as the tie-break.
fn order_closure(graph: &TaskGraph, closure: &HashMap<usize, Inclusion>) -> Result<Vec<usize>> {
    let mut successors: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut in_degree: HashMap<usize, usize> = closure.keys().map(|&idx| (idx, 0)).collect();

    let mut add_edge = |before: usize, after: usize| {
        successors.entry(before).or_default().push(after);
        *in_degree.entry(after).or_default() += 1;
    };

    let mut members: Vec<usize> = closure.keys().copied().collect();
    members.sort_unstable();

    for idx in members {
        let task = graph.task_at(idx);
        for dep in &task.requires {
            if let Some(dep_idx) = graph.index_of(dep) {
                add_edge(dep_idx, idx);
            }
        }
        for fin in &task.finalized_by {
            if let Some(fin_idx) = graph.index_of(fin) {
                add_edge(idx, fin_idx);
            }
        }
        for soft in &task.soft_after {
            match graph.index_of(soft) {
                Some(soft_idx) if closure.contains_key(&soft_idx) => add_edge(soft_idx, idx),
                _ => {}
            }
        }
    }

    let mut ready: BTreeSet<usize> = in_degree
        .iter()
        .filter(|&(_, &deg)| deg == 0)
        .map(|(&idx, _)| idx)
        .collect();
    let mut order = Vec::with_capacity(closure.len());

    while let Some(idx) = ready.pop_first() {
        order.push(idx);
        for &next in successors.get(&idx).map(Vec::as_slice).unwrap_or(&[]) {
            if let Some(deg) = in_degree.get_mut(&next) {
                *deg -= 1;
                if *deg == 0 {
                    ready.insert(next);
                }
            }
        }
    }

    if order.len() == closure.len() {
        return Ok(order);
    }

    // Whatever could not be ordered contains at least one cycle.
    let mut stuck: Vec<usize> = in_degree
        .iter()
        .filter(|&(_, &deg)| deg > 0)
        .map(|(&idx, _)| idx)
        .collect();
    stuck.sort_unstable();

    let nodes = stuck.iter().map(|&idx| graph.task_at(idx).name.as_str());
    let mut edges = Vec::new();
    for &from in &stuck {
        for &to in successors.get(&from).map(Vec::as_slice).unwrap_or(&[]) {
            if stuck.binary_search(&to).is_ok() {
                edges.push((graph.task_at(from).name.as_str(), graph.task_at(to).name.as_str()));
            }
        }
    }

    let path = find_cycle(nodes, edges).unwrap_or_else(|| {
        stuck
            .iter()
            .map(|&idx| graph.task_at(idx).name.clone())
            .collect()
    });
    Err(TaskdagError::Cycle { path })
}
