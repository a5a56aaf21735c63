use crate::domain::Commit;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Node {
    /// Full commit data; `None` for parents outside the fetched range
    commit: Option<Commit>,
    /// Parent shas in git order (first parent first)
    parents: Vec<String>,
}

/// Parent graph of a commit range.
///
/// Every sha seen becomes a node, including parents that were not part of the
/// input. Edges point from a commit to its parents. The graph is built once
/// and only queried afterwards.
#[derive(Debug, Default)]
pub struct CommitGraph {
    nodes: HashMap<String, Node>,
    /// Number of children per node
    in_degree: HashMap<String, usize>,
    /// Node shas in first-seen order, so root detection is deterministic
    order: Vec<String>,
}

impl CommitGraph {
    pub fn new(commits: impl IntoIterator<Item = Commit>) -> Self {
        let mut graph = CommitGraph::default();

        for commit in commits {
            graph.touch(&commit.sha);

            let has_payload = graph
                .nodes
                .get(&commit.sha)
                .is_some_and(|node| node.commit.is_some());
            if has_payload {
                debug!(sha = %commit.sha, "duplicate commit in range, keeping the first");
                continue;
            }

            let parents: Vec<String> = commit.parent_shas().map(str::to_string).collect();
            for parent in &parents {
                graph.touch(parent);
                *graph.in_degree.entry(parent.clone()).or_insert(0) += 1;
            }

            if let Some(node) = graph.nodes.get_mut(&commit.sha) {
                node.parents = parents;
                node.commit = Some(commit);
            }
        }

        debug!(nodes = graph.nodes.len(), "built commit graph");
        graph
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn tips(&self) -> impl Iterator<Item = &String> {
        self.order
            .iter()
            .filter(|sha| self.in_degree.get(*sha).copied().unwrap_or(0) == 0)
    }

    /// Number of nodes no other commit points to
    pub fn tip_count(&self) -> usize {
        self.tips().count()
    }

    /// The branch tip: the only node no other commit points to.
    ///
    /// Returns `None` when there are zero or several such nodes.
    pub fn tip(&self) -> Option<&str> {
        let mut roots = self.tips();

        match (roots.next(), roots.next()) {
            (Some(tip), None) => Some(tip.as_str()),
            (None, _) => None,
            (Some(_), Some(_)) => {
                warn!("commit range has more than one tip");
                None
            }
        }
    }

    /// Commits on the first-parent chain from the tip, newest first.
    ///
    /// With `depth > 1`, the second-parent history of every merge on the chain
    /// is walked the same way with `depth - 1`, and those commits are placed
    /// right after the merge commit. A walk stops at the first parent outside
    /// the fetched range. Depth 0, or a graph without a unique tip, yields
    /// nothing.
    pub fn first_parents(&self, depth: usize) -> Vec<&Commit> {
        let Some(tip) = self.tip() else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut seen = HashSet::new();
        self.walk(tip, depth, &mut result, &mut seen);
        result
    }

    fn walk<'a>(
        &'a self,
        start: &'a str,
        depth: usize,
        result: &mut Vec<&'a Commit>,
        seen: &mut HashSet<&'a str>,
    ) {
        if depth == 0 {
            return;
        }

        let mut on_chain = HashSet::new();
        let mut current = Some(start);

        while let Some(sha) = current {
            let Some(node) = self.nodes.get(sha) else {
                break;
            };
            let Some(commit) = &node.commit else {
                break;
            };
            if !on_chain.insert(sha) {
                warn!(sha, "cycle in commit graph");
                break;
            }

            if seen.insert(commit.sha.as_str()) {
                result.push(commit);
            }

            if node.parents.len() > 1 {
                if let Some(last) = node.parents.last() {
                    self.walk(last, depth - 1, result, seen);
                }
            }

            current = node.parents.first().map(String::as_str);
        }
    }

    fn touch(&mut self, sha: &str) {
        if !self.nodes.contains_key(sha) {
            self.nodes.insert(sha.to_string(), Node::default());
            self.order.push(sha.to_string());
        }
    }
}
