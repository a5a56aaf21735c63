pub mod commit_graph;
pub mod suggestion;

pub use commit_graph::CommitGraph;
pub use suggestion::suggested_versions;
