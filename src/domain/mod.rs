//! Domain model - change types, changes, and commits, independent of GitHub

pub mod change;
pub mod change_type;
pub mod commit;

pub use change::{Change, ChangeKind, ChangeList};
pub use change_type::{Type, TypeManager, IGNORE_CODE};
pub use commit::Commit;
