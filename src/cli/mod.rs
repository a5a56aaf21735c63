//! Release build workflow behind the command line

pub mod menu;
pub mod orchestration;

pub use menu::{run_menu, MenuChoice, MenuOutcome};
pub use orchestration::{
    assemble_release, run_build_release, type_selector, AssembledRelease, BuildReleaseArgs,
    WorkflowResult,
};
