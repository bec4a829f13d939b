//! Outline client core: pure batch state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, DocumentOutline, FailureClass, FileTask, HeadingLevel, Notice, OutlineEntry,
    SelectedFile, ServerHealth, SessionState, TaskFailure, TaskId, TaskStatus,
};
pub use update::update;
pub use view_model::{AppViewModel, SelectedFileView, TaskRowView};
