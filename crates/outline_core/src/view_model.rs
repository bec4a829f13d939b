use crate::{DocumentOutline, ServerHealth, SessionState, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub server: ServerHealth,
    pub selected: Vec<SelectedFileView>,
    pub tasks: Vec<TaskRowView>,
    pub completed: usize,
    pub total: usize,
    /// Read-only ordered view of the result aggregate (completion order,
    /// which equals selection order).
    pub results: Vec<DocumentOutline>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileView {
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub id: TaskId,
    pub name: String,
    pub status: TaskStatus,
    pub progress: Option<u8>,
    pub error: Option<String>,
}
