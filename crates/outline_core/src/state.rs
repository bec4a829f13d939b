use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::view_model::{AppViewModel, SelectedFileView, TaskRowView};

pub type TaskId = u64;

/// A file handed over by the file selector: display name plus the path the
/// engine reads the bytes from at extraction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerHealth {
    #[default]
    Checking,
    Online,
    Offline,
}

/// Classified cause of a failed extraction, mirrored from the engine at the
/// app boundary so the core stays IO-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The service responded with a non-success status.
    Service { status: u16 },
    /// The service could not be reached at all.
    Connectivity,
    /// Anything else, wrapping the underlying cause's message.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub kind: FailureClass,
    pub message: String,
}

/// Heading rank tag as reported by the extraction service. Unrecognized tags
/// are preserved verbatim in `Other` so they survive a round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    Other(String),
}

impl HeadingLevel {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "H1" => HeadingLevel::H1,
            "H2" => HeadingLevel::H2,
            "H3" => HeadingLevel::H3,
            other => HeadingLevel::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::Other(tag) => tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

/// One successfully extracted document. `raw_json` is the exact response
/// body received from the service; exports reuse it so they stay
/// byte-identical to what the service produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutline {
    pub file_name: String,
    pub title: String,
    pub entries: Vec<OutlineEntry>,
    pub raw_json: Vec<u8>,
}

/// Ledger entry for one selected file. `error` and `result` are mutually
/// exclusive and each is set at most once, at the terminal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub id: TaskId,
    pub name: String,
    pub status: TaskStatus,
    pub progress: Option<u8>,
    pub error: Option<TaskFailure>,
    pub result: Option<DocumentOutline>,
}

/// Transient user-visible notification, emitted as an effect and rendered
/// once by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptySelection,
    ExtractionFailed { file: String, message: String },
    BatchFinished { completed: usize, total: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    server: ServerHealth,
    selected: Vec<SelectedFile>,
    tasks: BTreeMap<TaskId, FileTask>,
    results: Vec<DocumentOutline>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            server: self.server,
            selected: self
                .selected
                .iter()
                .map(|file| SelectedFileView {
                    name: file.name.clone(),
                    size_bytes: file.size_bytes,
                })
                .collect(),
            tasks: self
                .tasks
                .values()
                .map(|task| TaskRowView {
                    id: task.id,
                    name: task.name.clone(),
                    status: task.status,
                    progress: task.progress,
                    error: task.error.as_ref().map(|failure| failure.message.clone()),
                })
                .collect(),
            completed: self.completed_count(),
            total: self.tasks.len(),
            results: self.results.clone(),
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn selection(&self) -> &[SelectedFile] {
        &self.selected
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_selection(&mut self, files: Vec<SelectedFile>) {
        self.selected = files;
        self.mark_dirty();
    }

    /// Replaces the ledger with one `Pending` task per selected file, in
    /// selection order, and clears the result aggregate. Task ids start at 1
    /// and are never reused within a batch.
    pub(crate) fn begin_batch(&mut self) {
        self.session = SessionState::Running;
        self.results.clear();
        self.tasks = self
            .selected
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let id = index as TaskId + 1;
                (
                    id,
                    FileTask {
                        id,
                        name: file.name.clone(),
                        status: TaskStatus::Pending,
                        progress: None,
                        error: None,
                        result: None,
                    },
                )
            })
            .collect();
        self.mark_dirty();
    }

    /// Marks the first `Pending` task (ascending id, which equals selection
    /// order) as `Processing` and returns it together with its file.
    pub(crate) fn start_next(&mut self) -> Option<(TaskId, SelectedFile)> {
        let id = self
            .tasks
            .values()
            .find(|task| task.status == TaskStatus::Pending)?
            .id;
        let file = self.selected.get(id as usize - 1)?.clone();
        if let Some(task) = self.tasks.get_mut(&id) {
            task.status = TaskStatus::Processing;
        }
        self.mark_dirty();
        Some((id, file))
    }

    pub(crate) fn task_name(&self, id: TaskId) -> Option<&str> {
        self.tasks.get(&id).map(|task| task.name.as_str())
    }

    /// Ledger transition to `Completed`. Returns false (and changes nothing)
    /// if the id is unknown or the task is not currently `Processing`.
    pub(crate) fn apply_success(&mut self, id: TaskId, outline: DocumentOutline) -> bool {
        let Some(task) = self.tasks.get_mut(&id) else {
            return false;
        };
        if task.status != TaskStatus::Processing {
            return false;
        }
        task.status = TaskStatus::Completed;
        task.progress = None;
        task.result = Some(outline.clone());
        self.results.push(outline);
        self.mark_dirty();
        true
    }

    /// Ledger transition to `Failed`. Same defensive guard as
    /// [`AppState::apply_success`].
    pub(crate) fn apply_failure(&mut self, id: TaskId, failure: TaskFailure) -> bool {
        let Some(task) = self.tasks.get_mut(&id) else {
            return false;
        };
        if task.status != TaskStatus::Processing {
            return false;
        }
        task.status = TaskStatus::Failed;
        task.progress = None;
        task.error = Some(failure);
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_progress(&mut self, id: TaskId, percent: u8) {
        if let Some(task) = self.tasks.get_mut(&id) {
            if task.status == TaskStatus::Processing {
                task.progress = Some(percent.min(100));
                self.mark_dirty();
            }
        }
    }

    pub(crate) fn finish_batch(&mut self) {
        self.session = SessionState::Idle;
        self.mark_dirty();
    }

    /// Unconditional hard reset: selection, ledger and aggregate are all
    /// cleared. The caller is responsible for rejecting this while running.
    pub(crate) fn reset(&mut self) {
        self.selected.clear();
        self.tasks.clear();
        self.results.clear();
        self.mark_dirty();
    }

    pub(crate) fn set_server_health(&mut self, health: ServerHealth) {
        if self.server != health {
            self.server = health;
            self.mark_dirty();
        }
    }

    pub fn completed_count(&self) -> usize {
        self.tasks
            .values()
            .filter(|task| task.status == TaskStatus::Completed)
            .count()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
