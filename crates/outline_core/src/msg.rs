#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// File selector handed over a new ordered selection (full replace).
    FilesSelected(Vec<crate::SelectedFile>),
    /// User triggered the batch.
    ExtractClicked,
    /// User requested a hard reset of selection, ledger and results.
    ResetClicked,
    /// Engine finished a file successfully.
    ExtractionSucceeded {
        task_id: crate::TaskId,
        outline: crate::DocumentOutline,
    },
    /// Engine finished a file with a classified failure.
    ExtractionFailed {
        task_id: crate::TaskId,
        failure: crate::TaskFailure,
    },
    /// Engine progress for the file currently processing.
    ExtractionProgress {
        task_id: crate::TaskId,
        percent: u8,
    },
    /// Health probe result; display only.
    HealthChecked(crate::ServerHealth),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
