#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload one file to the extraction service. Issued one at a time; the
    /// next one is only emitted once this one's completion message arrives.
    Extract {
        task_id: crate::TaskId,
        file: crate::SelectedFile,
    },
    /// Show a transient notification to the user.
    Notify(crate::Notice),
}
