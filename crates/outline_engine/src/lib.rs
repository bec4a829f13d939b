//! Outline engine: extraction service client, sequential worker and export.
mod client;
mod engine;
mod export;
mod filename;
mod persist;
mod probe;
mod types;

pub use client::{ExtractSettings, OutlineService, ReqwestOutlineService};
pub use engine::EngineHandle;
pub use export::{write_exports, ExportDocument, ExportError, ExportOptions, ExportSummary};
pub use filename::export_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use probe::HealthPoller;
pub use types::{
    EngineEvent, ExtractError, ExtractedOutline, FailureKind, HealthReport, OutlineItem, TaskId,
};
