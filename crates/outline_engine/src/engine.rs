use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use outline_logging::outline_warn;

use crate::client::OutlineService;
use crate::types::{EngineEvent, ExtractError, FailureKind, TaskId};

enum EngineCommand {
    Extract {
        task_id: TaskId,
        file_name: String,
        path: PathBuf,
    },
}

/// Handle to the worker thread that talks to the extraction service.
///
/// Commands are processed strictly one at a time: the worker blocks on each
/// extraction before picking up the next command, so file *i+1* never starts
/// before file *i* has resolved.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn start(
        service: Arc<dyn OutlineService>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                // Sequential on purpose: no spawn, one block_on per command.
                runtime.block_on(handle_command(service.as_ref(), command, &event_tx));
            }
        });

        Self { cmd_tx }
    }

    pub fn extract(&self, task_id: TaskId, file_name: impl Into<String>, path: PathBuf) {
        let command = EngineCommand::Extract {
            task_id,
            file_name: file_name.into(),
            path,
        };
        if self.cmd_tx.send(command).is_err() {
            outline_warn!("engine worker is gone; dropping extract command");
        }
    }
}

async fn handle_command(
    service: &dyn OutlineService,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Extract {
            task_id,
            file_name,
            path,
        } => {
            let outcome = match tokio::fs::read(&path).await {
                Ok(bytes) => service.extract(&file_name, bytes).await,
                Err(err) => Err(ExtractError {
                    kind: FailureKind::Unknown,
                    message: format!("failed to read {}: {err}", path.display()),
                }),
            };
            let _ = event_tx.send(EngineEvent::ExtractionFinished {
                task_id,
                file_name,
                outcome,
            });
        }
    }
}
