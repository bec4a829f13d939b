use outline_core::{
    DocumentOutline, Effect, FailureClass, HeadingLevel, Msg, OutlineEntry, ServerHealth,
    TaskFailure,
};
use outline_engine::{EngineEvent, EngineHandle, ExtractError, ExtractedOutline, FailureKind};
use outline_logging::{outline_info, outline_warn};

use crate::render;

/// Executes the effects returned by the core's update function: uploads go
/// to the engine worker, notices go straight to the terminal.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Extract { task_id, file } => {
                    outline_info!(
                        "extract task_id={} file={} size={}",
                        task_id,
                        file.name,
                        file.size_bytes
                    );
                    self.engine.extract(task_id, file.name, file.path);
                }
                Effect::Notify(notice) => render::render_notice(&notice),
            }
        }
    }
}

/// Translates an engine event into the core's message vocabulary.
pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ExtractionFinished {
            task_id,
            file_name,
            outcome,
        } => match outcome {
            Ok(extracted) => Msg::ExtractionSucceeded {
                task_id,
                outline: map_outline(file_name, extracted),
            },
            Err(err) => {
                outline_warn!("task {} failed: {}", task_id, err);
                Msg::ExtractionFailed {
                    task_id,
                    failure: map_failure(err),
                }
            }
        },
        EngineEvent::Health(result) => Msg::HealthChecked(match result {
            Ok(_) => ServerHealth::Online,
            Err(_) => ServerHealth::Offline,
        }),
    }
}

fn map_outline(file_name: String, extracted: ExtractedOutline) -> DocumentOutline {
    DocumentOutline {
        file_name,
        title: extracted.title,
        entries: extracted
            .outline
            .into_iter()
            .map(|item| OutlineEntry {
                level: HeadingLevel::from_tag(&item.level),
                text: item.text,
                page: item.page,
            })
            .collect(),
        raw_json: extracted.raw_json,
    }
}

fn map_failure(err: ExtractError) -> TaskFailure {
    let kind = match err.kind {
        FailureKind::Service { status } => FailureClass::Service { status },
        FailureKind::Connectivity => FailureClass::Connectivity,
        FailureKind::Unknown => FailureClass::Unknown,
    };
    TaskFailure {
        kind,
        message: err.message,
    }
}
