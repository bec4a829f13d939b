use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use outline_core::{update, AppState, Msg, SessionState};
use outline_engine::{
    write_exports, EngineHandle, ExportDocument, ExportOptions, ExtractSettings, HealthPoller,
    OutlineService, ReqwestOutlineService,
};
use outline_logging::outline_info;

use crate::render::StatusPrinter;
use crate::runner::{map_event, EffectRunner};
use crate::{render, selector, Cli};

const HEALTH_INTERVAL: Duration = Duration::from_secs(30);

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let selection = selector::select_files(&cli.files);

    let settings = ExtractSettings {
        base_url: cli.server.clone(),
        ..ExtractSettings::default()
    };
    let service: Arc<dyn OutlineService> = Arc::new(
        ReqwestOutlineService::new(settings).context("failed to build the extraction client")?,
    );

    let (event_tx, event_rx) = mpsc::channel();
    let engine = EngineHandle::start(service.clone(), event_tx.clone());
    let mut poller = HealthPoller::start(service, HEALTH_INTERVAL, event_tx);
    let runner = EffectRunner::new(engine);

    outline_info!(
        "batch started at {} against {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        cli.server
    );

    let mut printer = StatusPrinter::new();
    let mut state = AppState::new();
    state = dispatch(state, Msg::FilesSelected(selection), &runner);
    render::render_selection(&state.view());
    state = dispatch(state, Msg::ExtractClicked, &runner);
    printer.render(&mut state);

    // Drain engine and probe events until the batch clears its busy flag.
    // Each extraction completion drives the next file through `update`, so
    // the loop body stays a plain message pump.
    while state.session() == SessionState::Running {
        let event = event_rx
            .recv()
            .context("engine channel closed unexpectedly")?;
        state = dispatch(state, map_event(event), &runner);
        printer.render(&mut state);
    }

    poller.stop();

    let view = state.view();
    render::render_outlines(&view);

    if !cli.no_export && !view.results.is_empty() {
        let documents: Vec<ExportDocument<'_>> = view
            .results
            .iter()
            .map(|document| ExportDocument {
                file_name: &document.file_name,
                raw_json: &document.raw_json,
            })
            .collect();
        let summary = write_exports(&cli.output, &documents, &ExportOptions::default())
            .context("failed to write JSON exports")?;
        render::render_export_summary(&summary);
    }

    outline_info!(
        "batch finished at {}: {} of {} completed",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        view.completed,
        view.total
    );
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}
