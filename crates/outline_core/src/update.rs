use crate::{AppState, Effect, Msg, Notice, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            // The orchestrator only reads the selection at batch start, and a
            // running batch keeps the list it was started with.
            if state.session() == SessionState::Running {
                return (state, Vec::new());
            }
            state.set_selection(files);
            Vec::new()
        }
        Msg::ExtractClicked => {
            // The busy flag is the only concurrency guard: a second trigger
            // while a batch is in flight is ignored.
            if state.session() == SessionState::Running {
                return (state, Vec::new());
            }
            if state.selection().is_empty() {
                return (state, vec![Effect::Notify(Notice::EmptySelection)]);
            }
            state.begin_batch();
            start_next(&mut state).into_iter().collect()
        }
        Msg::ExtractionSucceeded { task_id, outline } => {
            if state.session() != SessionState::Running {
                return (state, Vec::new());
            }
            if !state.apply_success(task_id, outline) {
                // Unknown or non-processing id: defensive no-op, and a stray
                // event must not advance the batch either.
                return (state, Vec::new());
            }
            advance(&mut state)
        }
        Msg::ExtractionFailed { task_id, failure } => {
            if state.session() != SessionState::Running {
                return (state, Vec::new());
            }
            let file = match state.task_name(task_id) {
                Some(name) => name.to_string(),
                None => return (state, Vec::new()),
            };
            let message = failure.message.clone();
            if !state.apply_failure(task_id, failure) {
                return (state, Vec::new());
            }
            // A failure is contained to its own task: notify, then keep
            // attempting the remaining files.
            let mut effects = vec![Effect::Notify(Notice::ExtractionFailed { file, message })];
            effects.extend(advance(&mut state));
            effects
        }
        Msg::ExtractionProgress { task_id, percent } => {
            state.apply_progress(task_id, percent);
            Vec::new()
        }
        Msg::ResetClicked => {
            // Reset is disabled while busy; otherwise it is unconditional.
            if state.session() == SessionState::Running {
                return (state, Vec::new());
            }
            state.reset();
            Vec::new()
        }
        Msg::HealthChecked(health) => {
            state.set_server_health(health);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// After a terminal transition: start the next pending file, or close the
/// batch. The summary is counted from the ledger as it stands now, with the
/// final transition already applied.
fn advance(state: &mut AppState) -> Vec<Effect> {
    if let Some(effect) = start_next(state) {
        return vec![effect];
    }
    let completed = state.completed_count();
    let total = state.task_count();
    state.finish_batch();
    vec![Effect::Notify(Notice::BatchFinished { completed, total })]
}

fn start_next(state: &mut AppState) -> Option<Effect> {
    state
        .start_next()
        .map(|(task_id, file)| Effect::Extract { task_id, file })
}
