use std::path::PathBuf;
use std::sync::Once;

use outline_core::{
    update, AppState, DocumentOutline, Effect, FailureClass, HeadingLevel, Msg, Notice,
    OutlineEntry, SelectedFile, SessionState, TaskFailure, TaskStatus,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(outline_logging::initialize_for_tests);
}

fn selection(names: &[&str]) -> Vec<SelectedFile> {
    names
        .iter()
        .map(|name| SelectedFile {
            name: (*name).to_string(),
            path: PathBuf::from(format!("/docs/{name}")),
            size_bytes: 1024,
        })
        .collect()
}

fn outline(file_name: &str) -> DocumentOutline {
    DocumentOutline {
        file_name: file_name.to_string(),
        title: format!("Title of {file_name}"),
        entries: vec![OutlineEntry {
            level: HeadingLevel::H1,
            text: "Introduction".to_string(),
            page: 1,
        }],
        raw_json: br#"{"title":"t","outline":[]}"#.to_vec(),
    }
}

fn start_batch(names: &[&str]) -> (AppState, Vec<Effect>) {
    let (state, _) = update(AppState::new(), Msg::FilesSelected(selection(names)));
    update(state, Msg::ExtractClicked)
}

#[test]
fn empty_selection_is_rejected_without_starting() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ExtractClicked);

    assert_eq!(effects, vec![Effect::Notify(Notice::EmptySelection)]);
    let view = state.view();
    assert_eq!(view.session, SessionState::Idle);
    assert!(view.tasks.is_empty());
}

#[test]
fn batch_start_initializes_ledger_and_extracts_first_file() {
    init_logging();
    let (state, effects) = start_batch(&["a.pdf", "b.pdf"]);
    let view = state.view();

    assert_eq!(view.session, SessionState::Running);
    assert_eq!(view.tasks.len(), 2);
    assert_eq!(view.tasks[0].status, TaskStatus::Processing);
    assert_eq!(view.tasks[1].status, TaskStatus::Pending);
    // Strictly sequential: only the first file is handed to the engine.
    assert_eq!(
        effects,
        vec![Effect::Extract {
            task_id: 1,
            file: selection(&["a.pdf", "b.pdf"])[0].clone(),
        }]
    );
}

#[test]
fn mixed_batch_preserves_order_and_isolates_the_failure() {
    init_logging();
    let (state, _) = start_batch(&["a.pdf", "b.pdf", "c.pdf"]);

    let (state, effects) = update(
        state,
        Msg::ExtractionSucceeded {
            task_id: 1,
            outline: outline("a.pdf"),
        },
    );
    assert!(matches!(effects.as_slice(), [Effect::Extract { task_id: 2, .. }]));

    let (state, effects) = update(
        state,
        Msg::ExtractionFailed {
            task_id: 2,
            failure: TaskFailure {
                kind: FailureClass::Service { status: 500 },
                message: "corrupt PDF".to_string(),
            },
        },
    );
    // Surfaced twice: a transient notice naming the file, and the remaining
    // loop keeps going.
    assert_eq!(
        effects[0],
        Effect::Notify(Notice::ExtractionFailed {
            file: "b.pdf".to_string(),
            message: "corrupt PDF".to_string(),
        })
    );
    assert!(matches!(effects[1], Effect::Extract { task_id: 3, .. }));

    let (state, effects) = update(
        state,
        Msg::ExtractionSucceeded {
            task_id: 3,
            outline: outline("c.pdf"),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::BatchFinished {
            completed: 2,
            total: 3,
        })]
    );

    let view = state.view();
    assert_eq!(view.session, SessionState::Idle);
    let statuses: Vec<_> = view.tasks.iter().map(|task| task.status).collect();
    assert_eq!(
        statuses,
        vec![TaskStatus::Completed, TaskStatus::Failed, TaskStatus::Completed]
    );
    assert_eq!(view.tasks[1].error.as_deref(), Some("corrupt PDF"));
    let result_names: Vec<_> = view
        .results
        .iter()
        .map(|document| document.file_name.as_str())
        .collect();
    assert_eq!(result_names, vec!["a.pdf", "c.pdf"]);
}

#[test]
fn summary_counts_the_last_file_of_the_batch() {
    init_logging();
    let (state, _) = start_batch(&["only.pdf"]);

    // The final transition must be visible to the summary: a single-file
    // all-success batch reports 1 of 1, not 0 of 1.
    let (state, effects) = update(
        state,
        Msg::ExtractionSucceeded {
            task_id: 1,
            outline: outline("only.pdf"),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::BatchFinished {
            completed: 1,
            total: 1,
        })]
    );
    assert_eq!(state.view().session, SessionState::Idle);
}

#[test]
fn all_failures_still_complete_the_batch() {
    init_logging();
    let (state, _) = start_batch(&["a.pdf", "b.pdf"]);
    let connectivity = TaskFailure {
        kind: FailureClass::Connectivity,
        message: "unable to reach the extraction service".to_string(),
    };

    let (state, effects) = update(
        state,
        Msg::ExtractionFailed {
            task_id: 1,
            failure: connectivity.clone(),
        },
    );
    assert!(matches!(effects.last(), Some(Effect::Extract { task_id: 2, .. })));

    let (state, effects) = update(
        state,
        Msg::ExtractionFailed {
            task_id: 2,
            failure: connectivity,
        },
    );
    assert_eq!(
        effects.last(),
        Some(&Effect::Notify(Notice::BatchFinished {
            completed: 0,
            total: 2,
        }))
    );

    let view = state.view();
    assert_eq!(view.session, SessionState::Idle);
    assert!(view.results.is_empty());
    assert!(view
        .tasks
        .iter()
        .all(|task| task.status == TaskStatus::Failed));
}

#[test]
fn progress_applies_only_while_processing() {
    init_logging();
    let (state, _) = start_batch(&["a.pdf", "b.pdf"]);

    let (mut state, effects) = update(
        state,
        Msg::ExtractionProgress {
            task_id: 1,
            percent: 40,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().tasks[0].progress, Some(40));
    assert!(state.consume_dirty());

    // Task 2 is still pending; progress for it is dropped.
    let (state, _) = update(
        state,
        Msg::ExtractionProgress {
            task_id: 2,
            percent: 40,
        },
    );
    assert_eq!(state.view().tasks[1].progress, None);
}

#[test]
fn stray_completion_events_are_ignored() {
    init_logging();
    let (state, _) = start_batch(&["a.pdf"]);

    // Unknown id: the ledger guard makes this a no-op and the batch must not
    // advance off it.
    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::ExtractionSucceeded {
            task_id: 99,
            outline: outline("ghost.pdf"),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);

    // A duplicate terminal event for an already-finished task is dropped too.
    let (state, _) = update(
        state,
        Msg::ExtractionSucceeded {
            task_id: 1,
            outline: outline("a.pdf"),
        },
    );
    let (state, effects) = update(
        state,
        Msg::ExtractionFailed {
            task_id: 1,
            failure: TaskFailure {
                kind: FailureClass::Unknown,
                message: "late duplicate".to_string(),
            },
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.tasks[0].status, TaskStatus::Completed);
    assert_eq!(view.tasks[0].error, None);
    assert_eq!(view.results.len(), 1);
}
