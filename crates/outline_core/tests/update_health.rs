use outline_core::{update, AppState, Msg, ServerHealth, SessionState};

#[test]
fn health_updates_are_display_only() {
    let state = AppState::new();
    assert_eq!(state.view().server, ServerHealth::Checking);

    let (mut state, effects) = update(state, Msg::HealthChecked(ServerHealth::Online));
    assert!(effects.is_empty());
    assert_eq!(state.view().server, ServerHealth::Online);
    assert!(state.consume_dirty());

    // Unchanged status does not mark the view dirty again.
    let (mut state, _) = update(state, Msg::HealthChecked(ServerHealth::Online));
    assert!(!state.consume_dirty());

    let (state, _) = update(state, Msg::HealthChecked(ServerHealth::Offline));
    let view = state.view();
    assert_eq!(view.server, ServerHealth::Offline);
    // An offline service never affects batch bookkeeping.
    assert_eq!(view.session, SessionState::Idle);
    assert!(view.tasks.is_empty());
}
