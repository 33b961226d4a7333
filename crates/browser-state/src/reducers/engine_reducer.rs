//! Engine Reducer
//!
//! Only touches the `EngineState` of the addressed tab or custom tab.

use crate::actions::EngineAction;
use crate::state::BrowserState;

pub fn reduce_engine(mut state: BrowserState, action: &EngineAction) -> BrowserState {
    match action {
        EngineAction::LinkEngineSession {
            tab_id,
            engine_session,
            timestamp,
            ..
        } => state.update_session(tab_id, |session| {
            let engine_state = session.engine_state_mut();
            engine_state.engine_session = Some(engine_session.clone());
            engine_state.timestamp = Some(*timestamp);
            engine_state.crashed = false;
        }),
        EngineAction::UnlinkEngineSession { tab_id } => state.update_session(tab_id, |session| {
            let engine_state = session.engine_state_mut();
            engine_state.engine_session = None;
            engine_state.engine_observer = None;
        }),
        EngineAction::UpdateEngineSessionObserver { tab_id, observer } => {
            state.update_session(tab_id, |session| {
                session.engine_state_mut().engine_observer = Some(observer.clone());
            })
        }
        EngineAction::UpdateEngineSessionState {
            tab_id,
            state: session_state,
        } => state.update_session(tab_id, |session| {
            session.engine_state_mut().engine_session_state = Some(session_state.clone());
        }),
        EngineAction::LoadFailed { tab_id, message } => state.update_session(tab_id, |session| {
            let content = session.content_mut();
            content.error = Some(message.clone());
            content.loading = false;
        }),
        // handled by the engine middleware
        EngineAction::CreateEngineSession { .. }
        | EngineAction::SuspendEngineSession { .. }
        | EngineAction::LoadUrl { .. }
        | EngineAction::Reload { .. }
        | EngineAction::GoBack { .. }
        | EngineAction::GoForward { .. } => {}
    }
    state
}
