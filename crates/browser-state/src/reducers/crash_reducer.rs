use crate::actions::CrashAction;
use crate::state::BrowserState;

pub fn reduce_crash(mut state: BrowserState, action: &CrashAction) -> BrowserState {
    match action {
        CrashAction::SessionCrashed { tab_id } => state.update_session(tab_id, |session| {
            session.engine_state_mut().crashed = true;
            session.content_mut().loading = false;
        }),
        CrashAction::RestoreCrashedSession { tab_id } => state.update_session(tab_id, |session| {
            session.engine_state_mut().crashed = false;
        }),
    }
    state
}
