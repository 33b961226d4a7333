use crate::actions::LastAccessAction;
use crate::state::BrowserState;

pub fn reduce_last_access(mut state: BrowserState, action: &LastAccessAction) -> BrowserState {
    match action {
        LastAccessAction::UpdateLastAccess {
            tab_id,
            last_access,
        } => state.update_tab(tab_id, |tab| tab.last_access = *last_access),
    }
    state
}
