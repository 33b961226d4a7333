use crate::actions::WebExtensionAction;
use crate::state::BrowserState;

pub fn reduce_web_extension(mut state: BrowserState, action: &WebExtensionAction) -> BrowserState {
    match action {
        WebExtensionAction::UpdateTabExtensionState { tab_id, extension } => {
            state.update_session(tab_id, |session| {
                session
                    .extension_state_mut()
                    .insert(extension.id.clone(), extension.clone());
            })
        }
    }
    state
}
