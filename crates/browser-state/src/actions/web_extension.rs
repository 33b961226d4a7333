use crate::state::WebExtensionState;

#[derive(Debug, Clone)]
pub enum WebExtensionAction {
    UpdateTabExtensionState {
        tab_id: String,
        extension: WebExtensionState,
    },
}
