//! Custom Tab List Reducer

use crate::actions::CustomTabListAction;
use crate::state::BrowserState;
use lib_state::StoreError;

pub fn reduce_custom_tab_list(
    mut state: BrowserState,
    action: &CustomTabListAction,
) -> Result<BrowserState, StoreError> {
    match action {
        CustomTabListAction::AddCustomTab { tab } => {
            if state.contains_session(&tab.id) {
                return Err(StoreError::Rejected(format!(
                    "tab with id {} already exists",
                    tab.id
                )));
            }
            state.custom_tabs.push(tab.clone());
        }
        CustomTabListAction::RemoveCustomTab { tab_id } => {
            state.custom_tabs.retain(|tab| &tab.id != tab_id);
        }
        CustomTabListAction::RemoveAllCustomTabs => {
            state.custom_tabs.clear();
        }
        CustomTabListAction::TurnCustomTabIntoNormalTab { tab_id } => {
            match state.custom_tabs.iter().position(|tab| &tab.id == tab_id) {
                Some(index) => {
                    let custom_tab = state.custom_tabs.remove(index);
                    state.tabs.push(custom_tab.into_tab());
                }
                None => log::debug!("No custom tab {} to turn into a tab", tab_id),
            }
        }
    }
    Ok(state)
}
