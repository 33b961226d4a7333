use crate::state::CustomTabSessionState;

#[derive(Debug, Clone)]
pub enum CustomTabListAction {
    AddCustomTab { tab: CustomTabSessionState },
    RemoveCustomTab { tab_id: String },
    RemoveAllCustomTabs,
    /// Move a custom tab into the tab list, keeping its engine session
    TurnCustomTabIntoNormalTab { tab_id: String },
}
