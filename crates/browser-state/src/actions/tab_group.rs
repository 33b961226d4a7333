use crate::state::TabGroup;

/// Tab group changes; every referenced tab must exist
#[derive(Debug, Clone)]
pub enum TabGroupAction {
    AddTabGroup { partition_id: String, group: TabGroup },
    RemoveTabGroup { partition_id: String, group_id: String },
    AddTabsToGroup {
        partition_id: String,
        group_id: String,
        tab_ids: Vec<String>,
    },
    RemoveTabsFromGroup {
        partition_id: String,
        group_id: String,
        tab_ids: Vec<String>,
    },
}
