//! Tab Group Reducer
//!
//! Groups may only reference tabs that exist when the group is created or
//! extended. Partitions without groups are dropped.

use crate::actions::TabGroupAction;
use crate::state::{BrowserState, TabPartition};
use lib_state::StoreError;

pub fn reduce_tab_group(
    mut state: BrowserState,
    action: &TabGroupAction,
) -> Result<BrowserState, StoreError> {
    match action {
        TabGroupAction::AddTabGroup {
            partition_id,
            group,
        } => {
            ensure_tabs_exist(&state, &group.tab_ids)?;
            let partition = state
                .tab_partitions
                .entry(partition_id.clone())
                .or_insert_with(|| TabPartition::new(partition_id.clone()));
            if partition.group(&group.id).is_some() {
                return Err(StoreError::Rejected(format!(
                    "group {} already exists in partition {}",
                    group.id, partition_id
                )));
            }
            partition.tab_groups.push(group.clone());
        }
        TabGroupAction::RemoveTabGroup {
            partition_id,
            group_id,
        } => {
            if let Some(partition) = state.tab_partitions.get_mut(partition_id) {
                partition.tab_groups.retain(|group| &group.id != group_id);
                if partition.tab_groups.is_empty() {
                    state.tab_partitions.remove(partition_id);
                }
            }
        }
        TabGroupAction::AddTabsToGroup {
            partition_id,
            group_id,
            tab_ids,
        } => {
            ensure_tabs_exist(&state, tab_ids)?;
            let group = state
                .tab_partitions
                .get_mut(partition_id)
                .and_then(|partition| partition.tab_groups.iter_mut().find(|g| &g.id == group_id))
                .ok_or_else(|| {
                    StoreError::Rejected(format!(
                        "group {} does not exist in partition {}",
                        group_id, partition_id
                    ))
                })?;
            for tab_id in tab_ids {
                if !group.tab_ids.contains(tab_id) {
                    group.tab_ids.push(tab_id.clone());
                }
            }
        }
        TabGroupAction::RemoveTabsFromGroup {
            partition_id,
            group_id,
            tab_ids,
        } => {
            if let Some(group) = state
                .tab_partitions
                .get_mut(partition_id)
                .and_then(|partition| partition.tab_groups.iter_mut().find(|g| &g.id == group_id))
            {
                group.tab_ids.retain(|id| !tab_ids.contains(id));
            }
        }
    }
    Ok(state)
}

fn ensure_tabs_exist(state: &BrowserState, tab_ids: &[String]) -> Result<(), StoreError> {
    match tab_ids.iter().find(|id| state.find_tab(id).is_none()) {
        Some(missing) => Err(StoreError::Rejected(format!(
            "tab {} does not exist",
            missing
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{create_tab, TabGroup};
    use pretty_assertions::assert_eq;

    fn state() -> BrowserState {
        BrowserState::with_tabs(
            vec![
                create_tab("https://a.org").with_id("a"),
                create_tab("https://b.org").with_id("b"),
            ],
            None,
        )
    }

    fn add_group(state: BrowserState, tab_ids: &[&str]) -> Result<BrowserState, StoreError> {
        reduce_tab_group(
            state,
            &TabGroupAction::AddTabGroup {
                partition_id: "p".into(),
                group: TabGroup::new(
                    "g",
                    "Group",
                    tab_ids.iter().map(|id| id.to_string()).collect(),
                ),
            },
        )
    }

    #[test]
    fn test_add_group() {
        let state = add_group(state(), &["a"]).unwrap();

        let group = state.tab_partitions["p"].group("g").unwrap();
        assert_eq!(group.tab_ids, vec!["a".to_string()]);
    }

    #[test]
    fn test_add_group_with_unknown_tab_is_rejected() {
        assert!(matches!(
            add_group(state(), &["a", "zzz"]),
            Err(StoreError::Rejected(_))
        ));
    }

    #[test]
    fn test_duplicate_group_is_rejected() {
        let state = add_group(state(), &["a"]).unwrap();
        assert!(matches!(add_group(state, &["b"]), Err(StoreError::Rejected(_))));
    }

    #[test]
    fn test_add_and_remove_tabs() {
        let state = add_group(state(), &["a"]).unwrap();
        let state = reduce_tab_group(
            state,
            &TabGroupAction::AddTabsToGroup {
                partition_id: "p".into(),
                group_id: "g".into(),
                tab_ids: vec!["a".into(), "b".into()],
            },
        )
        .unwrap();
        assert_eq!(
            state.tab_partitions["p"].tab_groups[0].tab_ids,
            vec!["a".to_string(), "b".to_string()]
        );

        let rejected = reduce_tab_group(
            state.clone(),
            &TabGroupAction::AddTabsToGroup {
                partition_id: "p".into(),
                group_id: "g".into(),
                tab_ids: vec!["zzz".into()],
            },
        );
        assert!(matches!(rejected, Err(StoreError::Rejected(_))));

        let state = reduce_tab_group(
            state,
            &TabGroupAction::RemoveTabsFromGroup {
                partition_id: "p".into(),
                group_id: "g".into(),
                tab_ids: vec!["a".into()],
            },
        )
        .unwrap();
        assert_eq!(
            state.tab_partitions["p"].tab_groups[0].tab_ids,
            vec!["b".to_string()]
        );
    }

    #[test]
    fn test_removing_last_group_drops_partition() {
        let state = add_group(state(), &["a"]).unwrap();
        let state = reduce_tab_group(
            state,
            &TabGroupAction::RemoveTabGroup {
                partition_id: "p".into(),
                group_id: "g".into(),
            },
        )
        .unwrap();

        assert!(state.tab_partitions.is_empty());
    }
}
