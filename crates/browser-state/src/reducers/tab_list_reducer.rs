//! Tab List Reducer
//!
//! Adds, selects, removes and restores tabs while keeping ids unique,
//! parents resolvable and the selection pointing at an existing tab.

use crate::actions::TabListAction;
use crate::state::{BrowserState, RecoverableTab, RestoreLocation, TabSessionState};
use lib_state::StoreError;
use std::collections::{HashMap, HashSet};

pub fn reduce_tab_list(
    mut state: BrowserState,
    action: &TabListAction,
) -> Result<BrowserState, StoreError> {
    match action {
        TabListAction::AddTab { tab, select } => {
            if state.contains_session(&tab.id) {
                return Err(StoreError::Rejected(format!(
                    "tab with id {} already exists",
                    tab.id
                )));
            }

            let index = match &tab.parent_id {
                Some(parent_id) => {
                    let parent_index = state.tab_index(parent_id).ok_or_else(|| {
                        StoreError::Rejected(format!(
                            "parent {} of tab {} does not exist",
                            parent_id, tab.id
                        ))
                    })?;
                    insertion_index_after_family(&state.tabs, parent_index)
                }
                None => state.tabs.len(),
            };

            state.tabs.insert(index, tab.clone());
            if *select || state.selected_tab_id.is_none() {
                state.selected_tab_id = Some(tab.id.clone());
            }
        }
        TabListAction::AddMultipleTabs { tabs } => {
            let mut incoming = HashSet::new();
            for tab in tabs {
                if state.contains_session(&tab.id) || !incoming.insert(tab.id.as_str()) {
                    return Err(StoreError::Rejected(format!(
                        "tab with id {} already exists",
                        tab.id
                    )));
                }
                if tab.parent_id.is_some() {
                    return Err(StoreError::Rejected(format!(
                        "tab {} has a parent, tabs with parents must be added one by one",
                        tab.id
                    )));
                }
            }

            state.tabs.extend(tabs.iter().cloned());
            if state.selected_tab_id.is_none() {
                state.selected_tab_id = tabs.first().map(|tab| tab.id.clone());
            }
        }
        TabListAction::SelectTab { tab_id } => {
            if state.find_tab(tab_id).is_none() {
                return Err(StoreError::Rejected(format!(
                    "cannot select unknown tab {}",
                    tab_id
                )));
            }
            state.selected_tab_id = Some(tab_id.clone());
        }
        TabListAction::RemoveTab {
            tab_id,
            select_parent_if_exists,
        } => {
            let ids = HashSet::from([tab_id.as_str()]);
            state = remove_tabs(state, &ids, *select_parent_if_exists);
        }
        TabListAction::RemoveTabs { tab_ids } => {
            let ids = tab_ids.iter().map(String::as_str).collect();
            state = remove_tabs(state, &ids, false);
        }
        TabListAction::RemoveAllTabs => {
            let ids: Vec<String> = state.tabs.iter().map(|tab| tab.id.clone()).collect();
            state = remove_tabs(state, &ids.iter().map(String::as_str).collect(), false);
        }
        TabListAction::RemoveAllNormalTabs => {
            let ids: Vec<String> = state.normal_tabs().map(|tab| tab.id.clone()).collect();
            state = remove_tabs(state, &ids.iter().map(String::as_str).collect(), false);
        }
        TabListAction::RemoveAllPrivateTabs => {
            let ids: Vec<String> = state.private_tabs().map(|tab| tab.id.clone()).collect();
            state = remove_tabs(state, &ids.iter().map(String::as_str).collect(), false);
        }
        TabListAction::Restore {
            tabs,
            selected_tab_id,
            restore_location,
        } => {
            state = restore(state, tabs, *restore_location);
            if let Some(selected) = selected_tab_id {
                if state.find_tab(selected).is_some() {
                    state.selected_tab_id = Some(selected.clone());
                } else {
                    log::warn!("Restored selection {} is not a tab, keeping selection", selected);
                }
            }
        }
    }
    Ok(state)
}

/// Index right after the parent and the block of its descendants that follows it
fn insertion_index_after_family(tabs: &[TabSessionState], parent_index: usize) -> usize {
    let parent_id = tabs[parent_index].id.as_str();
    let parents: HashMap<&str, &str> = tabs
        .iter()
        .filter_map(|tab| tab.parent_id.as_deref().map(|parent| (tab.id.as_str(), parent)))
        .collect();

    let descends_from_parent = |tab: &TabSessionState| {
        let mut current = tab.parent_id.as_deref();
        // bounded walk, a corrupt parent chain must not hang the reducer
        for _ in 0..tabs.len() {
            match current {
                Some(id) if id == parent_id => return true,
                Some(id) => current = parents.get(id).copied(),
                None => return false,
            }
        }
        false
    };

    let mut index = parent_index + 1;
    while index < tabs.len() && descends_from_parent(&tabs[index]) {
        index += 1;
    }
    index
}

/// Remove `ids` from the tab list and repair parents, groups and selection
fn remove_tabs(
    mut state: BrowserState,
    ids: &HashSet<&str>,
    select_parent_if_exists: bool,
) -> BrowserState {
    let removed: HashMap<String, Option<String>> = state
        .tabs
        .iter()
        .filter(|tab| ids.contains(tab.id.as_str()))
        .map(|tab| (tab.id.clone(), tab.parent_id.clone()))
        .collect();
    if removed.is_empty() {
        return state;
    }

    let selected_removed = state
        .selected_tab_id
        .as_deref()
        .and_then(|selected| state.tab_index(selected))
        .filter(|index| removed.contains_key(&state.tabs[*index].id));
    let replacement = selected_removed
        .and_then(|index| next_selection(&state, index, &removed, select_parent_if_exists));

    state.tabs.retain(|tab| !removed.contains_key(&tab.id));

    for tab in &mut state.tabs {
        let mut parent = tab.parent_id.take();
        // climb to the first ancestor that survives
        for _ in 0..=removed.len() {
            match parent.as_ref().and_then(|id| removed.get(id)) {
                Some(removed_parent) => parent = removed_parent.clone(),
                None => break,
            }
        }
        tab.parent_id = parent;
    }

    for partition in state.tab_partitions.values_mut() {
        for group in &mut partition.tab_groups {
            group.tab_ids.retain(|id| !removed.contains_key(id));
        }
    }

    if selected_removed.is_some() {
        state.selected_tab_id = replacement;
    }

    log::debug!("Removed {} tabs", removed.len());
    state
}

/// Choose the tab to select after the selected tab at `index` is removed
///
/// The parent wins if requested and it survives. Otherwise the closest
/// surviving tab with the same privacy, looking at the previous tab first.
fn next_selection(
    state: &BrowserState,
    index: usize,
    removed: &HashMap<String, Option<String>>,
    select_parent_if_exists: bool,
) -> Option<String> {
    let selected = &state.tabs[index];

    if select_parent_if_exists {
        if let Some(parent) = selected
            .parent_id
            .as_deref()
            .filter(|parent| !removed.contains_key(*parent))
            .and_then(|parent| state.find_tab(parent))
        {
            return Some(parent.id.clone());
        }
    }

    let candidate = |i: usize| {
        state
            .tabs
            .get(i)
            .filter(|tab| !removed.contains_key(&tab.id))
            .filter(|tab| tab.content.private == selected.content.private)
    };

    (1..state.tabs.len()).find_map(|distance| {
        let before = index.checked_sub(distance).and_then(candidate);
        before
            .or_else(|| candidate(index + distance))
            .map(|tab| tab.id.clone())
    })
}

fn restore(
    mut state: BrowserState,
    tabs: &[RecoverableTab],
    location: RestoreLocation,
) -> BrowserState {
    let mut restored = 0;
    for recoverable in tabs {
        if state.contains_session(&recoverable.id) {
            log::debug!("Tab {} already exists, not restoring it", recoverable.id);
            continue;
        }

        let mut tab = recoverable.to_tab();
        if tab
            .parent_id
            .as_deref()
            .is_some_and(|parent| state.find_tab(parent).is_none())
        {
            tab.parent_id = None;
        }

        let index = match location {
            RestoreLocation::Beginning => restored,
            RestoreLocation::End => state.tabs.len(),
            RestoreLocation::AtIndex => recoverable
                .index
                .map_or(state.tabs.len(), |index| index.min(state.tabs.len())),
        };
        state.tabs.insert(index, tab);
        restored += 1;
    }

    log::info!("Restored {} of {} tabs", restored, tabs.len());
    state
}
