use crate::actions::TrackingProtectionAction;
use crate::state::BrowserState;

pub fn reduce_tracking_protection(
    mut state: BrowserState,
    action: &TrackingProtectionAction,
) -> BrowserState {
    match action {
        TrackingProtectionAction::Toggle { tab_id, enabled } => {
            state.update_session(tab_id, |session| {
                session.tracking_protection_mut().enabled = *enabled;
            })
        }
        TrackingProtectionAction::TrackerBlocked { tab_id, tracker } => {
            state.update_session(tab_id, |session| {
                session
                    .tracking_protection_mut()
                    .blocked_trackers
                    .push(tracker.clone());
            })
        }
        TrackingProtectionAction::TrackerLoaded { tab_id, tracker } => {
            state.update_session(tab_id, |session| {
                session
                    .tracking_protection_mut()
                    .loaded_trackers
                    .push(tracker.clone());
            })
        }
        TrackingProtectionAction::ClearTrackers { tab_id } => {
            state.update_session(tab_id, |session| {
                let tracking_protection = session.tracking_protection_mut();
                tracking_protection.blocked_trackers.clear();
                tracking_protection.loaded_trackers.clear();
            })
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{create_tab, SessionState};

    #[test]
    fn test_trackers() {
        let state = BrowserState::with_tabs(vec![create_tab("https://a.org").with_id("a")], None);
        let actions = [
            TrackingProtectionAction::Toggle {
                tab_id: "a".into(),
                enabled: true,
            },
            TrackingProtectionAction::TrackerBlocked {
                tab_id: "a".into(),
                tracker: "ads.example".into(),
            },
            TrackingProtectionAction::TrackerLoaded {
                tab_id: "a".into(),
                tracker: "cdn.example".into(),
            },
        ];
        let state = actions.iter().fold(state, reduce_tracking_protection);

        let tracking = state.tabs[0].tracking_protection();
        assert!(tracking.enabled);
        assert_eq!(tracking.blocked_trackers, vec!["ads.example".to_string()]);
        assert_eq!(tracking.loaded_trackers, vec!["cdn.example".to_string()]);

        let state = reduce_tracking_protection(
            state,
            &TrackingProtectionAction::ClearTrackers { tab_id: "a".into() },
        );
        let tracking = &state.tabs[0].tracking_protection;
        assert!(tracking.enabled);
        assert!(tracking.blocked_trackers.is_empty());
        assert!(tracking.loaded_trackers.is_empty());
    }
}
