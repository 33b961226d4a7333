#[derive(Debug, Clone)]
pub enum TrackingProtectionAction {
    Toggle { tab_id: String, enabled: bool },
    TrackerBlocked { tab_id: String, tracker: String },
    TrackerLoaded { tab_id: String, tracker: String },
    ClearTrackers { tab_id: String },
}
