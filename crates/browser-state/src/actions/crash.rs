#[derive(Debug, Clone)]
pub enum CrashAction {
    SessionCrashed { tab_id: String },
    RestoreCrashedSession { tab_id: String },
}
