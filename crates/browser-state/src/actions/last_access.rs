#[derive(Debug, Clone)]
pub enum LastAccessAction {
    UpdateLastAccess { tab_id: String, last_access: i64 },
}
