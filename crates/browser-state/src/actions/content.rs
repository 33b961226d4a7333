use crate::thumbnails::Thumbnail;

/// Updates to what a tab or custom tab displays
#[derive(Debug, Clone)]
pub enum ContentAction {
    UpdateUrl { session_id: String, url: String },
    UpdateTitle { session_id: String, title: String },
    UpdateProgress { session_id: String, progress: u8 },
    UpdateLoadingState { session_id: String, loading: bool },
    UpdateBackNavigationState { session_id: String, can_go_back: bool },
    UpdateForwardNavigationState { session_id: String, can_go_forward: bool },
    UpdateSearchTerms { session_id: String, search_terms: String },
    /// Persist a new thumbnail; never reaches the reducer
    UpdateThumbnail { session_id: String, thumbnail: Thumbnail },
    RemoveThumbnail { session_id: String },
}
