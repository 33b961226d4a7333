//! Content Reducer

use crate::actions::ContentAction;
use crate::state::BrowserState;

pub fn reduce_content(mut state: BrowserState, action: &ContentAction) -> BrowserState {
    match action {
        ContentAction::UpdateUrl { session_id, url } => state.update_session(session_id, |session| {
            let content = session.content_mut();
            content.url = url.clone();
            content.error = None;
        }),
        ContentAction::UpdateTitle { session_id, title } => {
            state.update_session(session_id, |session| session.content_mut().title = title.clone())
        }
        ContentAction::UpdateProgress {
            session_id,
            progress,
        } => state.update_session(session_id, |session| {
            session.content_mut().progress = (*progress).min(100);
        }),
        ContentAction::UpdateLoadingState {
            session_id,
            loading,
        } => state.update_session(session_id, |session| session.content_mut().loading = *loading),
        ContentAction::UpdateBackNavigationState {
            session_id,
            can_go_back,
        } => state.update_session(session_id, |session| {
            session.content_mut().can_go_back = *can_go_back;
        }),
        ContentAction::UpdateForwardNavigationState {
            session_id,
            can_go_forward,
        } => state.update_session(session_id, |session| {
            session.content_mut().can_go_forward = *can_go_forward;
        }),
        ContentAction::UpdateSearchTerms {
            session_id,
            search_terms,
        } => state.update_session(session_id, |session| {
            session.content_mut().search_terms = search_terms.clone();
        }),
        // consumed by the thumbnails middleware
        ContentAction::UpdateThumbnail { .. } | ContentAction::RemoveThumbnail { .. } => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_tab;

    fn state() -> BrowserState {
        BrowserState::with_tabs(vec![create_tab("https://a.org").with_id("a")], Some("a"))
    }

    #[test]
    fn test_update_content() {
        let mut state = state();
        state.tabs[0].content.error = Some("failed".into());

        let actions = [
            ContentAction::UpdateUrl {
                session_id: "a".into(),
                url: "https://b.org".into(),
            },
            ContentAction::UpdateTitle {
                session_id: "a".into(),
                title: "B".into(),
            },
            ContentAction::UpdateProgress {
                session_id: "a".into(),
                progress: 150,
            },
            ContentAction::UpdateLoadingState {
                session_id: "a".into(),
                loading: true,
            },
            ContentAction::UpdateBackNavigationState {
                session_id: "a".into(),
                can_go_back: true,
            },
            ContentAction::UpdateSearchTerms {
                session_id: "a".into(),
                search_terms: "rust".into(),
            },
        ];
        let state = actions.iter().fold(state, reduce_content);

        let content = &state.tabs[0].content;
        assert_eq!(content.url, "https://b.org");
        assert_eq!(content.title, "B");
        assert_eq!(content.progress, 100);
        assert!(content.loading);
        assert!(content.can_go_back);
        assert!(!content.can_go_forward);
        assert_eq!(content.search_terms, "rust");
        assert_eq!(content.error, None);
    }

    #[test]
    fn test_unknown_session_is_ignored() {
        let before = state();
        let after = reduce_content(
            before.clone(),
            &ContentAction::UpdateTitle {
                session_id: "zzz".into(),
                title: "nope".into(),
            },
        );

        assert_eq!(after, before);
    }
}
