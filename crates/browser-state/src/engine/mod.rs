//! Boundary to the browser engine
//!
//! The engine itself lives outside this crate. The store only talks to it
//! through [`Engine`] (session factory), [`EngineSession`] (one live browsing
//! context) and [`EngineSessionObserver`] (engine callbacks, which
//! [`TabEngineObserver`] turns into dispatched actions).

pub mod middleware;
mod observer;
mod session;

pub use middleware::EngineMiddleware;
pub use observer::{EngineSessionObserver, ObserverRef, TabEngineObserver};
pub use session::{Engine, EngineSession, EngineSessionRef, EngineSessionState, LoadUrlFlags};

const EXTENSION_URL_SCHEMES: [&str; 2] = ["moz-extension://", "chrome-extension://"];

/// Whether `url` points at a page bundled with a web extension
pub fn is_extension_url(url: &str) -> bool {
    EXTENSION_URL_SCHEMES.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
