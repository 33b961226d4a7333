//! Actions module
//!
//! Every state change is described by a [`BrowserAction`]. Actions carry only
//! data; engine calls and disk I/O they imply are performed by middleware.
//! Variants are grouped by the part of the state tree they address, with
//! one reducer module per group.

pub mod container;
pub mod content;
pub mod crash;
pub mod custom_tab_list;
pub mod engine;
pub mod last_access;
pub mod tab_group;
pub mod tab_list;
pub mod tracking_protection;
pub mod web_extension;

pub use container::ContainerAction;
pub use content::ContentAction;
pub use crash::CrashAction;
pub use custom_tab_list::CustomTabListAction;
pub use engine::EngineAction;
pub use last_access::LastAccessAction;
pub use tab_group::TabGroupAction;
pub use tab_list::TabListAction;
pub use tracking_protection::TrackingProtectionAction;
pub use web_extension::WebExtensionAction;

/// Root action enum - tagged by the part of the state it addresses
#[derive(Debug, Clone)]
pub enum BrowserAction {
    /// Dispatched once by the store after construction
    Init,
    TabList(TabListAction),
    CustomTabList(CustomTabListAction),
    Engine(EngineAction),
    Content(ContentAction),
    TrackingProtection(TrackingProtectionAction),
    LastAccess(LastAccessAction),
    Crash(CrashAction),
    TabGroup(TabGroupAction),
    Container(ContainerAction),
    WebExtension(WebExtensionAction),
}

impl lib_state::Action for BrowserAction {}

impl From<TabListAction> for BrowserAction {
    fn from(action: TabListAction) -> Self {
        BrowserAction::TabList(action)
    }
}

impl From<CustomTabListAction> for BrowserAction {
    fn from(action: CustomTabListAction) -> Self {
        BrowserAction::CustomTabList(action)
    }
}

impl From<EngineAction> for BrowserAction {
    fn from(action: EngineAction) -> Self {
        BrowserAction::Engine(action)
    }
}

impl From<ContentAction> for BrowserAction {
    fn from(action: ContentAction) -> Self {
        BrowserAction::Content(action)
    }
}

impl From<TrackingProtectionAction> for BrowserAction {
    fn from(action: TrackingProtectionAction) -> Self {
        BrowserAction::TrackingProtection(action)
    }
}

impl From<LastAccessAction> for BrowserAction {
    fn from(action: LastAccessAction) -> Self {
        BrowserAction::LastAccess(action)
    }
}

impl From<CrashAction> for BrowserAction {
    fn from(action: CrashAction) -> Self {
        BrowserAction::Crash(action)
    }
}

impl From<TabGroupAction> for BrowserAction {
    fn from(action: TabGroupAction) -> Self {
        BrowserAction::TabGroup(action)
    }
}

impl From<ContainerAction> for BrowserAction {
    fn from(action: ContainerAction) -> Self {
        BrowserAction::Container(action)
    }
}

impl From<WebExtensionAction> for BrowserAction {
    fn from(action: WebExtensionAction) -> Self {
        BrowserAction::WebExtension(action)
    }
}
