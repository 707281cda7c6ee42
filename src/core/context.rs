use serde::{Deserialize, Serialize};
use time::UtcOffset;

use crate::core::config::{Settings, SiteSettings};
use crate::db::models::User;
use crate::db::types::IdentityField;
use crate::repositories::users::UserRepository;
use crate::services::events::EventSink;
use crate::services::lang::StringCatalog;
use crate::services::user_identity::IdentityFieldSource;

pub const CAP_VIEW_REPORTS: &str = "mod/quiz:viewreports";

/// The permission scope of one quiz activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContext {
    pub id: i64,
    pub course_module_id: i64,
}

pub trait CapabilityChecker: Send + Sync {
    fn has_capability(&self, capability: &str, context: &ModuleContext, user_id: i64) -> bool;
}

impl IdentityFieldSource for SiteSettings {
    fn identity_fields(&self, _context: &ModuleContext) -> Vec<IdentityField> {
        self.show_user_identity.clone()
    }
}

/// Everything one request needs from the host, passed explicitly.
pub struct RequestContext<'a> {
    settings: &'a Settings,
    viewer: &'a User,
    users: &'a dyn UserRepository,
    strings: &'a dyn StringCatalog,
    capabilities: &'a dyn CapabilityChecker,
    events: &'a dyn EventSink,
    identity_fields: &'a dyn IdentityFieldSource,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        settings: &'a Settings,
        viewer: &'a User,
        users: &'a dyn UserRepository,
        strings: &'a dyn StringCatalog,
        capabilities: &'a dyn CapabilityChecker,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            settings,
            viewer,
            users,
            strings,
            capabilities,
            events,
            identity_fields: settings.site(),
        }
    }

    /// Replaces the site-wide identity field list with a per-context source.
    pub fn with_identity_fields(mut self, source: &'a dyn IdentityFieldSource) -> Self {
        self.identity_fields = source;
        self
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn viewer(&self) -> &User {
        self.viewer
    }

    pub fn users(&self) -> &dyn UserRepository {
        self.users
    }

    pub fn strings(&self) -> &dyn StringCatalog {
        self.strings
    }

    pub fn capabilities(&self) -> &dyn CapabilityChecker {
        self.capabilities
    }

    pub fn events(&self) -> &dyn EventSink {
        self.events
    }

    pub fn identity_fields(&self) -> &dyn IdentityFieldSource {
        self.identity_fields
    }

    pub fn viewer_timezone(&self) -> UtcOffset {
        self.viewer.timezone(self.settings.site().default_timezone)
    }

    pub fn viewer_can(&self, capability: &str, context: &ModuleContext) -> bool {
        self.capabilities.has_capability(capability, context, self.viewer.id)
    }
}
