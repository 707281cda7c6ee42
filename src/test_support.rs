use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

use time::{Duration, OffsetDateTime};

use crate::core::config::Settings;
use crate::core::context::{CapabilityChecker, ModuleContext, RequestContext};
use crate::db::models::{Attempt, Quiz, User};
use crate::db::types::{AttemptState, ShowUserPicture};
use crate::repositories::users::InMemoryUsers;
use crate::services::events::MemoryEventSink;
use crate::services::lang::LangCatalog;

pub(crate) const STUDENT_ID: i64 = 5;
pub(crate) const TEACHER_ID: i64 = 2;

const ENV_KEYS: [&str; 9] = [
    "ANSWERSHEETS_ENV",
    "ENVIRONMENT",
    "ANSWERSHEETS_LOG_LEVEL",
    "ANSWERSHEETS_LOG_JSON",
    "ANSWERSHEETS_SITE_URL",
    "ANSWERSHEETS_FULLNAME_DISPLAY",
    "ANSWERSHEETS_SHOW_USER_IDENTITY",
    "ANSWERSHEETS_DEFAULT_TIMEZONE_MINUTES",
    "ANSWERSHEETS_LANG_PATH",
];

/// Serializes tests that touch process environment variables.
pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

/// Writes `contents` to a per-process file in the system temp directory.
pub(crate) fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("answersheets-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("write temp file");
    path
}

pub(crate) struct AllowAll;

impl CapabilityChecker for AllowAll {
    fn has_capability(&self, _capability: &str, _context: &ModuleContext, _user_id: i64) -> bool {
        true
    }
}

pub(crate) struct DenyAll;

impl CapabilityChecker for DenyAll {
    fn has_capability(&self, _capability: &str, _context: &ModuleContext, _user_id: i64) -> bool {
        false
    }
}

/// Owns the collaborators a [`RequestContext`] borrows.
pub(crate) struct Harness {
    pub(crate) settings: Settings,
    pub(crate) users: InMemoryUsers,
    pub(crate) strings: LangCatalog,
    pub(crate) events: MemoryEventSink,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub(crate) fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            users: [student(), teacher()].into_iter().collect(),
            strings: LangCatalog::bundled(),
            events: MemoryEventSink::new(),
        }
    }

    pub(crate) fn context<'a>(
        &'a self,
        viewer: &'a User,
        capabilities: &'a dyn CapabilityChecker,
    ) -> RequestContext<'a> {
        RequestContext::new(
            &self.settings,
            viewer,
            &self.users,
            &self.strings,
            capabilities,
            &self.events,
        )
    }
}

pub(crate) fn student() -> User {
    User {
        id: STUDENT_ID,
        username: "ada".to_string(),
        firstname: "Ada".to_string(),
        lastname: "Lovelace".to_string(),
        email: "ada@example.org".to_string(),
        idnumber: "A123".to_string(),
        ..User::default()
    }
}

pub(crate) fn teacher() -> User {
    User {
        id: TEACHER_ID,
        username: "grace".to_string(),
        firstname: "Grace".to_string(),
        lastname: "Hopper".to_string(),
        email: "grace@example.org".to_string(),
        ..User::default()
    }
}

pub(crate) fn context() -> ModuleContext {
    ModuleContext { id: 77, course_module_id: 12 }
}

pub(crate) fn quiz(grade: f64, sumgrades: f64) -> Quiz {
    Quiz {
        id: 40,
        course_id: 3,
        course_module_id: 12,
        name: "Unit 1 check".to_string(),
        grade,
        sumgrades,
        attempts: 0,
        decimal_points: 2,
        show_user_picture: ShowUserPicture::None,
        feedback: Vec::new(),
    }
}

/// A finished first attempt by the student, 65 minutes long.
pub(crate) fn attempt(sumgrades: f64) -> Attempt {
    let time_start = OffsetDateTime::from_unix_timestamp(1_735_812_000).expect("timestamp");
    Attempt {
        id: 100,
        quiz_id: 40,
        user_id: STUDENT_ID,
        attempt: 1,
        state: AttemptState::Finished,
        time_start,
        time_finish: Some(time_start + Duration::seconds(3900)),
        sumgrades: Some(sumgrades),
    }
}
