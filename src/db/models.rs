use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};
use validator::{Validate, ValidationError};

use crate::db::types::{AttemptState, IdentityField, MarksVisibility, ShowUserPicture};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub idnumber: String,
    pub institution: String,
    pub department: String,
    pub phone1: String,
    pub phone2: String,
    pub city: String,
    pub country: String,
    /// Offset from UTC in minutes; `None` means the site default.
    pub timezone_minutes: Option<i32>,
}

impl User {
    pub fn identity_value(&self, field: IdentityField) -> &str {
        match field {
            IdentityField::Username => &self.username,
            IdentityField::Email => &self.email,
            IdentityField::Idnumber => &self.idnumber,
            IdentityField::Institution => &self.institution,
            IdentityField::Department => &self.department,
            IdentityField::Phone1 => &self.phone1,
            IdentityField::Phone2 => &self.phone2,
            IdentityField::City => &self.city,
            IdentityField::Country => &self.country,
        }
    }

    pub fn timezone(&self, fallback: UtcOffset) -> UtcOffset {
        self.timezone_minutes
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(|seconds| UtcOffset::from_whole_seconds(seconds).ok())
            .unwrap_or(fallback)
    }
}

/// One overall-feedback band. Applies to grades in `[min_grade, max_grade)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackBand {
    pub text: String,
    pub min_grade: f64,
    pub max_grade: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Quiz {
    pub id: i64,
    pub course_id: i64,
    pub course_module_id: i64,
    pub name: String,
    /// Maximum scaled grade.
    #[validate(range(min = 0.0, message = "grade must be non-negative"))]
    pub grade: f64,
    /// Total of the raw question marks.
    #[validate(range(min = 0.0, message = "sumgrades must be non-negative"))]
    pub sumgrades: f64,
    /// 0 means unlimited.
    pub attempts: u32,
    #[validate(range(max = 5, message = "decimal_points must be at most 5"))]
    pub decimal_points: u8,
    pub show_user_picture: ShowUserPicture,
    #[serde(default)]
    pub feedback: Vec<FeedbackBand>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_attempt_times"))]
pub struct Attempt {
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    #[validate(range(min = 1, message = "attempt number starts at 1"))]
    pub attempt: u32,
    pub state: AttemptState,
    #[serde(with = "time::serde::timestamp")]
    pub time_start: OffsetDateTime,
    #[serde(with = "time::serde::timestamp::option", default)]
    pub time_finish: Option<OffsetDateTime>,
    #[validate(range(min = 0.0, message = "sumgrades must be non-negative"))]
    pub sumgrades: Option<f64>,
}

impl Attempt {
    pub fn is_finished(&self) -> bool {
        self.state == AttemptState::Finished
    }
}

fn validate_attempt_times(attempt: &Attempt) -> Result<(), ValidationError> {
    match attempt.time_finish {
        Some(finish) if finish < attempt.time_start => {
            Err(ValidationError::new("time_finish_before_time_start"))
        }
        _ => Ok(()),
    }
}

/// What the current viewer may see of an attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub marks: MarksVisibility,
    pub overall_feedback: bool,
}
