use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptState {
    InProgress,
    Overdue,
    Finished,
    Abandoned,
}

impl AttemptState {
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptState::InProgress => "inprogress",
            AttemptState::Overdue => "overdue",
            AttemptState::Finished => "finished",
            AttemptState::Abandoned => "abandoned",
        }
    }

    /// Key of the localized state name in the quiz string component.
    pub(crate) fn string_key(self) -> &'static str {
        match self {
            AttemptState::InProgress => "stateinprogress",
            AttemptState::Overdue => "stateoverdue",
            AttemptState::Finished => "statefinished",
            AttemptState::Abandoned => "stateabandoned",
        }
    }
}

/// How much of the marks a viewer may see. Ordered from least to most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarksVisibility {
    Hidden,
    MaxOnly,
    MarkAndMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowUserPicture {
    None,
    Small,
    Large,
}

/// Optional user profile fields a site can show next to a full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityField {
    Username,
    Email,
    Idnumber,
    Institution,
    Department,
    Phone1,
    Phone2,
    City,
    Country,
}

impl IdentityField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "username" => Some(IdentityField::Username),
            "email" => Some(IdentityField::Email),
            "idnumber" => Some(IdentityField::Idnumber),
            "institution" => Some(IdentityField::Institution),
            "department" => Some(IdentityField::Department),
            "phone1" => Some(IdentityField::Phone1),
            "phone2" => Some(IdentityField::Phone2),
            "city" => Some(IdentityField::City),
            "country" => Some(IdentityField::Country),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_visibility_is_ordered() {
        assert!(MarksVisibility::MarkAndMax > MarksVisibility::MaxOnly);
        assert!(MarksVisibility::MaxOnly > MarksVisibility::Hidden);
    }

    #[test]
    fn attempt_state_serializes_lowercase() {
        let value = serde_json::to_value(AttemptState::InProgress).unwrap();
        assert_eq!(value, serde_json::json!("inprogress"));
        assert_eq!(AttemptState::InProgress.as_str(), "inprogress");
    }
}
