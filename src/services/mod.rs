pub mod attempt_policy;
pub mod attempt_summary;
pub mod events;
pub mod grades;
pub mod hidden_fields;
pub mod instructions;
pub mod lang;
pub mod user_identity;
