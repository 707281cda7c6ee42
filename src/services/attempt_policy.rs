use crate::db::models::{Attempt, Quiz};

/// Decides whether a user has used up their attempts.
pub trait AttemptsLimitRule {
    /// `attempt_count` includes `last_attempt`.
    fn prevent_new_attempt(&self, attempt_count: usize, last_attempt: &Attempt) -> bool;
}

/// The stock limit: at most `quiz.attempts` attempts, 0 meaning unlimited.
#[derive(Debug, Clone, Copy)]
pub struct NumAttemptsRule {
    max_attempts: u32,
}

impl NumAttemptsRule {
    pub fn new(quiz: &Quiz) -> Self {
        Self { max_attempts: quiz.attempts }
    }
}

impl AttemptsLimitRule for NumAttemptsRule {
    fn prevent_new_attempt(&self, attempt_count: usize, _last_attempt: &Attempt) -> bool {
        self.max_attempts > 0 && attempt_count >= self.max_attempts as usize
    }
}

/// Whether a new attempt may start, given the user's attempts in
/// chronological order.
pub fn can_create_attempt(quiz: &Quiz, attempts: &[Attempt]) -> bool {
    can_create_attempt_with(quiz, attempts, &NumAttemptsRule::new(quiz))
}

pub fn can_create_attempt_with(
    quiz: &Quiz,
    attempts: &[Attempt],
    rule: &dyn AttemptsLimitRule,
) -> bool {
    if quiz.attempts == 0 {
        return true;
    }

    let Some(last_attempt) = attempts.last() else {
        return true;
    };

    if !last_attempt.is_finished() {
        tracing::debug!(
            quiz_id = quiz.id,
            attempt_id = last_attempt.id,
            state = last_attempt.state.as_str(),
            "Previous attempt still open"
        );
        return false;
    }

    let prevented = rule.prevent_new_attempt(attempts.len(), last_attempt);
    if prevented {
        tracing::debug!(
            quiz_id = quiz.id,
            attempts = attempts.len(),
            limit = quiz.attempts,
            "Attempts limit reached"
        );
    }
    !prevented
}
