use serde_json::json;
use validator::Validate;

use crate::core::context::{ModuleContext, RequestContext, CAP_VIEW_REPORTS};
use crate::core::time::{format_duration, format_user_date};
use crate::db::models::{Attempt, DisplayOptions, Quiz, User};
use crate::db::types::{MarksVisibility, ShowUserPicture};
use crate::error::Result;
use crate::repositories::users::fetch_existing;
use crate::schemas::summary::{SummaryContent, SummaryData, SummaryItem};
use crate::services::grades::{
    feedback_for_grade, format_grade, format_float, has_grades, percentage, rescale_grade,
};
use crate::services::lang::{StringArgs, StringCatalog, QUIZ_COMPONENT};
use crate::services::user_identity::{format_user_identity, full_name};

const USER_PICTURE_SIZE: u32 = 35;

/// Read access to one attempt as seen by the current viewer.
pub trait AttemptView {
    fn attempt(&self) -> &Attempt;

    fn quiz(&self) -> &Quiz;

    fn display_options(&self) -> DisplayOptions;

    fn module_context(&self) -> ModuleContext;

    /// Markup linking to the user's other attempts, `None` when there are none.
    fn links_to_other_attempts(&self, base_url: &str) -> Option<String>;

    /// Rows contributed by the question behaviour.
    fn additional_summary_data(&self, _options: &DisplayOptions) -> SummaryData {
        SummaryData::new()
    }

    fn overall_feedback(&self, grade: Option<f64>) -> Option<String> {
        grade.and_then(|value| feedback_for_grade(&self.quiz().feedback, value)).map(str::to_string)
    }
}

/// An [`AttemptView`] over plain records.
#[derive(Debug, Clone)]
pub struct AttemptSnapshot {
    pub attempt: Attempt,
    pub quiz: Quiz,
    pub options: DisplayOptions,
    pub context: ModuleContext,
    /// All attempts of the same user, oldest first.
    pub user_attempts: Vec<Attempt>,
    pub behaviour_data: SummaryData,
}

impl AttemptView for AttemptSnapshot {
    fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    fn display_options(&self) -> DisplayOptions {
        self.options
    }

    fn module_context(&self) -> ModuleContext {
        self.context
    }

    fn links_to_other_attempts(&self, base_url: &str) -> Option<String> {
        if self.user_attempts.len() <= 1 {
            return None;
        }

        let separator = if base_url.contains('?') { "&amp;" } else { "?" };
        let base_url = escape_attribute(base_url);
        let links: Vec<String> = self
            .user_attempts
            .iter()
            .map(|other| {
                if other.id == self.attempt.id {
                    format!("<strong>{}</strong>", other.attempt)
                } else {
                    format!("<a href=\"{base_url}{separator}attempt={}\">{}</a>", other.id, other.attempt)
                }
            })
            .collect();
        Some(links.join(", "))
    }

    fn additional_summary_data(&self, _options: &DisplayOptions) -> SummaryData {
        self.behaviour_data.clone()
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Builds the review header for an attempt. With `minimal` only the `user`
/// row can be present.
pub fn build_summary(
    ctx: &RequestContext<'_>,
    view: &dyn AttemptView,
    base_url: &str,
    minimal: bool,
) -> Result<SummaryData> {
    let attempt = view.attempt();
    let quiz = view.quiz();
    quiz.validate()?;
    attempt.validate()?;

    let strings = ctx.strings();
    let module_context = view.module_context();
    let mut summary = SummaryData::new();

    if quiz.show_user_picture == ShowUserPicture::None && attempt.user_id != ctx.viewer().id {
        let student = fetch_existing(ctx.users(), attempt.user_id)?;
        summary.insert("user", user_row(ctx, &student, quiz, &module_context));
    }

    if minimal {
        return Ok(summary);
    }

    if ctx.viewer_can(CAP_VIEW_REPORTS, &module_context) {
        let links = view.links_to_other_attempts(base_url).filter(|links| !links.trim().is_empty());
        if let Some(links) = links {
            summary.insert(
                "attemptlist",
                SummaryItem {
                    title: SummaryContent::text(quiz_string(strings, "attempts", StringArgs::None)?),
                    content: SummaryContent::html(links),
                },
            );
        }
    }

    let timezone = ctx.viewer_timezone();
    summary.insert(
        "startedon",
        SummaryItem::text(
            quiz_string(strings, "startedon", StringArgs::None)?,
            format_user_date(attempt.time_start, timezone),
        ),
    );

    summary.insert(
        "state",
        SummaryItem::text(
            quiz_string(strings, "state", StringArgs::None)?,
            quiz_string(strings, attempt.state.string_key(), StringArgs::None)?,
        ),
    );

    if let Some(time_finish) = attempt.time_finish.filter(|_| attempt.is_finished()) {
        summary.insert(
            "completedon",
            SummaryItem::text(
                quiz_string(strings, "completedon", StringArgs::None)?,
                format_user_date(time_finish, timezone),
            ),
        );
        let taken = (time_finish - attempt.time_start).whole_seconds();
        summary.insert(
            "timetaken",
            SummaryItem::text(
                quiz_string(strings, "timetaken", StringArgs::None)?,
                format_duration(strings, taken)?,
            ),
        );
    }

    let options = view.display_options();
    let grade = rescale_grade(attempt.sumgrades, quiz);
    if options.marks >= MarksVisibility::MarkAndMax && has_grades(quiz) {
        add_grade_rows(&mut summary, strings, quiz, attempt, grade)?;
    }

    summary.extend(view.additional_summary_data(&options));

    if options.overall_feedback {
        let feedback = view.overall_feedback(grade).filter(|text| !text.trim().is_empty());
        if let Some(feedback) = feedback {
            summary.insert(
                "feedback",
                SummaryItem {
                    title: SummaryContent::text(quiz_string(strings, "feedback", StringArgs::None)?),
                    content: SummaryContent::html(feedback),
                },
            );
        }
    }

    tracing::debug!(attempt_id = attempt.id, rows = summary.len(), "Built attempt summary");
    Ok(summary)
}

fn user_row(
    ctx: &RequestContext<'_>,
    student: &User,
    quiz: &Quiz,
    module_context: &ModuleContext,
) -> SummaryItem {
    let site = ctx.settings().site();
    SummaryItem {
        title: SummaryContent::UserPicture {
            user_id: student.id,
            course_id: quiz.course_id,
            full_name: full_name(student, &site.fullname_display),
            size: USER_PICTURE_SIZE,
        },
        content: SummaryContent::Link {
            url: site.user_profile_url(student.id, quiz.course_id),
            text: format_user_identity(ctx, student, module_context),
        },
    }
}

fn add_grade_rows(
    summary: &mut SummaryData,
    strings: &dyn StringCatalog,
    quiz: &Quiz,
    attempt: &Attempt,
    grade: Option<f64>,
) -> Result<()> {
    let decsep = strings.decimal_separator();
    let grade_title = quiz_string(strings, "grade", StringArgs::None)?;

    let (Some(raw_marks), Some(grade)) = (attempt.sumgrades, grade) else {
        summary.insert(
            "grade",
            SummaryItem::text(grade_title, quiz_string(strings, "notyetgraded", StringArgs::None)?),
        );
        return Ok(());
    };

    if quiz.grade != quiz.sumgrades {
        let args = json!({
            "grade": format_grade(quiz, raw_marks, &decsep),
            "maxgrade": format_grade(quiz, quiz.sumgrades, &decsep),
        });
        summary.insert(
            "marks",
            SummaryItem::text(
                quiz_string(strings, "marks", StringArgs::None)?,
                quiz_string(strings, "outofshort", args.into())?,
            ),
        );
    }

    let formatted = if quiz.grade == 100.0 {
        let args = json!({
            "grade": format_grade(quiz, grade, &decsep),
            "maxgrade": format_grade(quiz, quiz.grade, &decsep),
        });
        quiz_string(strings, "outof", args.into())?
    } else {
        let args = json!({
            "grade": format_grade(quiz, grade, &decsep),
            "maxgrade": format_grade(quiz, quiz.grade, &decsep),
            "percent": format_float(percentage(raw_marks, quiz), 0, &decsep),
        });
        quiz_string(strings, "outofpercent", args.into())?
    };
    summary.insert("grade", SummaryItem::text(grade_title, formatted));

    Ok(())
}

fn quiz_string(strings: &dyn StringCatalog, key: &str, args: StringArgs) -> Result<String> {
    strings.get_string(key, QUIZ_COMPONENT, &args)
}
