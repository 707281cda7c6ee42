use crate::db::models::{FeedbackBand, Quiz};

/// Grades and marks below this are treated as zero.
const GRADE_EPSILON: f64 = 0.000005;

pub fn has_grades(quiz: &Quiz) -> bool {
    quiz.grade >= GRADE_EPSILON && quiz.sumgrades >= GRADE_EPSILON
}

/// Converts raw marks into the quiz's grade scale. `None` while ungraded.
pub fn rescale_grade(raw_marks: Option<f64>, quiz: &Quiz) -> Option<f64> {
    let raw = raw_marks?;
    if quiz.sumgrades >= GRADE_EPSILON {
        Some(raw * quiz.grade / quiz.sumgrades)
    } else {
        Some(0.0)
    }
}

/// Share of the available raw marks, in percent.
pub fn percentage(raw_marks: f64, quiz: &Quiz) -> f64 {
    if quiz.sumgrades >= GRADE_EPSILON {
        raw_marks * 100.0 / quiz.sumgrades
    } else {
        0.0
    }
}

pub fn format_grade(quiz: &Quiz, value: f64, decimal_separator: &str) -> String {
    format_float(value, quiz.decimal_points, decimal_separator)
}

/// Fixed-point rendering, rounding half away from zero, no digit grouping.
pub fn format_float(value: f64, decimals: u8, decimal_separator: &str) -> String {
    let factor = 10f64.powi(i32::from(decimals));
    let mut rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        // Avoid "-0.00".
        rounded = 0.0;
    }
    let formatted = format!("{rounded:.prec$}", prec = usize::from(decimals));
    if decimal_separator == "." {
        formatted
    } else {
        formatted.replace('.', decimal_separator)
    }
}

/// Picks the feedback band covering `grade`. Negative grades count as zero and
/// a grade equal to the top band's upper bound still matches that band.
pub fn feedback_for_grade(bands: &[FeedbackBand], grade: f64) -> Option<&str> {
    let grade = grade.max(0.0);
    bands
        .iter()
        .find(|band| band.min_grade <= grade && grade < band.max_grade)
        .or_else(|| {
            bands
                .iter()
                .max_by(|left, right| left.max_grade.total_cmp(&right.max_grade))
                .filter(|band| (band.max_grade - grade).abs() < GRADE_EPSILON)
        })
        .map(|band| band.text.as_str())
}
