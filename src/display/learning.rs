//! Learning path display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::{LearningModule, LessonContent};
use crate::services::{LearningTotals, LessonState, LessonView, ModuleProgress};

#[derive(Tabled)]
struct ModuleRow {
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Done")]
    done: String,
    #[tabled(rename = "Progress")]
    bar: String,
}

#[derive(Tabled)]
struct LessonRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Lesson")]
    title: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Quiz")]
    quiz: &'static str,
}

fn state_marker(state: LessonState) -> &'static str {
    match state {
        LessonState::Completed => "✓",
        LessonState::Unlocked => "▶",
        LessonState::Locked => "🔒",
    }
}

/// Ten-cell bar, one cell per 10%
fn progress_bar(percentage: u32) -> String {
    let filled = (percentage.min(100) / 10) as usize;
    format!("{}{} {:>3}%", "█".repeat(filled), "░".repeat(10 - filled), percentage)
}

pub fn format_module_progress(modules: &[ModuleProgress], totals: &LearningTotals) -> String {
    let rows = modules.iter().map(|m| ModuleRow {
        module: format!("{} ({})", m.module.title(), m.module.slug()),
        done: format!("{}/{}", m.completed, m.total),
        bar: progress_bar(m.percentage),
    });

    let mut output = format!("{}\n", Table::new(rows).with(Style::psql()));
    output.push_str(&format!(
        "\n{} of {} lessons completed, {} points earned\n",
        totals.completed_lessons, totals.total_lessons, totals.points_earned
    ));
    output
}

pub fn format_module_overview(module: LearningModule, lessons: &[LessonView]) -> String {
    if lessons.is_empty() {
        return format!("No lessons in {} yet.\n", module.title());
    }

    let rows = lessons.iter().map(|v| LessonRow {
        position: v.position,
        marker: state_marker(v.state),
        title: v.lesson.title.clone(),
        points: match v.points_earned {
            Some(earned) => format!("{} earned", earned),
            None => format!("+{}", v.points),
        },
        quiz: if v.lesson.has_quiz() { "yes" } else { "" },
    });

    let mut output = format!("{}\n{}\n\n", module.title(), module.description());
    output.push_str(&Table::new(rows).with(Style::psql()).to_string());
    output.push('\n');
    output
}

/// Full lesson text with its quiz options numbered from 1
pub fn format_lesson(lesson: &LessonContent, state: LessonState, points: u32) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} · Lesson {}: {}\n",
        lesson.module_id.title(),
        lesson.order_index + 1,
        lesson.title
    ));
    output.push_str(&format!("Status: {}  Reward: {} points\n\n", state, points));
    output.push_str(&lesson.content);
    output.push('\n');

    if let Some(quiz) = &lesson.quiz {
        output.push_str(&format!("\nQuiz: {}\n", quiz.question));
        for (i, option) in quiz.options.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, option));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quiz;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), format!("{} {:>3}%", "░".repeat(10), 0));
        assert!(progress_bar(50).starts_with("█████░"));
        assert!(progress_bar(100).starts_with(&"█".repeat(10)));
    }

    #[test]
    fn test_format_lesson_numbers_options() {
        let lesson = LessonContent::new(LearningModule::Saving, 0, "Pay Yourself First", "Save first.")
            .with_quiz(Quiz::new("When?", &["First", "Last"], 0));

        let output = format_lesson(&lesson, LessonState::Unlocked, 25);
        assert!(output.contains("Lesson 1: Pay Yourself First"));
        assert!(output.contains("  1. First"));
        assert!(output.contains("  2. Last"));
        assert!(output.contains("Reward: 25 points"));
    }

    #[test]
    fn test_empty_module_overview() {
        let output = format_module_overview(LearningModule::Investing, &[]);
        assert!(output.contains("No lessons"));
    }
}
