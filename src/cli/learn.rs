//! Learning path CLI commands
//!
//! Lessons are addressed by module slug and 1-based position, e.g.
//! `finbud learn complete budgeting 2 --answer 1`.

use clap::Subcommand;

use super::announce_badges;
use crate::config::settings::Settings;
use crate::display::{format_lesson, format_module_overview, format_module_progress};
use crate::error::{FinbudError, FinbudResult};
use crate::models::{LearningModule, LessonContent};
use crate::services::{LearningService, LearningSnapshot, LessonState};
use crate::storage::Storage;

/// Learn subcommands
#[derive(Subcommand)]
pub enum LearnCommands {
    /// Show progress across all modules
    Progress,

    /// List a module's lessons with their lock state
    Module {
        /// Module: budgeting, credit, saving or investing
        module: String,
    },

    /// Read a lesson
    Show {
        module: String,
        /// Lesson position within the module (1-based)
        lesson: usize,
    },

    /// Show the first lesson not yet completed
    Next,

    /// Complete a lesson and collect its points
    Complete {
        module: String,
        /// Lesson position within the module (1-based)
        lesson: usize,
        /// Quiz answer, numbered as shown by `learn show`
        #[arg(short, long)]
        answer: Option<usize>,
    },
}

fn parse_module(input: &str) -> FinbudResult<LearningModule> {
    LearningModule::parse(input).ok_or_else(|| {
        FinbudError::Validation(format!(
            "Unknown module '{}'. Expected one of: budgeting, credit, saving, investing",
            input
        ))
    })
}

fn lesson_at(
    snapshot: &LearningSnapshot,
    module: LearningModule,
    position: usize,
) -> FinbudResult<LessonContent> {
    snapshot
        .lesson_at(module, position)
        .cloned()
        .ok_or_else(|| FinbudError::lesson_not_found(format!("{} #{}", module.slug(), position)))
}

/// Quiz gate for an unlocked, not yet completed lesson
fn check_answer(lesson: &LessonContent, answer: Option<usize>) -> FinbudResult<()> {
    let Some(quiz) = &lesson.quiz else {
        return Ok(());
    };

    match answer {
        None => Err(FinbudError::Validation(format!(
            "'{}' has a quiz; pass your choice with --answer (1-{})",
            lesson.title,
            quiz.options.len()
        ))),
        Some(n) if n >= 1 && quiz.is_correct(n - 1) => Ok(()),
        Some(_) => Err(FinbudError::Validation(
            "Incorrect answer. Review the lesson and try again.".into(),
        )),
    }
}

pub fn handle_learn_command(
    storage: &Storage,
    settings: &Settings,
    cmd: LearnCommands,
) -> FinbudResult<()> {
    let service = LearningService::new(storage, settings.active_user, settings.lesson_points);

    match cmd {
        LearnCommands::Progress => {
            let modules = service.all_module_progress()?;
            let totals = service.totals()?;
            print!("{}", format_module_progress(&modules, &totals));
        }

        LearnCommands::Module { module } => {
            let module = parse_module(&module)?;
            print!(
                "{}",
                format_module_overview(module, &service.module_overview(module)?)
            );
        }

        LearnCommands::Show { module, lesson } => {
            let module = parse_module(&module)?;
            let snapshot = service.snapshot()?;
            let lesson = lesson_at(&snapshot, module, lesson)?;
            let state = snapshot.state(lesson.id);

            if state == LessonState::Locked {
                println!(
                    "🔒 '{}' is locked. Complete the previous lesson first.",
                    lesson.title
                );
                return Ok(());
            }
            print!("{}", format_lesson(&lesson, state, service.points_for(&lesson)));
        }

        LearnCommands::Next => {
            let snapshot = service.snapshot()?;
            let next = snapshot
                .next_lesson()
                .and_then(|l| snapshot.position_of(l.id).map(|position| (l, position)));
            match next {
                Some((lesson, position)) => {
                    println!(
                        "Next up: {} lesson {}: {}",
                        lesson.module_id.slug(),
                        position,
                        lesson.title
                    );
                }
                None => println!("🎓 Every lesson is complete!"),
            }
        }

        LearnCommands::Complete {
            module,
            lesson,
            answer,
        } => {
            let module = parse_module(&module)?;
            let snapshot = service.snapshot()?;
            let lesson = lesson_at(&snapshot, module, lesson)?;

            if snapshot.state(lesson.id) == LessonState::Unlocked {
                check_answer(&lesson, answer)?;
            }

            let completion =
                service.complete_lesson(lesson.id, module, service.points_for(&lesson))?;
            if completion.newly_completed {
                println!(
                    "✓ Completed '{}' (+{} points)",
                    lesson.title, completion.points_awarded
                );
                announce_badges(storage, settings)?;
            } else {
                println!("'{}' was already completed. No points awarded.", lesson.title);
            }
        }
    }

    Ok(())
}
