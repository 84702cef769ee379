//! Storage initialization
//!
//! First-run seeding of the shared lesson catalog and badge catalog, plus the
//! active user's profile. Each step is skipped when its table already has
//! rows, so running init twice changes nothing.

use tracing::info;

use crate::error::FinbudError;
use crate::models::badge::default_badges;
use crate::models::{LearningModule, LessonContent, Profile, Quiz, UserId};

use super::{RecordStore, Storage};

/// What a call to [`initialize_storage`] actually created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    pub lessons_seeded: usize,
    pub badges_seeded: usize,
    pub profile_created: bool,
}

impl InitReport {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Seed missing catalogs and create the user's profile if absent
pub fn initialize_storage(
    storage: &Storage,
    user: UserId,
    display_name: &str,
) -> Result<InitReport, FinbudError> {
    let mut report = InitReport::default();

    if storage.lessons.count()? == 0 {
        for lesson in default_lessons() {
            storage.lessons.upsert(lesson)?;
            report.lessons_seeded += 1;
        }
        storage.lessons.save()?;
    }

    if storage.list_badges()?.is_empty() {
        for badge in default_badges() {
            storage.badges.upsert_badge(badge)?;
            report.badges_seeded += 1;
        }
        storage.badges.save_catalog()?;
    }

    if storage.get_profile(user)?.is_none() {
        storage.create_profile(Profile::new(user, display_name))?;
        report.profile_created = true;
    }

    if !report.is_noop() {
        info!(
            lessons = report.lessons_seeded,
            badges = report.badges_seeded,
            profile = report.profile_created,
            "storage initialized"
        );
    }

    Ok(report)
}

/// The built-in lesson catalog
pub fn default_lessons() -> Vec<LessonContent> {
    use LearningModule::*;

    vec![
        LessonContent::new(
            Budgeting,
            0,
            "What is a Budget?",
            "A budget is a plan for your money. It lists what comes in, what goes out, \
             and what is left to save.",
        )
        .with_quiz(Quiz::new(
            "What is a budget?",
            &["A plan for your money", "A type of loan", "A savings account"],
            0,
        )),
        LessonContent::new(
            Budgeting,
            1,
            "The 50/30/20 Rule",
            "Split take-home pay into needs (50%), wants (30%) and savings or debt \
             repayment (20%).",
        )
        .with_quiz(Quiz::new(
            "Under 50/30/20, what share goes to savings?",
            &["50%", "30%", "20%"],
            2,
        )),
        LessonContent::new(
            Budgeting,
            2,
            "Tracking Expenses",
            "Record every purchase for a month. Patterns you never noticed become \
             obvious once they are written down.",
        ),
        LessonContent::new(
            Budgeting,
            3,
            "Emergency Funds",
            "Keep three to six months of essential expenses somewhere you can reach \
             quickly.",
        )
        .with_quiz(Quiz::new(
            "How many months of expenses should an emergency fund cover?",
            &["One week", "3 to 6 months", "5 years"],
            1,
        )),
        LessonContent::new(
            Credit,
            0,
            "What is a Credit Score?",
            "A credit score summarizes how reliably you have repaid borrowed money. \
             Lenders use it to price loans.",
        )
        .with_quiz(Quiz::new(
            "What does a credit score measure?",
            &["Your income", "Your repayment history", "Your savings balance"],
            1,
        )),
        LessonContent::new(
            Credit,
            1,
            "Credit Utilization",
            "Utilization is the share of your available credit you are using. Keeping \
             it under 30% helps your score.",
        )
        .with_quiz(Quiz::new(
            "Which utilization is healthiest?",
            &["Under 30%", "Around 75%", "Over 100%"],
            0,
        )),
        LessonContent::new(
            Credit,
            2,
            "Building Credit History",
            "Open a starter card, pay the full balance on time every month, and keep \
             old accounts open.",
        ),
        LessonContent::new(
            Saving,
            0,
            "Pay Yourself First",
            "Move money into savings the day you are paid, before spending on anything \
             else.",
        )
        .with_quiz(Quiz::new(
            "When should you move money to savings?",
            &["Whatever is left at month end", "Right after payday", "Only at tax time"],
            1,
        )),
        LessonContent::new(
            Saving,
            1,
            "High-Yield Savings",
            "High-yield accounts pay several times the interest of a standard savings \
             account for the same safety.",
        ),
        LessonContent::new(
            Investing,
            0,
            "What are Stocks?",
            "A share of stock is a small piece of ownership in a company. Its value \
             rises and falls with the business.",
        )
        .with_quiz(Quiz::new(
            "Owning a share of stock means you own...",
            &["A loan to the company", "Part of the company", "A company bond"],
            1,
        )),
        LessonContent::new(
            Investing,
            1,
            "Index Funds",
            "An index fund buys every company in a market index, spreading risk across \
             hundreds of businesses at low cost.",
        )
        .with_quiz(Quiz::new(
            "Why are index funds popular with beginners?",
            &["Guaranteed returns", "Broad diversification", "No risk at all"],
            1,
        )),
    ]
}
