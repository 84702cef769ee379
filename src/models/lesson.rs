//! Learning modules and lesson content
//!
//! Modules form a fixed, ordered catalog. Lessons are seed data shared by all
//! users; within a module their `order_index` defines the unlock sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LessonId;

/// A learning module, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningModule {
    Budgeting,
    Credit,
    Saving,
    Investing,
}

impl LearningModule {
    /// All modules in the order the next-lesson scan walks them
    pub fn all() -> &'static [Self] {
        &[Self::Budgeting, Self::Credit, Self::Saving, Self::Investing]
    }

    /// Stable slug used in records and on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Budgeting => "budgeting",
            Self::Credit => "credit",
            Self::Saving => "saving",
            Self::Investing => "investing",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Budgeting => "Budgeting Basics",
            Self::Credit => "Credit Score 101",
            Self::Saving => "Saving Strategies",
            Self::Investing => "Investing 101",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Budgeting => "Master the fundamentals of money management",
            Self::Credit => "Build and maintain good credit",
            Self::Saving => "Grow your money over time",
            Self::Investing => "Start your investment journey",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Budgeting => "wallet",
            Self::Credit => "credit-card",
            Self::Saving => "piggy-bank",
            Self::Investing => "trending-up",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::all().iter().copied().find(|m| m.slug() == s)
    }
}

impl fmt::Display for LearningModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// A multiple-choice question attached to a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`
    pub answer: usize,
}

impl Quiz {
    pub fn new(question: impl Into<String>, options: &[&str], answer: usize) -> Self {
        Self {
            question: question.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer,
        }
    }

    /// Whether the submitted option index is the correct one
    pub fn is_correct(&self, submitted: usize) -> bool {
        submitted == self.answer
    }
}

/// One lesson of a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonContent {
    pub id: LessonId,
    pub module_id: LearningModule,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Quiz>,
    pub order_index: u32,
}

impl LessonContent {
    pub fn new(
        module_id: LearningModule,
        order_index: u32,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: LessonId::new(),
            module_id,
            title: title.into(),
            content: content.into(),
            quiz: None,
            order_index,
        }
    }

    pub fn with_quiz(mut self, quiz: Quiz) -> Self {
        self.quiz = Some(quiz);
        self
    }

    pub fn has_quiz(&self) -> bool {
        self.quiz.is_some()
    }
}

/// Points awarded for a lesson: `base + order_index * increment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsFormula {
    pub base: u32,
    pub increment: u32,
}

impl Default for PointsFormula {
    fn default() -> Self {
        Self {
            base: 25,
            increment: 5,
        }
    }
}

impl PointsFormula {
    pub fn points_for(&self, lesson: &LessonContent) -> u32 {
        self.base + lesson.order_index * self.increment
    }
}
