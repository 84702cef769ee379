//! Budget Summary Report
//!
//! Spend, remaining balance and per-category status for one reporting period.
//! Budgets are stored monthly and scaled onto the period by its multiplier;
//! spend counts expense transactions dated on or after the period start.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::FinbudResult;
use crate::models::{BudgetCategory, CategoryId, Money, PeriodWindow, ReportingPeriod, Transaction};

/// Usage above this percentage is a warning
pub const WARNING_THRESHOLD: f64 = 80.0;

/// Usage band for a budget line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Normal,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn from_percent(percent_used: f64) -> Self {
        if percent_used > 100.0 {
            Self::Over
        } else if percent_used > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Warning => write!(f, "warning"),
            Self::Over => write!(f, "over"),
        }
    }
}

/// One category's share of the period
#[derive(Debug, Clone, Serialize)]
pub struct CategorySpend {
    pub category_id: CategoryId,
    pub name: String,
    pub icon: String,
    pub color: String,
    /// Monthly budget scaled onto the period
    pub budget: Money,
    pub spent: Money,
    pub remaining: Money,
    pub percent_used: f64,
    pub status: BudgetStatus,
}

/// Period-scoped budget figures
#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    pub period: ReportingPeriod,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days_remaining: i64,
    /// Sum of monthly category budgets
    pub total_budget: Money,
    /// `total_budget` scaled by the period multiplier
    pub period_budget: Money,
    /// All expenses in the window, categorized or not
    pub period_spent: Money,
    pub period_income: Money,
    /// May be negative
    pub remaining: Money,
    pub percent_used: f64,
    pub status: BudgetStatus,
    /// `remaining / days_remaining` when both are positive
    pub daily_allowance: Option<Money>,
    pub categories: Vec<CategorySpend>,
    /// Expenses with no category, or a category not in the list
    pub uncategorized_spent: Money,
}

impl BudgetSummary {
    /// Aggregate `transactions` against `categories` for the period containing `today`
    pub fn generate(
        categories: &[BudgetCategory],
        transactions: &[Transaction],
        period: ReportingPeriod,
        today: NaiveDate,
    ) -> Self {
        let window = period.window(today);
        let (num, den) = period.multiplier();

        let mut spent_by_category: HashMap<CategoryId, Money> = HashMap::new();
        let mut period_spent = Money::zero();
        let mut period_income = Money::zero();

        for txn in transactions.iter().filter(|t| window.includes(t.transaction_date)) {
            if txn.is_income() {
                period_income += txn.amount;
                continue;
            }
            period_spent += txn.amount;
            if let Some(category_id) = txn.category_id {
                *spent_by_category.entry(category_id).or_default() += txn.amount;
            }
        }

        let rows: Vec<CategorySpend> = categories
            .iter()
            .map(|c| {
                let budget = c.budget_amount.scale(num, den);
                let spent = spent_by_category.get(&c.id).copied().unwrap_or_default();
                let percent_used = spent.percent_of(budget);
                CategorySpend {
                    category_id: c.id,
                    name: c.name.clone(),
                    icon: c.icon.clone(),
                    color: c.color.clone(),
                    budget,
                    spent,
                    remaining: budget - spent,
                    percent_used,
                    status: BudgetStatus::from_percent(percent_used),
                }
            })
            .collect();

        let categorized: Money = rows.iter().map(|r| r.spent).sum();
        let total_budget: Money = categories.iter().map(|c| c.budget_amount).sum();
        let period_budget = total_budget.scale(num, den);
        let remaining = period_budget - period_spent;
        let percent_used = period_spent.percent_of(period_budget);

        Self {
            period,
            start: window.start,
            end: window.end,
            days_remaining: window.days_remaining,
            total_budget,
            period_budget,
            period_spent,
            period_income,
            remaining,
            percent_used,
            status: BudgetStatus::from_percent(percent_used),
            daily_allowance: daily_allowance(remaining, &window),
            categories: rows,
            uncategorized_spent: period_spent - categorized,
        }
    }

    /// Categories at or past the warning threshold
    pub fn flagged(&self) -> impl Iterator<Item = &CategorySpend> {
        self.categories
            .iter()
            .filter(|c| c.status != BudgetStatus::Normal)
    }

    /// Plain-text rendering for the terminal
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut out = String::new();

        out.push_str(&format!(
            "Budget ({}) {} to {}\n",
            self.period,
            self.start,
            self.end.pred_opt().unwrap_or(self.end)
        ));
        out.push_str(&format!(
            "  Budget:    {:>12}\n  Spent:     {:>12}  ({:.1}%, {})\n  Remaining: {:>12}\n",
            money(self.period_budget),
            money(self.period_spent),
            self.percent_used,
            self.status,
            money(self.remaining)
        ));
        if self.period_income.is_positive() {
            out.push_str(&format!("  Income:    {:>12}\n", money(self.period_income)));
        }
        match self.daily_allowance {
            Some(daily) => out.push_str(&format!(
                "  {} per day for the next {} days\n",
                money(daily),
                self.days_remaining
            )),
            None => out.push_str("  No daily allowance left this period\n"),
        }
        if self.uncategorized_spent.is_positive() {
            out.push_str(&format!(
                "  Uncategorized: {}\n",
                money(self.uncategorized_spent)
            ));
        }

        out
    }

    /// Per-category rows as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FinbudResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["category", "budget", "spent", "remaining", "percent_used", "status"])?;
        for row in &self.categories {
            csv.write_record([
                row.name.clone(),
                format!("{:.2}", row.budget.as_f64()),
                format!("{:.2}", row.spent.as_f64()),
                format!("{:.2}", row.remaining.as_f64()),
                format!("{:.1}", row.percent_used),
                row.status.to_string(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

fn daily_allowance(remaining: Money, window: &PeriodWindow) -> Option<Money> {
    (remaining.is_positive() && window.days_remaining > 0)
        .then(|| remaining.divide(window.days_remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCategory, NewTransaction, UserId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn category(user: UserId, name: &str, budget: i64) -> BudgetCategory {
        BudgetCategory::new(user, NewCategory::new(name, Money::from_units(budget)))
    }

    fn expense(user: UserId, cat: Option<&BudgetCategory>, units: i64, on: NaiveDate) -> Transaction {
        Transaction::new(
            user,
            NewTransaction::expense(Money::from_units(units), cat.map(|c| c.id), on),
        )
    }

    #[test]
    fn test_single_expense_month() {
        let user = UserId::new();
        let today = date(2024, 6, 10);
        let food = category(user, "Food", 400);
        let txns = vec![expense(user, Some(&food), 50, date(2024, 6, 3))];

        let summary = BudgetSummary::generate(&[food], &txns, ReportingPeriod::Month, today);

        assert_eq!(summary.period_spent, Money::from_units(50));
        assert_eq!(summary.remaining, Money::from_units(350));
        assert_eq!(summary.percent_used, 12.5);
        assert_eq!(summary.status, BudgetStatus::Normal);
        assert_eq!(summary.categories[0].percent_used, 12.5);
        // 350 over the 20 days left in June
        assert_eq!(summary.daily_allowance, Some(Money::from_cents(1750)));
    }

    #[test]
    fn test_overspent_month_has_no_allowance() {
        let user = UserId::new();
        let today = date(2024, 6, 10);
        let food = category(user, "Food", 400);
        let txns = vec![
            expense(user, Some(&food), 300, date(2024, 6, 1)),
            expense(user, Some(&food), 150, date(2024, 6, 9)),
        ];

        let summary = BudgetSummary::generate(&[food], &txns, ReportingPeriod::Month, today);

        assert_eq!(summary.remaining, Money::from_units(-50));
        assert_eq!(summary.status, BudgetStatus::Over);
        assert_eq!(summary.categories[0].status, BudgetStatus::Over);
        assert!(summary.daily_allowance.is_none());
    }

    #[test]
    fn test_total_budget_ignores_transactions_and_order() {
        let user = UserId::new();
        let today = date(2024, 6, 10);
        let a = category(user, "Rent", 1200);
        let b = category(user, "Fun", 150);
        let txns = vec![expense(user, Some(&a), 999, today)];

        let forward = BudgetSummary::generate(
            &[a.clone(), b.clone()],
            &[],
            ReportingPeriod::Month,
            today,
        );
        let reversed = BudgetSummary::generate(&[b, a], &txns, ReportingPeriod::Semester, today);

        assert_eq!(forward.total_budget, Money::from_units(1350));
        assert_eq!(reversed.total_budget, Money::from_units(1350));
    }

    #[test]
    fn test_today_counts_in_every_period() {
        let user = UserId::new();
        let today = date(2024, 9, 1);
        let txns = vec![expense(user, None, 20, today)];

        for period in ReportingPeriod::all() {
            let summary = BudgetSummary::generate(&[], &txns, *period, today);
            assert_eq!(summary.period_spent, Money::from_units(20), "{}", period);
        }
    }

    #[test]
    fn test_zero_budget_reports_zero_percent() {
        let user = UserId::new();
        let today = date(2024, 6, 10);
        let misc = category(user, "Misc", 0);
        let txns = vec![expense(user, Some(&misc), 30, today)];

        let summary = BudgetSummary::generate(&[misc], &txns, ReportingPeriod::Month, today);

        assert_eq!(summary.categories[0].percent_used, 0.0);
        assert_eq!(summary.percent_used, 0.0);
        assert_eq!(summary.status, BudgetStatus::Normal);
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_failing() {
        let user = UserId::new();
        let today = date(2024, 6, 10);
        let huge = Money::parse("30000000000000000").unwrap();
        let big = BudgetCategory::new(user, NewCategory::new("Castle", huge));
        let txns = vec![
            Transaction::new(user, NewTransaction::expense(huge, Some(big.id), today)),
            Transaction::new(user, NewTransaction::expense(huge, Some(big.id), today)),
            Transaction::new(user, NewTransaction::expense(huge, None, today)),
            Transaction::new(user, NewTransaction::expense(huge, None, today)),
        ];

        let summary = BudgetSummary::generate(&[big], &txns, ReportingPeriod::Semester, today);

        assert_eq!(summary.period_budget.cents(), i64::MAX);
        assert_eq!(summary.period_spent.cents(), i64::MAX);
        assert_eq!(summary.categories[0].budget.cents(), i64::MAX);
    }

    #[test]
    fn test_week_scales_budget_and_skips_earlier_spend() {
        let user = UserId::new();
        // Wednesday; week started Sunday the 9th
        let today = date(2024, 6, 12);
        let food = category(user, "Food", 402);
        let txns = vec![
            expense(user, Some(&food), 40, date(2024, 6, 8)),
            expense(user, Some(&food), 10, date(2024, 6, 9)),
        ];

        let summary = BudgetSummary::generate(&[food], &txns, ReportingPeriod::Week, today);

        assert_eq!(summary.period_budget, Money::from_cents(10050));
        assert_eq!(summary.period_spent, Money::from_units(10));
        assert_eq!(summary.days_remaining, 4);
    }

    #[test]
    fn test_uncategorized_and_income_reported_separately() {
        let user = UserId::new();
        let today = date(2024, 6, 10);
        let food = category(user, "Food", 400);
        let stray = category(user, "Deleted", 100);
        let income = Transaction::new(
            user,
            NewTransaction::income(Money::from_units(2000), date(2024, 6, 1)),
        );
        let txns = vec![
            expense(user, Some(&food), 50, today),
            expense(user, None, 15, today),
            expense(user, Some(&stray), 5, today),
            income,
        ];

        let summary = BudgetSummary::generate(&[food], &txns, ReportingPeriod::Month, today);

        assert_eq!(summary.period_spent, Money::from_units(70));
        assert_eq!(summary.uncategorized_spent, Money::from_units(20));
        assert_eq!(summary.period_income, Money::from_units(2000));
    }

    #[test]
    fn test_warning_band() {
        assert_eq!(BudgetStatus::from_percent(80.0), BudgetStatus::Normal);
        assert_eq!(BudgetStatus::from_percent(80.5), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::from_percent(100.0), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::from_percent(100.1), BudgetStatus::Over);
    }

    #[test]
    fn test_export_csv() {
        let user = UserId::new();
        let food = category(user, "Food", 400);
        let summary =
            BudgetSummary::generate(&[food], &[], ReportingPeriod::Month, date(2024, 6, 10));

        let mut buf = Vec::new();
        summary.export_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("category,budget,spent,remaining,percent_used,status\n"));
        assert!(text.contains("Food,400.00,0.00,400.00,0.0,normal"));
    }
}
