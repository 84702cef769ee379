//! Category and transaction display formatting

use std::collections::HashMap;

use tabled::{settings::Style, Table, Tabled};

use crate::models::{BudgetCategory, Transaction};
use crate::reports::BudgetSummary;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Monthly budget")]
    budget: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Label")]
    label: String,
}

#[derive(Tabled)]
struct SpendRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Left")]
    remaining: String,
    #[tabled(rename = "Used")]
    percent: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn format_category_table(categories: &[BudgetCategory], currency: &str) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'finbud category add' or 'finbud onboard' to create some.\n"
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        name: c.name.clone(),
        budget: c.budget_amount.format_with_symbol(currency),
        icon: c.icon.clone(),
        id: c.id.short(),
    });

    format!("{}\n", Table::new(rows).with(Style::psql()))
}

pub fn format_category_details(category: &BudgetCategory, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:      {}\n", category.id));
    output.push_str(&format!(
        "  Budget:  {} per month\n",
        category.budget_amount.format_with_symbol(currency)
    ));
    if !category.icon.is_empty() || !category.color.is_empty() {
        output.push_str(&format!("  Style:   {} / {}\n", category.icon, category.color));
    }
    output.push_str(&format!(
        "  Created:  {}\n",
        category.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        category.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

/// Transactions as a register, category ids resolved to names
pub fn format_transaction_table(
    transactions: &[Transaction],
    categories: &[BudgetCategory],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let names: HashMap<_, _> = categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    let rows = transactions.iter().map(|t| TransactionRow {
        date: t.transaction_date.format(date_format).to_string(),
        kind: t.kind.to_string(),
        amount: t.signed_amount().format_with_symbol(currency),
        category: t
            .category_id
            .and_then(|id| names.get(&id).map(|n| n.to_string()))
            .unwrap_or_else(|| "-".to_string()),
        label: truncate(t.label(), 30),
    });

    format!("{}\n", Table::new(rows).with(Style::psql()))
}

/// Summary header followed by the per-category table
pub fn format_budget_summary(summary: &BudgetSummary, currency: &str) -> String {
    let mut output = summary.format_terminal(currency);

    if summary.categories.is_empty() {
        return output;
    }

    let rows = summary.categories.iter().map(|c| SpendRow {
        name: c.name.clone(),
        budget: c.budget.format_with_symbol(currency),
        spent: c.spent.format_with_symbol(currency),
        remaining: c.remaining.format_with_symbol(currency),
        percent: format!("{:.0}%", c.percent_used),
        status: c.status.to_string(),
    });

    output.push('\n');
    output.push_str(&Table::new(rows).with(Style::psql()).to_string());
    output.push('\n');

    let flagged: Vec<_> = summary.flagged().map(|c| c.name.as_str()).collect();
    if !flagged.is_empty() {
        output.push_str(&format!("\nWatch out: {}\n", flagged.join(", ")));
    }

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
