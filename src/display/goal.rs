//! Savings goal display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::services::GoalView;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn deadline_label(view: &GoalView) -> String {
    match (view.goal.deadline, view.days_left) {
        (Some(date), Some(days)) if days < 0 => format!("{} (passed)", date),
        (Some(date), Some(days)) => format!("{} ({}d)", date, days),
        _ => "-".to_string(),
    }
}

pub fn format_goal_table(goals: &[GoalView], currency: &str) -> String {
    if goals.is_empty() {
        return "No savings goals yet.\n\nRun 'finbud goal add' to set one.\n".to_string();
    }

    let rows = goals.iter().map(|v| GoalRow {
        name: v.goal.name.clone(),
        saved: v.goal.current_amount.format_with_symbol(currency),
        target: v.goal.target_amount.format_with_symbol(currency),
        progress: if v.is_complete {
            "done".to_string()
        } else {
            format!("{:.0}%", v.progress_percent)
        },
        deadline: deadline_label(v),
        id: v.goal.id.short(),
    });

    format!("{}\n", Table::new(rows).with(Style::psql()))
}

pub fn format_goal_details(view: &GoalView, currency: &str) -> String {
    let goal = &view.goal;
    let mut output = String::new();

    output.push_str(&format!("Goal: {}\n", goal.name));
    output.push_str(&format!("  ID:        {}\n", goal.id));
    output.push_str(&format!(
        "  Saved:     {} of {} ({:.1}%)\n",
        goal.current_amount.format_with_symbol(currency),
        goal.target_amount.format_with_symbol(currency),
        view.progress_percent
    ));
    if view.is_complete {
        output.push_str("  Status:    complete\n");
    } else {
        output.push_str(&format!(
            "  Remaining: {}\n",
            view.remaining.format_with_symbol(currency)
        ));
    }
    if goal.deadline.is_some() {
        output.push_str(&format!("  Deadline:  {}\n", deadline_label(view)));
    }
    output.push_str(&format!(
        "  Created:   {}\n",
        goal.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewGoal, SavingsGoal, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_goal_table() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut goal = SavingsGoal::new(
            UserId::new(),
            NewGoal::new("Trip", Money::from_units(400))
                .with_deadline(NaiveDate::from_ymd_opt(2024, 5, 11).unwrap()),
        );
        goal.current_amount = Money::from_units(100);

        let output = format_goal_table(&[GoalView::new(goal, today)], "$");
        assert!(output.contains("Trip"));
        assert!(output.contains("25%"));
        assert!(output.contains("(10d)"));
    }

    #[test]
    fn test_completed_goal_details() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut goal = SavingsGoal::new(UserId::new(), NewGoal::new("Bike", Money::from_units(50)));
        goal.current_amount = Money::from_units(60);

        let output = format_goal_details(&GoalView::new(goal, today), "$");
        assert!(output.contains("Status:    complete"));
        assert!(!output.contains("Remaining"));
    }
}
