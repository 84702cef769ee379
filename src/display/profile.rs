//! Profile, badge and shop display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::{LevelProgress, Profile};
use crate::services::{BadgeStatus, ShopListing};

#[derive(Tabled)]
struct BadgeRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Badge")]
    name: String,
    #[tabled(rename = "How to earn")]
    criteria: String,
    #[tabled(rename = "Earned")]
    earned: String,
}

#[derive(Tabled)]
struct ShopRow {
    #[tabled(rename = "Item")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Shelf")]
    category: String,
    #[tabled(rename = "Price")]
    price: u32,
    #[tabled(rename = "")]
    state: &'static str,
}

pub fn format_profile(profile: &Profile, level: &LevelProgress, currency: &str) -> String {
    let mut output = String::new();

    let name = if profile.display_name.is_empty() {
        "(unnamed)"
    } else {
        profile.display_name.as_str()
    };
    output.push_str(&format!("{} {}\n", profile.avatar.emoji(), name));
    output.push_str(&format!(
        "  Level {}  ({} / {} XP, {:.0}%)\n",
        level.level,
        level.xp_into_level,
        level.xp_into_level + level.xp_to_next_level,
        level.percent
    ));
    output.push_str(&format!("  Total XP:       {}\n", profile.current_xp));
    output.push_str(&format!("  Points to spend: {}\n", profile.total_points));
    output.push_str(&format!("  Streak:         {} days\n", profile.current_streak));
    output.push_str(&format!(
        "  Monthly income: {}\n",
        profile.monthly_income.format_with_symbol(currency)
    ));
    if !profile.onboarding_completed {
        output.push_str("\nRun 'finbud onboard' to set up your budget.\n");
    }

    output
}

pub fn format_badges(badges: &[BadgeStatus]) -> String {
    if badges.is_empty() {
        return "No badges available. Run 'finbud init' first.\n".to_string();
    }

    let earned = badges.iter().filter(|b| b.earned).count();
    let rows = badges.iter().map(|b| BadgeRow {
        marker: if b.earned { "★" } else { "☆" },
        name: b.badge.name.clone(),
        criteria: b.badge.unlock_criteria.clone(),
        earned: b
            .earned_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    });

    format!(
        "{}\n\n{} of {} badges earned\n",
        Table::new(rows).with(Style::psql()),
        earned,
        badges.len()
    )
}

pub fn format_shop(listings: &[ShopListing], balance: u32) -> String {
    let rows = listings.iter().map(|l| ShopRow {
        id: l.id,
        name: l.name,
        category: l.category.to_string(),
        price: l.price,
        state: if l.owned {
            "owned"
        } else if l.affordable {
            "available"
        } else {
            ""
        },
    });

    format!(
        "Balance: {} points\n\n{}\n",
        balance,
        Table::new(rows).with(Style::psql())
    )
}
