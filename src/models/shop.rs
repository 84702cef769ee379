//! Token shop catalog
//!
//! Items are fixed; prices are in points taken from a profile's
//! `total_points`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shelf an item sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopCategory {
    Modules,
    Features,
    Categories,
    Themes,
}

impl ShopCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "modules" | "module" => Some(Self::Modules),
            "features" | "feature" => Some(Self::Features),
            "categories" | "category" => Some(Self::Categories),
            "themes" | "theme" => Some(Self::Themes),
            _ => None,
        }
    }
}

impl fmt::Display for ShopCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Modules => "modules",
            Self::Features => "features",
            Self::Categories => "categories",
            Self::Themes => "themes",
        };
        write!(f, "{}", label)
    }
}

/// Item id that unlocks CSV export
pub const CSV_EXPORT_ITEM: &str = "feature_export";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
    pub category: ShopCategory,
}

const CATALOG: &[ShopItem] = &[
    ShopItem {
        id: "module_taxes",
        name: "Taxes 101",
        description: "Learn about filing taxes and deductions",
        price: 100,
        category: ShopCategory::Modules,
    },
    ShopItem {
        id: "module_crypto",
        name: "Crypto Basics",
        description: "Understand cryptocurrency fundamentals",
        price: 150,
        category: ShopCategory::Modules,
    },
    ShopItem {
        id: "module_real_estate",
        name: "Real Estate Investing",
        description: "Learn property investment strategies",
        price: 200,
        category: ShopCategory::Modules,
    },
    ShopItem {
        id: "feature_analytics",
        name: "Advanced Analytics",
        description: "Detailed spending insights and charts",
        price: 250,
        category: ShopCategory::Features,
    },
    ShopItem {
        id: CSV_EXPORT_ITEM,
        name: "CSV Export",
        description: "Export your data to spreadsheets",
        price: 150,
        category: ShopCategory::Features,
    },
    ShopItem {
        id: "feature_predictions",
        name: "Spending Predictions",
        description: "Spending forecasts from your history",
        price: 300,
        category: ShopCategory::Features,
    },
    ShopItem {
        id: "category_health",
        name: "Health & Wellness",
        description: "Track gym, supplements, and medical expenses",
        price: 50,
        category: ShopCategory::Categories,
    },
    ShopItem {
        id: "category_education",
        name: "Education",
        description: "Track courses, books, and learning materials",
        price: 50,
        category: ShopCategory::Categories,
    },
    ShopItem {
        id: "category_pets",
        name: "Pets",
        description: "Track pet food, vet visits, and supplies",
        price: 50,
        category: ShopCategory::Categories,
    },
    ShopItem {
        id: "theme_dark_gold",
        name: "Gold Theme",
        description: "Luxurious gold accent colors",
        price: 75,
        category: ShopCategory::Themes,
    },
    ShopItem {
        id: "theme_midnight",
        name: "Midnight Theme",
        description: "Deep blue night mode aesthetics",
        price: 75,
        category: ShopCategory::Themes,
    },
    ShopItem {
        id: "theme_nature",
        name: "Nature Theme",
        description: "Calming green earth tones",
        price: 75,
        category: ShopCategory::Themes,
    },
];

impl ShopItem {
    pub fn catalog() -> &'static [ShopItem] {
        CATALOG
    }

    pub fn find(id: &str) -> Option<&'static ShopItem> {
        CATALOG.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<_> = ShopItem::catalog().iter().map(|i| i.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_find() {
        assert_eq!(ShopItem::find(CSV_EXPORT_ITEM).map(|i| i.price), Some(150));
        assert!(ShopItem::find("theme_unknown").is_none());
    }
}
