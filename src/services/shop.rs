//! Token shop service
//!
//! Prices come out of `total_points`; XP is never touched.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{FinbudError, FinbudResult};
use crate::models::{Profile, ProfileUpdate, ShopCategory, ShopItem, UserId};
use crate::storage::RecordStore;

/// A catalog item as seen by one user
#[derive(Debug, Clone, Serialize)]
pub struct ShopListing {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
    pub category: ShopCategory,
    pub owned: bool,
    pub affordable: bool,
}

#[derive(Debug, Clone)]
pub struct Purchase {
    pub item: &'static ShopItem,
    pub profile: Profile,
}

pub struct ShopService<'a> {
    store: &'a dyn RecordStore,
    user: UserId,
}

impl<'a> ShopService<'a> {
    pub fn new(store: &'a dyn RecordStore, user: UserId) -> Self {
        Self { store, user }
    }

    fn profile(&self) -> FinbudResult<Profile> {
        self.store
            .get_profile(self.user)?
            .ok_or_else(|| FinbudError::profile_not_found(self.user.to_string()))
    }

    pub fn balance(&self) -> FinbudResult<u32> {
        Ok(self.profile()?.total_points)
    }

    /// Catalog items, optionally one shelf only
    pub fn list(&self, category: Option<ShopCategory>) -> FinbudResult<Vec<ShopListing>> {
        let profile = self.profile()?;
        Ok(ShopItem::catalog()
            .iter()
            .filter(|item| category.map_or(true, |c| item.category == c))
            .map(|item| ShopListing {
                id: item.id,
                name: item.name,
                description: item.description,
                price: item.price,
                category: item.category,
                owned: profile.owns(item.id),
                affordable: profile.total_points >= item.price,
            })
            .collect())
    }

    pub fn owns(&self, item_id: &str) -> FinbudResult<bool> {
        Ok(self.profile()?.owns(item_id))
    }

    pub fn purchase(&self, item_id: &str) -> FinbudResult<Purchase> {
        let item = ShopItem::find(item_id).ok_or_else(|| FinbudError::shop_item_not_found(item_id))?;
        let profile = self.profile()?;

        if profile.owns(item.id) {
            return Err(FinbudError::Duplicate {
                entity_type: "Shop item",
                identifier: item.id.to_string(),
            });
        }

        if profile.total_points < item.price {
            warn!(item = item.id, price = item.price, balance = profile.total_points, "purchase rejected");
            return Err(FinbudError::InsufficientPoints {
                item: item.name.to_string(),
                needed: item.price,
                available: profile.total_points,
            });
        }

        let mut owned = profile.purchased_items.clone();
        owned.push(item.id.to_string());

        let profile = self.store.update_profile(
            self.user,
            &ProfileUpdate {
                total_points: Some(profile.total_points - item.price),
                purchased_items: Some(owned),
                ..ProfileUpdate::default()
            },
        )?;

        info!(item = item.id, price = item.price, balance = profile.total_points, "item purchased");
        Ok(Purchase { item, profile })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinbudPaths;
    use crate::models::shop::CSV_EXPORT_ITEM;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn setup(points: u32) -> (TempDir, Storage, UserId) {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(FinbudPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let user = UserId::new();
        let mut profile = Profile::new(user, "Sam");
        profile.total_points = points;
        profile.current_xp = points;
        storage.create_profile(profile).unwrap();
        (temp_dir, storage, user)
    }

    #[test]
    fn test_purchase_deducts_points_only() {
        let (_temp, storage, user) = setup(200);
        let service = ShopService::new(&storage, user);

        let purchase = service.purchase(CSV_EXPORT_ITEM).unwrap();

        assert_eq!(purchase.profile.total_points, 50);
        assert_eq!(purchase.profile.current_xp, 200);
        assert!(service.owns(CSV_EXPORT_ITEM).unwrap());
    }

    #[test]
    fn test_cannot_buy_twice() {
        let (_temp, storage, user) = setup(500);
        let service = ShopService::new(&storage, user);

        service.purchase("theme_midnight").unwrap();
        let err = service.purchase("theme_midnight").unwrap_err();

        assert!(matches!(err, FinbudError::Duplicate { .. }));
        assert_eq!(service.balance().unwrap(), 425);
    }

    #[test]
    fn test_insufficient_points() {
        let (_temp, storage, user) = setup(40);
        let service = ShopService::new(&storage, user);

        let err = service.purchase("category_pets").unwrap_err();
        assert!(matches!(
            err,
            FinbudError::InsufficientPoints {
                needed: 50,
                available: 40,
                ..
            }
        ));
        assert!(!service.owns("category_pets").unwrap());
    }

    #[test]
    fn test_unknown_item() {
        let (_temp, storage, user) = setup(1000);
        let service = ShopService::new(&storage, user);
        assert!(service.purchase("feature_time_travel").unwrap_err().is_not_found());
    }

    #[test]
    fn test_listing_flags() {
        let (_temp, storage, user) = setup(100);
        let service = ShopService::new(&storage, user);
        service.purchase("theme_nature").unwrap();

        let themes = service.list(Some(ShopCategory::Themes)).unwrap();
        assert_eq!(themes.len(), 3);
        let nature = themes.iter().find(|l| l.id == "theme_nature").unwrap();
        assert!(nature.owned);
        // 25 points left, themes cost 75
        assert!(themes.iter().all(|l| !l.affordable));
        assert_eq!(service.list(None).unwrap().len(), 12);
    }
}
