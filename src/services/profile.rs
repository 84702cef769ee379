//! Profile service

use tracing::info;

use crate::error::{FinbudError, FinbudResult};
use crate::models::{LevelProgress, Profile, ProfileUpdate, UserId};
use crate::storage::RecordStore;

pub struct ProfileService<'a> {
    store: &'a dyn RecordStore,
    user: UserId,
}

impl<'a> ProfileService<'a> {
    pub fn new(store: &'a dyn RecordStore, user: UserId) -> Self {
        Self { store, user }
    }

    pub fn get(&self) -> FinbudResult<Profile> {
        self.store
            .get_profile(self.user)?
            .ok_or_else(|| FinbudError::profile_not_found(self.user.to_string()))
    }

    /// Apply a partial edit; rejects empty and invalid updates before writing
    pub fn update(&self, update: &ProfileUpdate) -> FinbudResult<Profile> {
        if *update == ProfileUpdate::default() {
            return Err(FinbudError::Validation("Nothing to update".into()));
        }
        update
            .validate()
            .map_err(|e| FinbudError::Validation(e.to_string()))?;

        let profile = self.store.update_profile(self.user, update)?;
        info!(user = %self.user.short(), "profile updated");
        Ok(profile)
    }

    pub fn level(&self) -> FinbudResult<LevelProgress> {
        Ok(self.get()?.level_progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinbudPaths;
    use crate::models::{Avatar, Money};
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, UserId) {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(FinbudPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let user = UserId::new();
        storage.create_profile(Profile::new(user, "Sam")).unwrap();
        (temp_dir, storage, user)
    }

    #[test]
    fn test_update_fields() {
        let (_temp, storage, user) = setup();
        let service = ProfileService::new(&storage, user);

        let profile = service
            .update(&ProfileUpdate {
                avatar: Some(Avatar::Owl),
                monthly_income: Some(Money::from_units(3200)),
                ..ProfileUpdate::default()
            })
            .unwrap();

        assert_eq!(profile.avatar, Avatar::Owl);
        assert_eq!(profile.monthly_income, Money::from_units(3200));
        assert_eq!(profile.display_name, "Sam");
    }

    #[test]
    fn test_invalid_updates_rejected() {
        let (_temp, storage, user) = setup();
        let service = ProfileService::new(&storage, user);

        assert!(service
            .update(&ProfileUpdate::default())
            .unwrap_err()
            .is_validation());
        assert!(service
            .update(&ProfileUpdate {
                display_name: Some("x".repeat(51)),
                ..ProfileUpdate::default()
            })
            .unwrap_err()
            .is_validation());
        assert!(service
            .update(&ProfileUpdate {
                monthly_income: Some(Money::from_units(-1)),
                ..ProfileUpdate::default()
            })
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_level_progress() {
        let (_temp, storage, user) = setup();
        let service = ProfileService::new(&storage, user);
        storage
            .update_profile(
                user,
                &ProfileUpdate {
                    current_xp: Some(1250),
                    ..ProfileUpdate::default()
                },
            )
            .unwrap();

        let level = service.level().unwrap();
        assert_eq!(level.level, 3);
        assert_eq!(level.xp_into_level, 250);
        assert_eq!(level.xp_to_next_level, 250);
    }

    #[test]
    fn test_missing_profile() {
        let (_temp, storage, _user) = setup();
        let service = ProfileService::new(&storage, UserId::new());
        assert!(service.get().unwrap_err().is_not_found());
    }
}
