//! Profile manager implementation.
//!
//! Thin pass-through over the user store. Field-presence validation
//! happens at the edge layer; identity fields (id, phone, app_id) are
//! immutable and never written here.

use crate::auth::{AuthError, AuthResult, User, UserId, UserUpdate};
use crate::db::UserStore;
use std::sync::Arc;

/// Profile manager
#[derive(Clone)]
pub struct ProfileManager {
    users: Arc<dyn UserStore>,
}

impl ProfileManager {
    /// Create a new profile manager
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Fetch a user by id
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - No user with that id
    pub async fn get_user(&self, user_id: UserId) -> AuthResult<User> {
        self.users
            .get_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Overwrite the mutable profile fields of a user
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - No user with that id
    pub async fn update_user(&self, update: &UserUpdate) -> AuthResult<User> {
        self.users
            .update_user(update)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Delete a user; true iff a record was actually removed
    pub async fn delete_user(&self, user_id: UserId) -> AuthResult<bool> {
        self.users.delete_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::mock::MockUserStore;

    async fn manager_with_ann() -> (ProfileManager, UserId) {
        let store = MockUserStore::new();
        let id = store
            .store_user("+1000", "Ann", 7, "hash-a")
            .await
            .expect("seed user");
        (ProfileManager::new(Arc::new(store)), id)
    }

    #[tokio::test]
    async fn get_user_returns_the_stored_record() {
        let (profile, id) = manager_with_ann().await;

        let user = profile.get_user(id).await.unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(user.phone, "+1000");
    }

    #[tokio::test]
    async fn get_unknown_user_is_not_found() {
        let (profile, _) = manager_with_ann().await;

        let result = profile.get_user(999).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn update_touches_only_mutable_fields() {
        let (profile, id) = manager_with_ann().await;

        let updated = profile
            .update_user(&UserUpdate {
                id,
                name: "Ann Droid".to_string(),
                avatar_url: Some("https://cdn/a.png".to_string()),
                description: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Ann Droid");
        assert_eq!(updated.avatar_url.as_deref(), Some("https://cdn/a.png"));
        assert_eq!(updated.phone, "+1000");
        assert_eq!(updated.app_id, 7);
    }

    #[tokio::test]
    async fn delete_is_true_once_then_false() {
        let (profile, id) = manager_with_ann().await;

        assert!(profile.delete_user(id).await.unwrap());
        assert!(!profile.delete_user(id).await.unwrap());
        assert!(matches!(
            profile.get_user(id).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
