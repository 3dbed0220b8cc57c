use std::fmt::Debug;

use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::{Club, NewUser, User, UserId, UserProfile, UserRole},
    traits::{AccountApiError, AccountManagement},
};

/// Where the web client should send a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRoute {
    pub role: UserRole,
    pub path: String,
}

/// `AccountApi` looks up the user behind an access token and maintains their profile.
pub struct AccountApi<B> {
    db: B,
}

impl<B> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi")
    }
}

impl<B> AccountApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub async fn user(&self, user_id: &UserId) -> Result<Option<User>, AccountApiError> {
        self.db.fetch_user(user_id).await
    }

    /// Creates or updates the caller's profile. The role always comes from the access token.
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        role: UserRole,
        profile: UserProfile,
    ) -> Result<User, AccountApiError> {
        self.db.upsert_user(NewUser { id: user_id.clone(), role, profile }).await
    }

    /// The dashboard for the user's stored role. Users that have not completed sign-up are sent to onboarding for the
    /// role in their access token.
    pub async fn dashboard(&self, user_id: &UserId, token_role: UserRole) -> Result<DashboardRoute, AccountApiError> {
        let route = match self.db.fetch_user(user_id).await? {
            Some(user) => DashboardRoute { role: user.role, path: user.role.dashboard_path() },
            None => DashboardRoute { role: token_role, path: token_role.onboarding_path() },
        };
        Ok(route)
    }

    pub async fn owned_club(&self, user_id: &UserId) -> Result<Option<Club>, AccountApiError> {
        self.db.fetch_owned_club(user_id).await
    }

    /// Activates or deactivates a user on an admin's behalf.
    pub async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<User, AccountApiError> {
        let user = self.db.set_user_active(user_id, is_active).await?;
        let verb = if is_active { "activated" } else { "deactivated" };
        info!("👤️ User {user_id} {verb}");
        Ok(user)
    }
}
