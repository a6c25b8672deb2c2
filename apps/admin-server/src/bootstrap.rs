//! Startup provisioning of the configured staff account.

use blog_core::domain::User;
use blog_core::ports::{PasswordService, UserRepository};

use crate::config::AdminBootstrap;
use crate::middleware::error::AppError;

/// Create the configured staff user, or grant staff to an existing account
/// with that username. Existing passwords are left alone.
pub async fn ensure_staff_user(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    account: &AdminBootstrap,
) -> Result<User, AppError> {
    if let Some(existing) = users.find_by_username(&account.username).await? {
        if existing.is_staff {
            tracing::debug!(username = %existing.username, "Staff account present");
            return Ok(existing);
        }
        let mut promoted = existing.staff();
        promoted.updated_at = chrono::Utc::now();
        let saved = users.update(promoted).await?;
        tracing::info!(username = %saved.username, "Granted staff status");
        return Ok(saved);
    }

    let hash = passwords
        .hash(&account.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let user = User::new(account.username.clone(), account.email.clone(), hash).staff();
    user.validate()?;

    let saved = users.create(user).await?;
    tracing::info!(username = %saved.username, "Created staff account");
    Ok(saved)
}
