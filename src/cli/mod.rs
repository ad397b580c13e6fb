//! Functions behind the `escola-cli` commands.

pub mod seeder;

use escola_core::AppError;
use escola_db::Store;
use escola_models::Admin;

use crate::modules::admins::service::AdminService;

/// Creates an administrator account. This is how the first account with
/// permission level 2 comes to exist.
///
/// # Errors
///
/// Fails when the e-mail is already registered or the store fails.
pub async fn create_admin(
    store: &dyn Store,
    email: &str,
    password: &str,
    permission: i32,
) -> Result<Admin, AppError> {
    AdminService::create_account(store, email.trim(), password, permission).await
}
