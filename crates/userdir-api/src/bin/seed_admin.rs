//! Seed an admin user into the credential store
//!
//! Run with:
//! ```bash
//! cargo run -p userdir-api --bin seed-admin -- <username> <password> [email]
//! ```
//!
//! Writes directly to the store file named by `AUTH_STORE_PATH`, so run it
//! while the server is stopped.

use std::process::ExitCode;

use tracing::info;
use userdir_common::auth::hash_password;
use userdir_common::try_init_tracing;
use userdir_core::{CredentialStore, Role, StoreError, User};
use userdir_store::FileCredentialStore;

const MIN_PASSWORD_LEN: usize = 8;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (username, password, email) = match args.as_slice() {
        [username, password] => (
            username.clone(),
            password.clone(),
            format!("{username}@localhost"),
        ),
        [username, password, email] => (username.clone(), password.clone(), email.clone()),
        _ => {
            eprintln!("Usage: seed-admin <username> <password> [email]");
            return ExitCode::FAILURE;
        }
    };

    if password.len() < MIN_PASSWORD_LEN {
        eprintln!("Password must be at least {MIN_PASSWORD_LEN} characters");
        return ExitCode::FAILURE;
    }

    let path = std::env::var("AUTH_STORE_PATH")
        .unwrap_or_else(|_| "./data/auth-users.json".to_string());

    match seed(&path, username, password, email).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "Admin user created");
            println!("Admin user '{}' created in {path}", user.username);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to seed admin: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn seed(
    path: &str,
    username: String,
    password: String,
    email: String,
) -> Result<User, Box<dyn std::error::Error>> {
    let store = FileCredentialStore::new(path);

    if store.find_user_by_username(&username).await?.is_some() {
        return Err(Box::new(StoreError::conflict(format!(
            "user '{username}' already exists"
        ))));
    }

    let user = User::new(username, hash_password(&password)?, email, Role::Admin);
    store.create_user(&user).await?;
    Ok(user)
}
