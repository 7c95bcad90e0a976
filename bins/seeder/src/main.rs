//! Administrator account seeder for Rentdesk.
//!
//! Creates the first ADMIN account so the system can be signed into. Running
//! it again leaves an existing account untouched.
//!
//! Environment:
//! - `DATABASE_URL` (or `RENTDESK__DATABASE__URL`)
//! - `SEED_ADMIN_EMAIL`, default `admin@rentdesk.local`
//! - `SEED_ADMIN_PASSWORD`, default `admin123`
//!
//! Usage: cargo run --bin seeder

use anyhow::{Context, bail};
use chrono::Utc;
use rentdesk_core::{
    auth::{Role, hash_password},
    users::{NewUser, UserStore},
};
use rentdesk_db::UserRepository;
use rentdesk_shared::{config::is_production, types::UserId};

const DEFAULT_ADMIN_EMAIL: &str = "admin@rentdesk.local";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    if is_production() {
        bail!("refusing to seed with RUN_MODE=production");
    }

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("RENTDESK__DATABASE__URL"))
        .context("DATABASE_URL must be set in environment")?;
    let email = env_or("SEED_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL)
        .trim()
        .to_lowercase();
    let password = env_or("SEED_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD);

    println!("Connecting to database...");
    let db = rentdesk_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let users = UserRepository::new(db);

    if let Some(existing) = users.find_by_email(&email).await? {
        println!("  Admin {email} already exists ({}), skipping...", existing.id);
        return Ok(());
    }

    let password_hash = hash_password(&password).context("Failed to hash admin password")?;
    let user = NewUser {
        id: UserId::new(),
        email: email.clone(),
        name: "Administrator".to_string(),
        password_hash,
        role: Role::Admin,
        can_create_owners: true,
        can_create_properties: true,
        created_at: Utc::now(),
    };
    users.insert_user(user).await?;

    println!("  Created admin: {email}");
    if password == DEFAULT_ADMIN_PASSWORD {
        println!("  Using the default password; change it before sharing this instance.");
    }
    Ok(())
}
