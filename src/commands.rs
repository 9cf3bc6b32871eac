//! Administrative commands, run outside of HTTP request handling.

use anyhow::Result;

use crate::constants::{SEED_TODOS, SEED_USER_NAME};
use crate::store::Store;

/// Create the tables, optionally dropping the existing ones first.
pub async fn initdb(store: &Store, drop: bool) -> Result<()> {
    store.init_schema(drop).await?;
    tracing::info!(drop, "initialized database");
    println!("Initialized database.");
    Ok(())
}

/// Fill an empty database with the sample user and reading list.
///
/// Does nothing when a user already exists, so running it twice never duplicates rows.
pub async fn forge(store: &Store) -> Result<()> {
    store.init_schema(false).await?;

    if let Some(user) = store.first_user().await? {
        tracing::info!(user = %user.name, "database already seeded, skipping");
        println!("Database already seeded.");
        return Ok(());
    }

    store.seed(SEED_USER_NAME, &SEED_TODOS).await?;
    tracing::info!(todos = SEED_TODOS.len(), "seeded database");
    println!("Done.");
    Ok(())
}
