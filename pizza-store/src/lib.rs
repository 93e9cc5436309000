use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub mod error;
pub mod models;
pub mod repository;
pub mod schema;

pub use diesel::SqliteConnection;
pub use error::{StoreError, StoreResult};
pub use repository::{PizzaRepository, RestaurantPizzaRepository, RestaurantRepository};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub const DEFAULT_DATABASE_URL: &str = "app.db";

/// Opens a connection with foreign key enforcement turned on.
///
/// SQLite only honours `ON DELETE CASCADE` on connections that enabled
/// `foreign_keys`, so every connection handed out by this crate goes through here.
pub fn establish_connection(database_url: &str) -> StoreResult<SqliteConnection> {
    let mut conn = SqliteConnection::establish(database_url)?;
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
    Ok(conn)
}

/// Handle to the SQLite file. Cloned into request handlers; it holds no
/// connection itself, each unit of work opens its own.
#[derive(Clone, Debug)]
pub struct Database {
    database_url: String,
}

impl Database {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.database_url
    }

    /// Creates the tables if they do not exist yet. Safe to call on every startup.
    pub fn setup(&self) -> StoreResult<()> {
        self.with_connection(|conn| {
            let applied = conn
                .run_pending_migrations(MIGRATIONS)
                .map_err(StoreError::Migration)?;
            for version in &applied {
                info!(%version, "applied migration");
            }
            Ok(())
        })
    }

    /// Runs `f` on a freshly opened connection. The connection is closed when
    /// this returns, whether `f` succeeded or not.
    pub fn with_connection<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> StoreResult<T>,
    {
        let mut conn = establish_connection(&self.database_url)?;
        f(&mut conn)
    }

    /// Like [`Database::with_connection`], wrapped in a single transaction that
    /// is rolled back when `f` returns an error.
    pub fn transaction<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> StoreResult<T>,
    {
        self.with_connection(|conn| conn.transaction::<_, StoreError, _>(f))
    }
}
