//! Test database connection and fixture reset.

use migration::{
    Confidential1Migrator, Confidential2Migrator, FixtureSet, MigrationName, MigratorTrait,
    PublicMigrator,
};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr,
    FromQueryResult, Statement,
};
use tracing::debug;

use crate::{constant::SQLITE_MEMORY_URL, error::TestError};

#[derive(Debug, FromQueryResult)]
struct TableName {
    name: String,
}

/// Connects to the test database.
///
/// Uses `DATABASE_URL` (also read from a `.env` file) when set, otherwise an
/// in-memory SQLite database. SQLite is limited to one pooled connection since
/// every new in-memory connection would open a separate, empty database.
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected pool
/// - `Err(TestError::DbErr)` - The database could not be reached
pub async fn connect() -> Result<DatabaseConnection, TestError> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| SQLITE_MEMORY_URL.to_string());

    let mut opt = ConnectOptions::new(&url);
    opt.sqlx_logging(false);
    if url.starts_with("sqlite") {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(5);
    }

    Ok(Database::connect(opt).await?)
}

/// Drops every table and replays the migrations of `set` in order.
///
/// The migration bookkeeping table is dropped along with the fixture tables, so
/// the result depends only on `set` and not on what the database held before.
///
/// # Arguments
/// - `db` - Database to reset
/// - `set` - Fixture content to seed
///
/// # Returns
/// - `Ok(())` - Every migration of the set was applied
/// - `Err(TestError::MigrationFailed)` - A migration failed; names its version
/// - `Err(TestError::DbErr)` - Dropping the existing tables failed
pub async fn reset_database(db: &DatabaseConnection, set: FixtureSet) -> Result<(), TestError> {
    drop_all_tables(db).await?;

    match set {
        FixtureSet::Public => apply::<PublicMigrator>(db).await,
        FixtureSet::Confidential1 => apply::<Confidential1Migrator>(db).await,
        FixtureSet::Confidential2 => apply::<Confidential2Migrator>(db).await,
    }
}

/// Applies one migration at a time so a failure can be attributed to its version.
async fn apply<M: MigratorTrait>(db: &DatabaseConnection) -> Result<(), TestError> {
    for migration in M::migrations() {
        let version = migration.name().to_string();
        debug!(%version, "Applying fixture migration");

        M::up(db, Some(1))
            .await
            .map_err(|source| TestError::MigrationFailed { version, source })?;
    }

    Ok(())
}

/// Names of all user tables in the current database or schema.
pub async fn table_names(db: &DatabaseConnection) -> Result<Vec<String>, TestError> {
    let backend = db.get_database_backend();
    let sql = match backend {
        DbBackend::Sqlite => {
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name"
        }
        DbBackend::Postgres => {
            "SELECT tablename AS name FROM pg_tables WHERE schemaname = current_schema() ORDER BY tablename"
        }
        other => {
            return Err(DbErr::Custom(format!("Unsupported test database backend {other:?}")).into())
        }
    };

    let tables = TableName::find_by_statement(Statement::from_string(backend, sql))
        .all(db)
        .await?;

    Ok(tables.into_iter().map(|table| table.name).collect())
}

async fn drop_all_tables(db: &DatabaseConnection) -> Result<(), TestError> {
    let tables = table_names(db).await?;
    if tables.is_empty() {
        return Ok(());
    }

    debug!(count = tables.len(), "Dropping tables");

    match db.get_database_backend() {
        DbBackend::Postgres => {
            let list = tables
                .iter()
                .map(|table| format!("\"{table}\""))
                .collect::<Vec<_>>()
                .join(", ");
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS {list} CASCADE"))
                .await?;
        }
        _ => {
            // Children reference parents, so foreign keys must not block the drops
            db.execute_unprepared("PRAGMA foreign_keys = OFF").await?;
            for table in &tables {
                db.execute_unprepared(&format!("DROP TABLE IF EXISTS \"{table}\""))
                    .await?;
            }
            db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
        }
    }

    Ok(())
}
