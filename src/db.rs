use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::error::AppResult;

const PRAGMAS: [&str; 3] =
    ["PRAGMA foreign_keys=ON", "PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect_and_init(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;

    for pragma in PRAGMAS {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }

    init_schema(&db).await?;
    Ok(db)
}

/// Creates any missing tables. Existing tables and their rows are left alone.
pub async fn init_schema(db: &DatabaseConnection) -> AppResult<()> {
    let backend = db.get_database_backend();
    for stmt in schema::create_statements() {
        db.execute(backend.build(&stmt)).await?;
    }
    tracing::debug!("schema ready");
    Ok(())
}
