use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

const CREATE_RECORDS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS records (
        collection TEXT NOT NULL,
        id TEXT NOT NULL,
        position INTEGER NOT NULL,
        body TEXT NOT NULL,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        PRIMARY KEY (collection, id)
    );
"#;

const CREATE_RECORDS_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_records_collection
    ON records (collection, is_deleted, position);
"#;

/// Открыть файл БД SQLite (создается при отсутствии) и подготовить схему
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = sqlite_url(&absolute_path.to_string_lossy());
    tracing::info!("Connecting to database: {}", db_url);

    let conn = Database::connect(&db_url).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

/// БД в памяти с одним соединением (все запросы видят одни и те же таблицы)
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let conn = Database::connect(options).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for sql in [CREATE_RECORDS_TABLE, CREATE_RECORDS_INDEX] {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    Ok(())
}

/// URL вида sqlite://<path>?mode=rwc; на Windows перед буквой диска ставится "/"
fn sqlite_url(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url() {
        assert_eq!(sqlite_url("/var/db/app.db"), "sqlite:///var/db/app.db?mode=rwc");
        assert_eq!(
            sqlite_url("C:\\data\\app.db"),
            "sqlite:///C:/data/app.db?mode=rwc"
        );
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let conn = connect_in_memory().await.unwrap();
        ensure_schema(&conn).await.unwrap();
    }
}
