use std::{str::FromStr, time::Duration};

use anyhow::Result;
use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

pub mod model;

// 書き込みロックの解放を待つ上限
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn make_sqlite_connect_options(cfg: &DatabaseConfig) -> Result<SqliteConnectOptions> {
    Ok(SqliteConnectOptions::from_str(&cfg.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT))
}

#[derive(Clone)]
pub struct ConnectionPool(SqlitePool);

impl ConnectionPool {
    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &SqlitePool {
        &self.0
    }

    // 読み取りの後で書き込む処理ばかりなので、開始時点で書き込みロックを取る。
    // DEFERRED のままだとロックの昇格に失敗した側が待たずに SQLITE_BUSY になる
    pub async fn begin(&self) -> AppResult<sqlx::Transaction<'static, sqlx::Sqlite>> {
        self.0
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(AppError::TransactionError)
    }

    // テーブル定義は adapter/migrations 配下で管理する
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.0).await?;
        Ok(())
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> Result<ConnectionPool> {
    let options = make_sqlite_connect_options(cfg)?;
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_lazy_with(options);
    Ok(ConnectionPool(pool))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use shared::config::DatabaseConfig;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

    use super::{connect_database_with, ConnectionPool};

    // インメモリ DB は接続ごとに別物になるので、接続を 1 本に固定して使い回す
    pub async fn memory_pool() -> ConnectionPool {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .unwrap();
        let pool = ConnectionPool::new(pool);
        pool.migrate().await.unwrap();
        pool
    }

    // 複数接続から同時に書き込む検証用。アプリ本体と同じ接続設定を使う
    pub async fn file_pool(path: &Path, max_connections: u32) -> ConnectionPool {
        let cfg = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections,
        };
        let pool = connect_database_with(&cfg).unwrap();
        pool.migrate().await.unwrap();
        pool
    }
}
