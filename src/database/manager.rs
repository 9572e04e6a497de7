use diesel::SqliteConnection;
use diesel_async::AsyncConnection;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use tokio::sync::{Mutex, MutexGuard};

pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;

pub struct DbManager {
    connection: Mutex<DbConnection>,
}

impl DbManager {
    /// Opens (or creates) the SQLite file at `database_path`. `:memory:` gives a throwaway database.
    pub async fn new(database_path: &str) -> Result<Self, diesel::result::ConnectionError> {
        let connection = DbConnection::establish(database_path).await?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub async fn lock(&self) -> MutexGuard<'_, DbConnection> {
        self.connection.lock().await
    }
}
