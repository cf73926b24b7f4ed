//! Database connection.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};

use common::DatabaseConfig;

/// Database wrapper handing connections to the store
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection pool sized from the configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!("Database connected");

        Ok(Self { connection })
    }

    /// Wrap an existing connection (a mock one in tests).
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Hand the connection over to its owner (the store).
    pub fn into_connection(self) -> DatabaseConnection {
        self.connection
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    use super::*;

    #[tokio::test]
    async fn test_ping_runs_select_one() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let db = Database::from_connection(conn);

        db.ping().await.unwrap();

        assert_eq!(
            db.into_connection().into_transaction_log(),
            [Transaction::one(Statement::from_string(
                DatabaseBackend::Postgres,
                "SELECT 1"
            ))]
        );
    }

    #[tokio::test]
    async fn test_ping_surfaces_driver_error() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("server closed the connection".to_string())])
            .into_connection();

        let err = Database::from_connection(conn).ping().await.unwrap_err();

        assert!(matches!(err, DbErr::Custom(_)));
    }
}
