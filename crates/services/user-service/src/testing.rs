//! Programmable fake of the database driver for store tests.
//!
//! [`SqlMock`] registers queries in order: the exact SQL, the bound values
//! and the response to hand back (rows or a driver error). It turns into a
//! [`MockConnection`], which checks every executed statement against the
//! next pending expectation before answering. A statement that does not
//! match, or arrives with nothing pending, fails the call itself with a
//! `DbErr`. [`MockConnection::verify`] then reports any such failure and any
//! expectation that never ran.
//!
//! ```ignore
//! let mut mock = SqlMock::new();
//! mock.expect_query(SELECT_USER_BY_ID, [1i64.into()])
//!     .will_return_rows([row]);
//! let conn = mock.into_connection();
//!
//! let user = UserStore::new(conn.clone()).get_by_id(1).await?;
//! conn.verify()?;
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, ExecResult, IntoMockRow,
    MockDatabase, MockRow, QueryResult, Statement, Value,
};
use thiserror::Error;

/// A statement that broke the registered expectations.
#[derive(Debug, Clone, Error)]
pub enum ExpectationError {
    #[error("query {actual:?} does not match expected {expected:?}")]
    Mismatch {
        expected: Statement,
        actual: Statement,
    },

    #[error("query {0:?} was not expected")]
    Unexpected(Statement),

    #[error("there were unfulfilled expectations: {0:?}")]
    Unfulfilled(Vec<Statement>),
}

/// Builder for a fake connection with pre-registered query expectations.
pub struct SqlMock {
    backend: DatabaseBackend,
    expected: Vec<Statement>,
    responses: Vec<Result<Vec<MockRow>, DbErr>>,
}

impl SqlMock {
    /// Create a fake Postgres connection builder
    pub fn new() -> Self {
        Self::with_backend(DatabaseBackend::Postgres)
    }

    pub fn with_backend(backend: DatabaseBackend) -> Self {
        Self {
            backend,
            expected: Vec::new(),
            responses: Vec::new(),
        }
    }

    /// Register a query that must be executed with exactly these bound values.
    ///
    /// The returned builder must be finished with a response.
    pub fn expect_query<I>(&mut self, sql: &str, args: I) -> ExpectedQuery<'_>
    where
        I: IntoIterator<Item = Value>,
    {
        let statement = Statement::from_sql_and_values(self.backend, sql, args);
        ExpectedQuery {
            mock: self,
            statement,
        }
    }

    /// Number of registered expectations
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    /// Build the fake connection.
    pub fn into_connection(self) -> MockConnection {
        let db = self
            .responses
            .into_iter()
            .fold(MockDatabase::new(self.backend), |db, response| match response {
                Ok(rows) => db.append_query_results([rows]),
                Err(err) => db.append_query_errors([err]),
            });

        MockConnection {
            backend: self.backend,
            inner: Arc::new(db.into_connection()),
            state: Arc::new(Mutex::new(MockState {
                pending: self.expected.into(),
                failures: Vec::new(),
            })),
        }
    }

    fn register(&mut self, statement: Statement, response: Result<Vec<MockRow>, DbErr>) {
        self.expected.push(statement);
        self.responses.push(response);
    }
}

impl Default for SqlMock {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered query awaiting its programmed response.
#[must_use = "an expectation is only registered once a response is set"]
pub struct ExpectedQuery<'a> {
    mock: &'a mut SqlMock,
    statement: Statement,
}

impl ExpectedQuery<'_> {
    /// Answer the query with these rows (entity models or raw column maps).
    pub fn will_return_rows<I, R>(self, rows: I)
    where
        I: IntoIterator<Item = R>,
        R: IntoMockRow,
    {
        let rows = rows.into_iter().map(IntoMockRow::into_mock_row).collect();
        self.mock.register(self.statement, Ok(rows));
    }

    /// Answer the query with a driver error instead of rows.
    pub fn will_return_error(self, err: DbErr) {
        self.mock.register(self.statement, Err(err));
    }
}

struct MockState {
    pending: VecDeque<Statement>,
    failures: Vec<ExpectationError>,
}

/// Fake connection handed to the store. Clones share the same expectations.
#[derive(Clone)]
pub struct MockConnection {
    backend: DatabaseBackend,
    inner: Arc<DatabaseConnection>,
    state: Arc<Mutex<MockState>>,
}

impl MockConnection {
    /// Check that every registered query ran exactly once, in order, and
    /// that nothing else ran on the connection.
    pub fn verify(&self) -> Result<(), ExpectationError> {
        let state = self.lock();
        if let Some(failure) = state.failures.first() {
            return Err(failure.clone());
        }
        if !state.pending.is_empty() {
            return Err(ExpectationError::Unfulfilled(
                state.pending.iter().cloned().collect(),
            ));
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Consume the next expectation if `actual` matches it.
    ///
    /// A mismatch leaves the expectation pending so later responses stay
    /// aligned with their queries.
    fn check(&self, actual: &Statement) -> Result<(), DbErr> {
        let mut state = self.lock();
        let failure = match state.pending.front() {
            Some(expected) if expected == actual => None,
            Some(expected) => Some(ExpectationError::Mismatch {
                expected: expected.clone(),
                actual: actual.clone(),
            }),
            None => Some(ExpectationError::Unexpected(actual.clone())),
        };

        let Some(failure) = failure else {
            state.pending.pop_front();
            return Ok(());
        };

        let err = DbErr::Custom(failure.to_string());
        state.failures.push(failure);
        Err(err)
    }

    fn reject(&self, actual: Statement) -> DbErr {
        let failure = ExpectationError::Unexpected(actual);
        let err = DbErr::Custom(failure.to_string());
        self.lock().failures.push(failure);
        err
    }
}

#[async_trait]
impl ConnectionTrait for MockConnection {
    fn get_database_backend(&self) -> DatabaseBackend {
        self.backend
    }

    async fn execute(&self, stmt: Statement) -> Result<ExecResult, DbErr> {
        Err(self.reject(stmt))
    }

    async fn execute_unprepared(&self, sql: &str) -> Result<ExecResult, DbErr> {
        Err(self.reject(Statement::from_string(self.backend, sql)))
    }

    async fn query_one(&self, stmt: Statement) -> Result<Option<QueryResult>, DbErr> {
        self.check(&stmt)?;
        self.inner.query_one(stmt).await
    }

    async fn query_all(&self, stmt: Statement) -> Result<Vec<QueryResult>, DbErr> {
        self.check(&stmt)?;
        self.inner.query_all(stmt).await
    }
}
