//! Database connection leak detection.

use std::time::Duration;

use sea_orm::{DatabaseConnection, DbBackend};

use crate::{
    constant::{LEAK_CHECK_ATTEMPTS, LEAK_CHECK_INTERVAL_MS},
    error::TestError,
    poll::poll_until,
};

/// Snapshot of the connection pool behind a [`DatabaseConnection`].
///
/// sqlx exposes no count of tasks waiting for a connection, so only open and
/// idle connections are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionGauge {
    /// Connections currently open, idle or checked out.
    pub size: u32,
    pub idle: u32,
}

impl ConnectionGauge {
    pub fn sample(db: &DatabaseConnection) -> Self {
        match db.get_database_backend() {
            DbBackend::Sqlite => {
                let pool = db.get_sqlite_connection_pool();
                Self {
                    size: pool.size(),
                    idle: pool.num_idle() as u32,
                }
            }
            DbBackend::Postgres => {
                let pool = db.get_postgres_connection_pool();
                Self {
                    size: pool.size(),
                    idle: pool.num_idle() as u32,
                }
            }
            _ => Self::default(),
        }
    }

    /// Connections checked out of the pool.
    pub fn active(&self) -> u32 {
        self.size.saturating_sub(self.idle)
    }
}

/// Fails when connections stay checked out after a scenario finished
///
/// Requests still completing in the webservice may hold a connection briefly,
/// and sqlx returns released connections to the pool in the background, so the
/// pool is sampled up to [`LEAK_CHECK_ATTEMPTS`] times, [`LEAK_CHECK_INTERVAL_MS`] apart.
///
/// # Returns
/// - `Ok(())` - No connection is checked out
/// - `Err(TestError::ConnectionLeak)` - Connections were active at every sample
pub async fn assert_no_leaked_connections(db: &DatabaseConnection) -> Result<(), TestError> {
    assert_no_leaked_connections_within(
        db,
        LEAK_CHECK_ATTEMPTS,
        Duration::from_millis(LEAK_CHECK_INTERVAL_MS),
    )
    .await
}

/// [`assert_no_leaked_connections`] with an explicit sampling schedule.
pub async fn assert_no_leaked_connections_within(
    db: &DatabaseConnection,
    attempts: u32,
    interval: Duration,
) -> Result<(), TestError> {
    let mut last = ConnectionGauge::default();

    let result = poll_until(attempts, interval, "no active database connections", || {
        last = ConnectionGauge::sample(db);
        let active = last.active();
        async move { Ok(active == 0) }
    })
    .await;

    match result {
        Err(TestError::PollTimeout { attempts, .. }) => Err(TestError::ConnectionLeak {
            active: last.active(),
            attempts,
        }),
        other => other,
    }
}
