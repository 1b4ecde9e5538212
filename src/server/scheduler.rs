//! Scheduler for periodic maintenance jobs.
//!
//! Expired login sessions are deleted when a request presents them, but most are never
//! presented again. The scheduler sweeps them from the database on a fixed cron schedule.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{data::session::SessionRepository, error::Error};

/// Sweep expired sessions every 15 minutes.
pub const SESSION_CLEANUP_CRON: &str = "0 */15 * * * *";

/// Job scheduler for background database maintenance.
pub struct Scheduler {
    db: DatabaseConnection,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Scheduler ready to have jobs registered
    /// - `Err(Error::SchedulerError)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;

        Ok(Self { db, sched })
    }

    /// Registers all jobs and starts the scheduler.
    ///
    /// Jobs run in the background until the process exits.
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            SESSION_CLEANUP_CRON,
            "expired session cleanup",
            cleanup_expired_sessions,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job receives a clone of the database connection and logs the number of rows it
    /// affected, or its error.
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<u64, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db).await {
                        Ok(count) => tracing::debug!("Ran {}, {} row(s) affected", name, count),
                        Err(e) => tracing::error!("Error running {}: {}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}

/// Deletes every login session which has expired, returning how many were removed.
pub async fn cleanup_expired_sessions(db: DatabaseConnection) -> Result<u64, Error> {
    let result = SessionRepository::new(&db)
        .delete_expired(chrono::Utc::now().naive_utc())
        .await?;

    Ok(result.rows_affected)
}
