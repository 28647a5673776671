//! The poll loop.
//!
//! Each cycle fetches changes since the cursor, reports the newest item's
//! status, and advances the cursor. Any failure in a cycle becomes an
//! incident notification and the same window is retried after the pause.
//!
//! During a sustained outage only the first incident is sent. The next
//! successful cycle re-arms incident reporting.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::api::{current_date, validate, Homework, StatusApi};
use crate::duration::format_duration;
use crate::error::{ErrorKind, PollError};
use crate::notify::Notifier;
use crate::status::status_message;

/// Prefix of every incident notification.
pub const INCIDENT_PREFIX: &str = "Произошел сбой в работе программы";

/// Build the incident notification for an error.
pub fn incident_message(error: &PollError) -> String {
    format!("{}: {}", INCIDENT_PREFIX, error)
}

/// What a single cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The response carried no items.
    Unchanged,
    /// A status message was built and handed to the notifier.
    StatusChanged { message: String, delivered: bool },
    /// The cycle failed; `notified` is true if an incident was delivered.
    Failed { error: PollError, notified: bool },
}

/// Polls a [`StatusApi`] and reports through a [`Notifier`].
#[derive(Debug)]
pub struct Poller<A, N> {
    api: A,
    notifier: N,
    cursor: i64,
    retry_period: Duration,
    incident_reported: bool,
}

impl<A: StatusApi, N: Notifier> Poller<A, N> {
    /// Create a poller starting at `cursor`.
    pub fn new(api: A, notifier: N, cursor: i64, retry_period: Duration) -> Self {
        Self {
            api,
            notifier,
            cursor,
            retry_period,
            incident_reported: false,
        }
    }

    /// The timestamp the next request starts from.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Whether an incident was already sent for the current outage.
    pub fn incident_reported(&self) -> bool {
        self.incident_reported
    }

    /// Poll forever, pausing `retry_period` after every cycle.
    pub async fn run(&mut self) {
        info!(
            cursor = self.cursor,
            retry_period = %format_duration(self.retry_period),
            "Starting poll loop"
        );
        loop {
            self.poll_once().await;
            debug!(retry_period = %format_duration(self.retry_period), "Sleeping until next cycle");
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Run one cycle, including its notifications. Never sleeps.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        match self.cycle().await {
            Ok(outcome) => {
                if self.incident_reported {
                    info!("Status API recovered");
                }
                self.incident_reported = false;
                outcome
            }
            Err(error) => self.handle_failure(error).await,
        }
    }

    async fn cycle(&mut self) -> Result<CycleOutcome, PollError> {
        let response = self.api.fetch(self.cursor).await?;
        let items = validate(&response)?;

        let outcome = match items.first() {
            Some(newest) => {
                let homework = Homework::from_value(newest)?;
                let message = status_message(&homework)?;
                info!(homework = %homework.name, status = %homework.status, "Homework status changed");
                let delivered = self.notifier.notify(&message).await;
                if !delivered {
                    warn!(homework = %homework.name, "Status change was not delivered");
                }
                CycleOutcome::StatusChanged { message, delivered }
            }
            None => CycleOutcome::Unchanged,
        };

        self.cursor = current_date(&response).unwrap_or(self.cursor);
        Ok(outcome)
    }

    async fn handle_failure(&mut self, error: PollError) -> CycleOutcome {
        match error.kind() {
            ErrorKind::Transport
            | ErrorKind::ResponseStatus
            | ErrorKind::Shape
            | ErrorKind::HomeworkStatus => {
                let message = incident_message(&error);
                error!(kind = ?error.kind(), cursor = self.cursor, "{}", message);

                if self.incident_reported {
                    debug!("Incident already reported, not notifying again");
                    return CycleOutcome::Failed {
                        error,
                        notified: false,
                    };
                }

                let notified = self.notifier.notify(&message).await;
                self.incident_reported = notified;
                CycleOutcome::Failed { error, notified }
            }
        }
    }
}
