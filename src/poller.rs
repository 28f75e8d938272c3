use std::fmt;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{BotError, ErrorKind};
use crate::practicum::StatusSource;
use crate::status::{Interpretation, StatusCode, interpret, peek_status};
use crate::telegram::Notifier;
use crate::tracker::ChangeTracker;
use crate::validator::validate;

/// Phases of one poll iteration: FETCHING → VALIDATING → (NOTIFYING | SLEEPING).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Fetching,
    Validating,
    Notifying,
    Sleeping,
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollState::Fetching => write!(f, "FETCHING"),
            PollState::Validating => write!(f, "VALIDATING"),
            PollState::Notifying => write!(f, "NOTIFYING"),
            PollState::Sleeping => write!(f, "SLEEPING"),
        }
    }
}

/// What a single iteration ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response carried no homeworks.
    NoHomeworks,
    /// The latest status was already announced.
    Unchanged(StatusCode),
    /// A new status was announced; `delivered` is false if the chat send failed.
    Notified { status: StatusCode, delivered: bool },
    /// A new error text was sent to the chat.
    Reported { kind: ErrorKind, delivered: bool },
    /// The error text matched the last reported one and was only logged.
    Suppressed(ErrorKind),
}

/// Wall-clock source for the initial cursor.
pub fn now_unix_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Drives the fetch → validate → interpret → notify → sleep loop for one submission
/// feed. Tracker state lives here and nowhere else.
pub struct Poller<S, N> {
    source: S,
    notifier: N,
    tracker: ChangeTracker,
    cursor: i64,
    interval: Duration,
}

impl<S: StatusSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, cursor: i64, interval: Duration) -> Self {
        Self {
            source,
            notifier,
            tracker: ChangeTracker::new(),
            cursor,
            interval,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// Runs iterations until `limit` is reached, or forever when it is `None`.
    /// Every iteration is followed by exactly one sleep.
    pub async fn run(&mut self, limit: Option<u64>) {
        info!(
            cursor = self.cursor,
            interval_secs = self.interval.as_secs(),
            "starting homework status polling"
        );
        let mut completed = 0u64;
        while limit.is_none_or(|max| completed < max) {
            let outcome = self.tick().await;
            debug!(?outcome, "iteration finished");
            completed += 1;

            debug!(state = %PollState::Sleeping, secs = self.interval.as_secs());
            sleep(self.interval).await;
        }
    }

    /// Runs one iteration without sleeping. Never fails: errors are reported
    /// through the notifier and folded into the returned [`Outcome`].
    pub async fn tick(&mut self) -> Outcome {
        match self.poll().await {
            Ok(outcome) => {
                self.tracker.clear_error();
                outcome
            }
            Err(err) => self.report(err).await,
        }
    }

    async fn poll(&mut self) -> Result<Outcome, BotError> {
        debug!(state = %PollState::Fetching, cursor = self.cursor);
        let raw = self.source.fetch(self.cursor).await?;

        debug!(state = %PollState::Validating);
        let response = validate(&raw)?;

        let outcome = match response.latest() {
            None => {
                debug!("no homework updates since last check");
                Outcome::NoHomeworks
            }
            Some(record) => match peek_status(record) {
                // Already announced: the rest of the record is not needed.
                Some(status) if self.tracker.is_current(status) => {
                    debug!(%status, "homework status unchanged");
                    Outcome::Unchanged(status)
                }
                _ => {
                    // Interpret before committing to the tracker so a bad record
                    // is never marked as seen.
                    let Interpretation { status, message } = interpret(record)?;
                    if self.tracker.observe_status(status) {
                        let delivered = self.deliver(&message).await;
                        Outcome::Notified { status, delivered }
                    } else {
                        Outcome::Unchanged(status)
                    }
                }
            },
        };

        if let Some(current_date) = response.current_date {
            self.cursor = current_date;
        }
        Ok(outcome)
    }

    async fn report(&mut self, err: BotError) -> Outcome {
        let kind = err.kind();
        let message = format!("Сбой в работе программы: {err}");
        error!(%kind, "{message}");

        if self.tracker.observe_error(&message) {
            let delivered = self.deliver(&message).await;
            Outcome::Reported { kind, delivered }
        } else {
            debug!(%kind, "same error already reported");
            Outcome::Suppressed(kind)
        }
    }

    async fn deliver(&self, text: &str) -> bool {
        debug!(state = %PollState::Notifying);
        match self.notifier.notify(text).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to send message to chat");
                false
            }
        }
    }
}
