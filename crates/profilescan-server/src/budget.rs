//! Outbound fetch budget for the analyze route.
//!
//! One analyze call can fan out to as many profile fetches as it has distinct
//! handles, so the server meters fetches, not requests: a one-handle lookup
//! and a full batch of 25 are charged 1 and 25 units respectively.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

#[derive(Debug)]
struct BudgetWindow {
    started_at: Instant,
    spent: usize,
}

/// Fixed-window fetch counter shared by every analyze request.
#[derive(Debug, Clone)]
pub struct FetchBudget {
    max_fetches: usize,
    window: Duration,
    state: Arc<Mutex<BudgetWindow>>,
}

/// Returned when a batch does not fit in what is left of the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetExhausted {
    pub retry_after: Duration,
}

impl BudgetExhausted {
    /// Whole seconds for a `Retry-After` header, never zero.
    #[must_use]
    pub fn retry_after_secs(self) -> u64 {
        let secs = self.retry_after.as_secs();
        if self.retry_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs.max(1)
        }
    }
}

impl FetchBudget {
    #[must_use]
    pub fn new(max_fetches: usize, window: Duration) -> Self {
        Self {
            max_fetches,
            window,
            state: Arc::new(Mutex::new(BudgetWindow {
                started_at: Instant::now(),
                spent: 0,
            })),
        }
    }

    #[must_use]
    pub fn per_minute(max_fetches: usize) -> Self {
        Self::new(max_fetches, Duration::from_secs(60))
    }

    /// Charges `fetches` units against the current window.
    ///
    /// An empty batch costs nothing and always passes. A batch larger than
    /// the whole budget is charged the whole budget, so it can still run in a
    /// fresh window instead of being refused forever.
    ///
    /// # Errors
    ///
    /// Returns [`BudgetExhausted`] with the time left in the window when the
    /// charge does not fit. Nothing is spent in that case.
    pub async fn try_spend(&self, fetches: usize) -> Result<(), BudgetExhausted> {
        if fetches == 0 {
            return Ok(());
        }
        let cost = fetches.min(self.max_fetches.max(1));

        let mut window = self.state.lock().await;
        let elapsed = window.started_at.elapsed();
        if elapsed >= self.window {
            window.started_at = Instant::now();
            window.spent = 0;
        }

        if window.spent + cost > self.max_fetches {
            return Err(BudgetExhausted {
                retry_after: self.window.saturating_sub(window.started_at.elapsed()),
            });
        }

        window.spent += cost;
        Ok(())
    }
}
