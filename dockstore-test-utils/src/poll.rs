//! Bounded polling for eventually consistent state.

use std::{future::Future, time::Duration};

use crate::error::TestError;

/// Evaluates `condition` until it holds, sleeping `interval` between attempts
///
/// # Arguments
/// - `attempts` - Maximum number of evaluations
/// - `interval` - Pause after each failed evaluation
/// - `description` - What is being waited for, used in the timeout error
/// - `condition` - Returns `Ok(true)` once the awaited state is reached
///
/// # Returns
/// - `Ok(())` - The condition held within `attempts` evaluations
/// - `Err(TestError::PollTimeout)` - It never held
/// - `Err(_)` - The condition itself failed; polling stops immediately
pub async fn poll_until<F, Fut>(
    attempts: u32,
    interval: Duration,
    description: &str,
    mut condition: F,
) -> Result<(), TestError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, TestError>>,
{
    for attempt in 1..=attempts {
        if condition().await? {
            return Ok(());
        }

        tracing::debug!(attempt, attempts, %description, "Condition not met yet");
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }

    Err(TestError::PollTimeout {
        description: description.to_string(),
        attempts,
        interval,
    })
}
