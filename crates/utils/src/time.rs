//! Suspend primitive used between attempts.

use std::time::Duration;

/// Suspend the current task for `duration_ms` milliseconds.
///
/// Only the calling task waits; other tasks on the runtime keep running.
pub async fn sleep(duration_ms: u64) {
    sleep_for(Duration::from_millis(duration_ms)).await;
}

/// Suspend the current task for the given duration
pub async fn sleep_for(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_advances_clock() {
        let start = Instant::now();
        sleep(250).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_does_not_block_other_tasks() {
        let start = Instant::now();
        let sleeper = tokio::spawn(async { sleep(1_000).await });
        let quick = tokio::spawn(async move { start.elapsed() });

        let quick_elapsed = quick.await.unwrap();
        sleeper.await.unwrap();

        assert!(quick_elapsed < Duration::from_millis(1_000));
        assert!(start.elapsed() >= Duration::from_millis(1_000));
    }
}
