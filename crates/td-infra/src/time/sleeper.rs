use std::time::Duration;

use async_trait::async_trait;
use td_core::ports::SleepPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait(?Send)]
impl SleepPort for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sleeps_for_the_requested_duration() {
        let start = tokio::time::Instant::now();

        TokioSleeper.sleep(Duration::from_secs(60)).await;

        assert!(start.elapsed() >= Duration::from_secs(60));
    }
}
