use std::time::Duration;

use async_trait::async_trait;
use td_core::ports::SleepPort;

/// `setTimeout`-backed sleeper.
pub struct GlooSleeper;

#[async_trait(?Send)]
impl SleepPort for GlooSleeper {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
