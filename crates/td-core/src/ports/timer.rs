use std::time::Duration;

use async_trait::async_trait;

#[async_trait(?Send)]
pub trait SleepPort {
    async fn sleep(&self, duration: Duration);
}
