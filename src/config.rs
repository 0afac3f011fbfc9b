use std::time::Duration;

use crate::{portfolio::GroupBy, retry::RetryPolicy};

#[derive(Clone, Debug)]
pub struct ScanConfig {
    pub retry: RetryPolicy,
    /// Pause after each wallet before querying the next one.
    pub wallet_pause: Duration,
    pub group_by: GroupBy,
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            wallet_pause: Duration::from_millis(200),
            group_by: GroupBy::Symbol,
            show_progress: true,
        }
    }
}
