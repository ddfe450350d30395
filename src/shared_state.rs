use std::sync::Arc;

use crate::services::yield_estimator::YieldEstimator;

/// Handler state. The estimator holds only read-only collaborators, so
/// concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<YieldEstimator>,
}

impl AppState {
    pub fn new(estimator: YieldEstimator) -> Self {
        Self { estimator: Arc::new(estimator) }
    }
}
