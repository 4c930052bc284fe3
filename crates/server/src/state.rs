use deployer_core::DeployerConfig;
use orchestrator::TaskQueue;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DeployerConfig>,
    pub queue: TaskQueue,
}

impl AppState {
    pub fn new(config: Arc<DeployerConfig>, queue: TaskQueue) -> Self {
        Self { config, queue }
    }
}
