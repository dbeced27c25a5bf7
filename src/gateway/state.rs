//! Shared gateway state

use std::sync::Arc;

use crate::actions::{Executor, SystemExecutor};
use crate::config::ConfigStore;

/// State handed to every handler; cheap to clone
#[derive(Clone)]
pub struct GatewayState {
    /// Reloadable configuration
    pub config: Arc<ConfigStore>,
    /// Performs the OS-level side effects
    pub executor: Arc<dyn Executor>,
}

impl GatewayState {
    pub fn new(config: Arc<ConfigStore>, executor: Arc<dyn Executor>) -> Self {
        GatewayState { config, executor }
    }

    /// State wired to real OS processes
    pub fn system(config: Arc<ConfigStore>) -> Self {
        Self::new(config, Arc::new(SystemExecutor::new()))
    }
}
