//! Application configuration

use serde::{Deserialize, Serialize};

/// Static configuration handed to [`AppCore`](crate::AppCore) at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment name shown in diagnostics
    pub deployment_name: String,
    /// Maximum workouts fetched per refresh
    pub workout_page_size: usize,
    /// Maximum messages fetched per thread refresh
    pub message_page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deployment_name: "laneline".to_string(),
            workout_page_size: 50,
            message_page_size: 100,
        }
    }
}
