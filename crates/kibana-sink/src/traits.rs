//! Dashboard sink trait definition.

use crate::error::DashboardError;
use serde_json::Value;

/// Trait for pushing visualization definitions into a dashboarding tool.
#[async_trait::async_trait]
pub trait DashboardSink: Send + Sync {
    /// Import the given saved-object definitions.
    ///
    /// Returns the number of objects successfully imported.
    async fn import_objects(&self, objects: &[Value]) -> Result<usize, DashboardError>;
}
