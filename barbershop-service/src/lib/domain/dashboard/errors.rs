use thiserror::Error;

/// Error for dashboard queries
#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
