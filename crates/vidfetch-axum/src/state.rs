//! Shared application state type.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// An Arc-wrapped `AxumContext` holding the download service and the
/// storage layout used by the file server.
pub type AppState = Arc<AxumContext>;
