//! API layer - HTTP endpoints for UI surfaces

pub mod explain;
pub mod health;
pub mod messages;
pub mod router;
pub mod state;
pub mod types;

pub use messages::{dispatch, ExtensionRequest, ExtensionResponse};
pub use router::create_router;
pub use state::AppState;
