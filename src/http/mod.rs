//! HTTP API
//!
//! - GET/POST /generate-questions - Question generation glue
//! - POST /sessions - Create a voice session (generate or interview mode)
//! - POST /sessions/:id/call - Place the call
//! - POST /sessions/:id/disconnect - Hang up and dispatch
//! - GET /sessions/:id - Session snapshot
//! - GET /sessions/:id/transcript - Transcript so far
//! - DELETE /sessions/:id - Drop a session
//! - GET /interviews/:id, GET /feedback/:id - Stored documents
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{CreateSessionRequest, CreateSessionResponse, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
