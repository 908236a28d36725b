//! HTTP API for the task board
//!
//! | Method | Path             | Success                    |
//! |--------|------------------|----------------------------|
//! | GET    | /health          | `{status, timestamp}`      |
//! | GET    | /api/cards       | `{columns, cards}`         |
//! | GET    | /api/cards/:id   | card                       |
//! | POST   | /api/cards       | 201 + created card         |
//! | PATCH  | /api/cards/:id   | updated card               |
//! | DELETE | /api/cards/:id   | `{ok: true, deleted}`      |
//! | PUT    | /api/cards       | `{ok: true}` (bulk replace)|
//!
//! Errors carry a JSON body `{error, kind}` with 400 for validation, 404 for
//! unknown ids and 500 when the board document cannot be read or written.

mod error;
mod routes;
mod server;

pub use error::{ApiError, ErrorBody};
pub use routes::{router, AppState, DeleteResponse, HealthResponse, OkResponse, HTTP_ACTOR};
pub use server::{start_server, ServerConfig, ServerError, ServerHandle, DEFAULT_PORT};
