//! Request Adapter
//!
//! JSON boundary around the settlement engine. Not part of the
//! deterministic core: it decodes requests, maps failures to statuses and
//! logs.
//!
//! ## Module Structure
//!
//! - `config`: Environment-driven settings
//! - `protocol`: Request/response wire types
//! - `handler`: `{ bet, result }` -> status + body
//! - `stdio`: Line-delimited JSON loop over any reader/writer

pub mod config;
pub mod protocol;
pub mod handler;
pub mod stdio;

pub use config::AdapterConfig;
pub use handler::{handle_bet_request, handle_raw_request};
pub use protocol::{BetRequest, BetResponse, HandlerResponse};
pub use stdio::{serve_lines, AdapterError, ServeStats};
