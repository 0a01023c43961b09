//! A server-side proxy for the Gemini `generateContent` API.
//!
//! Callers post `{"prompt": "..."}` to `/generate`; the proxy attaches the
//! API key held by the server, makes exactly one upstream call and relays
//! the result, or a `{"error": "..."}` body, back to the caller.
pub mod app;
pub mod app_state;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod endpoints;
pub mod error;
pub mod types;
pub mod utils;
