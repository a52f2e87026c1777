//! Client-resident session and feed synchronisation for PhotoShare.
//!
//! The crate is laid out hexagonally:
//! - [`domain`] holds the session store, route guard, media feed and the view
//!   decisions built on them, plus the gateway ports they depend on.
//! - [`outbound`] implements those ports against the remote HTTP API.
//! - [`config`] loads gateway settings through OrthoConfig.
//! - [`telemetry`] installs a tracing subscriber for embedding applications.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;
