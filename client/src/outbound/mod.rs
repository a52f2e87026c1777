//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: the PhotoShare REST API over reqwest, with a shared cookie jar
//!   so the session credential rides along on every call.
//!
//! Adapters are thin translators between domain types and wire shapes. They
//! contain no business logic.

pub mod http;
