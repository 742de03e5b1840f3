//! Turn event wire shape: event kind + JSON payload + SSE framing.
//!
//! This crate defines the outward shape of one turn event and its SSE-style
//! framing. It does not depend on parley; parley translates its internal
//! stream events into [`TurnEvent`] and the transport layer calls
//! [`TurnEvent::sse_frame`] (or `kind()` + `payload()` for other framings).

pub mod event;
pub mod frame;

pub use event::TurnEvent;
pub use frame::sse_frame;
