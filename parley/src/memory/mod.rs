//! Per-thread checkpointing for multi-turn conversations.
//!
//! A [`Checkpointer`] saves the final graph state after a run keyed by
//! `thread_id`, and a later turn with the same id resumes from it.
//! [`MemorySaver`] is the in-process implementation; state lives only for
//! the lifetime of the process.

mod checkpointer;
mod config;
mod memory_saver;

pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::MemorySaver;
