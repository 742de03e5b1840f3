//! State graph: nodes + explicit edges, compile and invoke or stream.
//!
//! Build with `add_node` / `add_edge(from, to)` using `START` and `END` for
//! entry/exit, route with `add_conditional_edges`, then `compile()` (or
//! `compile_with_checkpointer`) to get a `CompiledStateGraph`.

mod compile_error;
mod compiled;
mod conditional;
mod next;
mod node;
mod run_context;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use next::Next;
pub use node::Node;
pub use run_context::RunContext;
pub use state_graph::{StateGraph, END, START};
