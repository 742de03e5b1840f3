//! Conditional routing: `(state) -> key`, optionally mapped to a node id.

use std::collections::HashMap;
use std::sync::Arc;

/// Routing function for conditional edges: reads state, returns the next key.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Conditional edges out of one source node.
pub struct ConditionalRouter<S> {
    pub path: ConditionalRouterFn<S>,
    /// When present, the router's return value is looked up here; a missing
    /// key falls through to the value itself.
    pub path_map: Option<HashMap<String, String>>,
}

impl<S> ConditionalRouter<S> {
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { path, path_map }
    }

    /// Resolves the next node id (or END) for the given state.
    pub fn resolve(&self, state: &S) -> String {
        let key = (self.path)(state);
        match &self.path_map {
            Some(map) => map.get(&key).cloned().unwrap_or(key),
            None => key,
        }
    }
}

impl<S> Clone for ConditionalRouter<S> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            path_map: self.path_map.clone(),
        }
    }
}

/// Outgoing routing for one node: a fixed edge or a conditional router.
pub enum NextEntry<S> {
    Unconditional(String),
    Conditional(ConditionalRouter<S>),
}

impl<S> Clone for NextEntry<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Unconditional(to) => Self::Unconditional(to.clone()),
            Self::Conditional(router) => Self::Conditional(router.clone()),
        }
    }
}
