//! Registry of resource handlers for one account.
//!
//! The [`HandlerRegistry`] maps resource kinds to the handler responsible for
//! building their caching agents. Iteration follows registration order, which
//! is the order the dispatcher invokes handlers within a shard.

use indexmap::IndexMap;

use crate::domain::ports::ResourceHandler;

/// Ordered mapping from resource kind to handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: IndexMap<String, Box<dyn ResourceHandler>>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its kind.
    ///
    /// Re-registering a kind replaces the previous handler but keeps its
    /// original position. The replaced handler is returned.
    pub fn register(
        &mut self,
        handler: Box<dyn ResourceHandler>,
    ) -> Option<Box<dyn ResourceHandler>> {
        let kind = handler.kind().to_string();
        self.handlers.insert(kind, handler)
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_handler(mut self, handler: impl ResourceHandler + 'static) -> Self {
        self.register(Box::new(handler));
        self
    }

    /// Look up a handler by kind.
    pub fn get(&self, kind: &str) -> Option<&dyn ResourceHandler> {
        self.handlers.get(kind).map(|h| h.as_ref())
    }

    /// Registered kinds, in registration order.
    pub fn kinds(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Handlers, in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &dyn ResourceHandler> {
        self.handlers.values().map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
