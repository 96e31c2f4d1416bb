//! First-match-wins alternation.
//!
//! # Design Decisions
//! - Strictly sequential: later entries never run once one has handled
//! - Each entry is tried at most once per request
//! - Faults stop the scan immediately; they are not treated as a miss

use async_trait::async_trait;

use crate::handler::{BoxHandler, Handler, Outcome, Result};
use crate::http::RequestContext;

/// Ordered list of alternatives.
#[derive(Default)]
pub struct Choose {
    handlers: Vec<BoxHandler>,
}

impl Choose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alternative, tried after every previously added one.
    pub fn or<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Try each handler in order until one returns `Handled`.
pub fn choose<I>(handlers: I) -> Choose
where
    I: IntoIterator<Item = BoxHandler>,
{
    Choose {
        handlers: handlers.into_iter().collect(),
    }
}

impl FromIterator<BoxHandler> for Choose {
    fn from_iter<I: IntoIterator<Item = BoxHandler>>(iter: I) -> Self {
        choose(iter)
    }
}

#[async_trait]
impl Handler for Choose {
    async fn call(&self, ctx: &mut RequestContext) -> Result<Outcome> {
        for (index, handler) in self.handlers.iter().enumerate() {
            if handler.call(ctx).await?.is_handled() {
                tracing::trace!(alternative = index, "choose matched");
                return Ok(Outcome::Handled);
            }
        }
        Ok(Outcome::NotHandled)
    }
}

impl std::fmt::Debug for Choose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Choose")
            .field("alternatives", &self.handlers.len())
            .finish()
    }
}
