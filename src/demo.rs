//! The sample application served by the `trellis` binary.

use crate::handler::{choose, from_context, HandlerExt, PartialHandlerExt, SharedHandler};
use crate::http::{text, RequestContext, Text};
use crate::routing::{get, route};
use crate::security::{basic_auth_with, Verifier};

/// `GET` then one of `/`, `/test` or the Basic-protected `/protected`.
pub fn sample_tree<V: Verifier + 'static>(users: V) -> SharedHandler {
    get()
        .then(choose([
            route("/").then(text("Hello World!")).boxed(),
            route("/test").then(text("Test OK!")).boxed(),
            route("/protected")
                .and(basic_auth_with(users))
                .then(from_context(greeting))
                .boxed(),
        ]))
        .shared()
}

fn greeting(ctx: &RequestContext) -> Text {
    let name = ctx.user().map(|p| p.name()).unwrap_or_default();
    text(format!("Super Secret!\nWelcome Agent {name}!"))
}
