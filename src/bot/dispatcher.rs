//! Interaction router.
//!
//! Classifies an inbound interaction, looks up its handler in the
//! [`Registry`] and runs it. Whatever the handler does, the router returns
//! normally: errors and panics are contained here and turned into a
//! [`RouteOutcome`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, warn};

use crate::interaction::{Interaction, InteractionKind};
use crate::payload::{Embed, InteractionResponse, MessagePayload};
use crate::permissions::PermissionAuthority;
use crate::registry::{Handler, HandlerContext, Registry};
use crate::transport::Session;

/// What happened to a routed interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The handler ran and returned `Ok`.
    Handled,
    /// No handler is registered for the routing key.
    Unknown,
    /// The handler returned an error or panicked.
    Failed,
    /// The interaction kind is not routed (ping, autocomplete, ...).
    Ignored,
}

/// Routes interactions to registered handlers.
///
/// Cheap to clone; holds no per-event state, so concurrent calls to
/// [`Router::route`] never observe each other.
#[derive(Clone)]
pub struct Router {
    registry: Arc<Registry>,
    permissions: PermissionAuthority,
}

impl Router {
    pub fn new(registry: Arc<Registry>, permissions: PermissionAuthority) -> Self {
        Self {
            registry,
            permissions,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatch `interaction` to its handler.
    #[tracing::instrument(
        skip_all,
        fields(
            interaction = %interaction.id,
            kind = interaction.kind.name(),
            user = %interaction.user.id,
        )
    )]
    pub async fn route(&self, session: Arc<dyn Session>, interaction: Interaction) -> RouteOutcome {
        let (key, handler) = match &interaction.kind {
            InteractionKind::Command(data) => (&data.name, self.registry.lookup_command(&data.name)),
            InteractionKind::Component(data) => {
                (&data.custom_id, self.registry.lookup_component(&data.custom_id))
            }
            InteractionKind::ModalSubmit(data) => {
                (&data.custom_id, self.registry.lookup_modal(&data.custom_id))
            }
            InteractionKind::Other(code) => {
                debug!("Ignoring interaction of type {}", code);
                return RouteOutcome::Ignored;
            }
        };

        let Some(handler) = handler.cloned() else {
            warn!("No {} handler registered for '{}'", interaction.kind.name(), key);
            return RouteOutcome::Unknown;
        };
        let key = key.clone();

        let ctx = HandlerContext::new(session.clone(), self.permissions.clone());
        match invoke(handler, ctx, interaction.clone()).await {
            Ok(()) => {
                debug!("Handled {} '{}'", interaction.kind.name(), key);
                RouteOutcome::Handled
            }
            Err(reason) => {
                error!("Handler for {} '{}' failed: {}", interaction.kind.name(), key, reason);
                acknowledge_failure(&*session, &interaction).await;
                RouteOutcome::Failed
            }
        }
    }
}

/// Run a handler, turning both `Err` and panics into a message.
async fn invoke(handler: Handler, ctx: HandlerContext, interaction: Interaction) -> Result<(), String> {
    // The call itself sits inside the future so a panic before the first
    // poll is caught as well.
    let run = async move { handler(ctx, interaction).await };

    match AssertUnwindSafe(run).catch_unwind().await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(format!("{:#}", e)),
        Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

/// Best effort. If the handler already answered (a deferral, usually),
/// Discord rejects a second initial response, so the same error is written
/// into the original response instead.
async fn acknowledge_failure(session: &dyn Session, interaction: &Interaction) {
    let payload = MessagePayload::new()
        .embed(Embed::error(
            "Something went wrong",
            "This interaction failed. Please try again later.",
        ))
        .ephemeral();

    let response = InteractionResponse::Message(payload.clone());
    let Err(e) = session.respond(interaction, &response).await else {
        return;
    };
    debug!("Initial failure response for {} rejected: {}", interaction.id, e);

    if let Err(e) = session.edit_response(interaction, &payload).await {
        debug!("Could not acknowledge failed interaction {}: {}", interaction.id, e);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use anyhow::bail;
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    use super::*;
    use crate::interaction::InteractionId;
    use crate::registry::{handler, CommandDefinition, HandlerFuture};
    use crate::transport::mock::MockSession;

    fn interaction(kind: u8, id: &str, data: Value) -> Interaction {
        Interaction::from_value(json!({
            "id": id,
            "token": format!("token-{}", id),
            "type": kind,
            "guild_id": "10",
            "member": { "user": { "id": "7", "username": "alice" } },
            "data": data,
        }))
        .unwrap()
    }

    fn command(id: &str, name: &str) -> Interaction {
        interaction(2, id, json!({ "name": name }))
    }

    fn button(id: &str, custom_id: &str) -> Interaction {
        interaction(3, id, json!({ "custom_id": custom_id, "component_type": 2 }))
    }

    fn router(registry: Registry) -> Router {
        Router::new(Arc::new(registry), PermissionAuthority::default())
    }

    #[tokio::test]
    async fn test_command_invokes_handler_once_with_payload() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let mut registry = Registry::new();
        let (c, s) = (calls.clone(), seen.clone());
        registry
            .register_command(
                CommandDefinition::new("ping", "Pong"),
                handler(move |_, interaction| {
                    let (c, s) = (c.clone(), s.clone());
                    async move {
                        c.fetch_add(1, Ordering::SeqCst);
                        *s.lock() = Some(interaction);
                        Ok(())
                    }
                }),
            )
            .unwrap();

        let event = command("1", "ping");
        let session = Arc::new(MockSession::new());
        let outcome = router(registry).route(session.clone(), event.clone()).await;

        assert_eq!(outcome, RouteOutcome::Handled);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().as_ref(), Some(&event));
        assert!(session.responses().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_component_is_reported_without_response() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new();
        let c = calls.clone();
        registry
            .register_component(
                "ping_reload",
                handler(move |_, _| {
                    c.fetch_add(1, Ordering::SeqCst);
                    async { Ok(()) }
                }),
            )
            .unwrap();

        let session = Arc::new(MockSession::new());
        let outcome = router(registry)
            .route(session.clone(), button("2", "unknown_button"))
            .await;

        assert_eq!(outcome, RouteOutcome::Unknown);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(session.responses().is_empty());
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_affect_concurrent_one() {
        let mut registry = Registry::new();
        registry
            .register_command(
                CommandDefinition::new("slow", "ok"),
                handler(|ctx, interaction| async move {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    ctx.respond(&interaction, InteractionResponse::Message(MessagePayload::new().content("done")))
                        .await?;
                    Ok(())
                }),
            )
            .unwrap();
        registry
            .register_command(
                CommandDefinition::new("broken", "fails"),
                handler(|_, _| async { bail!("database unavailable") }),
            )
            .unwrap();

        let router = router(registry);
        let session = Arc::new(MockSession::new());
        let (slow, broken) = tokio::join!(
            router.route(session.clone(), command("10", "slow")),
            router.route(session.clone(), command("11", "broken")),
        );

        assert_eq!(slow, RouteOutcome::Handled);
        assert_eq!(broken, RouteOutcome::Failed);

        let responses = session.responses();
        assert_eq!(responses.len(), 2);

        let done = responses.iter().find(|(id, _)| *id == InteractionId::new(10)).unwrap();
        assert_eq!(done.1.payload().unwrap().get_content(), Some("done"));

        let ack = responses.iter().find(|(id, _)| *id == InteractionId::new(11)).unwrap();
        assert!(ack.1.payload().unwrap().is_ephemeral());
    }

    #[tokio::test]
    async fn test_panicking_handler_is_contained() {
        let mut registry = Registry::new();
        registry
            .register_command(
                CommandDefinition::new("explode", "boom"),
                handler(|_, _| async { panic!("handler exploded") }),
            )
            .unwrap();
        let eager: Handler = Arc::new(|_: HandlerContext, _: Interaction| -> HandlerFuture {
            panic!("before any future")
        });
        registry
            .register_command(CommandDefinition::new("eager", "panics when called"), eager)
            .unwrap();

        let router = router(registry);
        let session = Arc::new(MockSession::new());

        assert_eq!(router.route(session.clone(), command("1", "explode")).await, RouteOutcome::Failed);
        assert_eq!(router.route(session.clone(), command("2", "eager")).await, RouteOutcome::Failed);
        assert_eq!(session.responses().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_acknowledgement_is_swallowed() {
        let mut registry = Registry::new();
        registry
            .register_command(
                CommandDefinition::new("broken", "fails"),
                handler(|_, _| async { bail!("nope") }),
            )
            .unwrap();

        let session = Arc::new(MockSession::new().failing_responses());
        let outcome = router(registry).route(session.clone(), command("1", "broken")).await;

        assert_eq!(outcome, RouteOutcome::Failed);
        assert!(session.responses().is_empty());
        assert!(session.edits().is_empty());
    }

    #[tokio::test]
    async fn test_failure_after_deferral_edits_original_response() {
        let mut registry = Registry::new();
        registry
            .register_command(
                CommandDefinition::new("slowfail", "defers then fails"),
                handler(|ctx, interaction| async move {
                    ctx.respond(&interaction, InteractionResponse::DeferredMessage).await?;
                    bail!("upstream timed out")
                }),
            )
            .unwrap();

        let session = Arc::new(MockSession::new());
        let outcome = router(registry).route(session.clone(), command("5", "slowfail")).await;

        assert_eq!(outcome, RouteOutcome::Failed);

        let responses = session.responses();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].1, InteractionResponse::DeferredMessage);

        let edits = session.edits();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].0, InteractionId::new(5));
        let embed = &edits[0].1.get_embeds()[0];
        assert_eq!(embed.get_title(), Some("❌ Something went wrong"));
    }

    #[tokio::test]
    async fn test_unknown_command_is_reported_without_response() {
        let mut registry = Registry::new();
        registry
            .register_command(CommandDefinition::new("ping", "Pong"), handler(|_, _| async { Ok(()) }))
            .unwrap();

        let session = Arc::new(MockSession::new());
        let outcome = router(registry).route(session.clone(), command("6", "pong")).await;

        assert_eq!(outcome, RouteOutcome::Unknown);
        assert!(session.responses().is_empty());
        assert!(session.edits().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_modal_is_reported_without_response() {
        let mut registry = Registry::new();
        registry
            .register_modal("example_modal", handler(|_, _| async { bail!("wrong modal") }))
            .unwrap();
        // Same key in another namespace must not match.
        registry
            .register_component("feedback_modal", handler(|_, _| async { bail!("wrong namespace") }))
            .unwrap();

        let event = interaction(5, "7", json!({ "custom_id": "feedback_modal", "components": [] }));
        let session = Arc::new(MockSession::new());
        let outcome = router(registry).route(session.clone(), event).await;

        assert_eq!(outcome, RouteOutcome::Unknown);
        assert!(session.responses().is_empty());
        assert!(session.edits().is_empty());
    }

    #[tokio::test]
    async fn test_modal_submit_routes_to_modal_namespace() {
        let submitted = Arc::new(Mutex::new(None));
        let mut registry = Registry::new();
        registry
            .register_component("example_modal", handler(|_, _| async { bail!("wrong namespace") }))
            .unwrap();
        let s = submitted.clone();
        registry
            .register_modal(
                "example_modal",
                handler(move |_, interaction| {
                    let s = s.clone();
                    async move {
                        let modal = interaction.modal().unwrap();
                        *s.lock() = modal.value("modal_title").map(str::to_string);
                        Ok(())
                    }
                }),
            )
            .unwrap();

        let event = interaction(
            5,
            "3",
            json!({
                "custom_id": "example_modal",
                "components": [
                    { "type": 1, "components": [{ "type": 4, "custom_id": "modal_title", "value": "Hello" }] }
                ]
            }),
        );

        let outcome = router(registry).route(Arc::new(MockSession::new()), event).await;
        assert_eq!(outcome, RouteOutcome::Handled);
        assert_eq!(submitted.lock().as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn test_other_kinds_are_ignored() {
        let mut registry = Registry::new();
        registry
            .register_command(CommandDefinition::new("ping", "Pong"), handler(|_, _| async { Ok(()) }))
            .unwrap();

        let autocomplete = interaction(4, "4", json!({ "name": "ping" }));
        let session = Arc::new(MockSession::new());
        let outcome = router(registry).route(session.clone(), autocomplete).await;

        assert_eq!(outcome, RouteOutcome::Ignored);
        assert!(session.responses().is_empty());
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
