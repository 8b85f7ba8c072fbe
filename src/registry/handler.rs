//! Handler contract.
//!
//! A handler receives a [`HandlerContext`] and the interaction that reached
//! it, answers through the session and reports failure with an error. The
//! router contains whatever the handler returns or panics with.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::interaction::Interaction;
use crate::payload::{InteractionResponse, MessagePayload};
use crate::permissions::{PermissionAuthority, PermissionLevel};
use crate::transport::{Session, TransportError};

pub type HandlerResult = anyhow::Result<()>;

pub type HandlerFuture = BoxFuture<'static, HandlerResult>;

/// A registered callable. Cloning shares the same function.
pub type Handler = Arc<dyn Fn(HandlerContext, Interaction) -> HandlerFuture + Send + Sync>;

/// Wrap an async function as a [`Handler`].
///
/// ```ignore
/// registry.register_command(definition, handler(ping_command))?;
/// ```
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(HandlerContext, Interaction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |ctx, interaction| Box::pin(f(ctx, interaction)))
}

/// Everything a handler may touch besides the interaction itself.
#[derive(Clone)]
pub struct HandlerContext {
    /// Transport session of the current event.
    pub session: Arc<dyn Session>,

    /// Permission authority shared by all handlers.
    pub permissions: PermissionAuthority,
}

impl HandlerContext {
    pub fn new(session: Arc<dyn Session>, permissions: PermissionAuthority) -> Self {
        Self {
            session,
            permissions,
        }
    }

    pub async fn respond(
        &self,
        interaction: &Interaction,
        response: InteractionResponse,
    ) -> Result<(), TransportError> {
        self.session.respond(interaction, &response).await
    }

    pub async fn edit_response(
        &self,
        interaction: &Interaction,
        payload: MessagePayload,
    ) -> Result<(), TransportError> {
        self.session.edit_response(interaction, &payload).await
    }

    /// Whether the invoking user holds at least `required`.
    pub async fn has_permission(&self, interaction: &Interaction, required: PermissionLevel) -> bool {
        self.permissions
            .has_permission(&*self.session, interaction.user.id, interaction.guild_id, required)
            .await
    }
}
