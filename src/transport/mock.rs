//! In-memory transport for tests.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{GuildInfo, MemberInfo, MemberLookup, Session, TransportError};
use crate::interaction::{GuildId, Interaction, InteractionId, UserId};
use crate::payload::{InteractionResponse, MessagePayload};

/// Records every response and serves scripted guild data.
///
/// Like Discord, a second initial response to the same interaction fails.
#[derive(Default)]
pub struct MockSession {
    guilds: HashMap<GuildId, GuildInfo>,
    members: HashMap<(GuildId, UserId), MemberInfo>,
    fail_lookups: AtomicBool,
    fail_responses: AtomicBool,
    lookups: AtomicUsize,
    responses: Mutex<Vec<(InteractionId, InteractionResponse)>>,
    edits: Mutex<Vec<(InteractionId, MessagePayload)>>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guild(mut self, guild: GuildInfo) -> Self {
        self.guilds.insert(guild.id, guild);
        self
    }

    pub fn with_member(mut self, guild: GuildId, member: MemberInfo) -> Self {
        self.members.insert((guild, member.user_id), member);
        self
    }

    /// Make every membership and guild lookup fail.
    pub fn failing_lookups(self) -> Self {
        self.fail_lookups.store(true, Ordering::SeqCst);
        self
    }

    /// Make every respond/edit call fail.
    pub fn failing_responses(self) -> Self {
        self.fail_responses.store(true, Ordering::SeqCst);
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn responses(&self) -> Vec<(InteractionId, InteractionResponse)> {
        self.responses.lock().clone()
    }

    pub fn edits(&self) -> Vec<(InteractionId, MessagePayload)> {
        self.edits.lock().clone()
    }

    fn check_lookup(&self) -> Result<(), TransportError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(TransportError::backend(io::Error::new(
                io::ErrorKind::TimedOut,
                "simulated transport failure",
            )));
        }
        Ok(())
    }

    fn check_response(&self) -> Result<(), TransportError> {
        if self.fail_responses.load(Ordering::SeqCst) {
            return Err(TransportError::backend(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "simulated response failure",
            )));
        }
        Ok(())
    }
}

fn not_found(what: String) -> TransportError {
    TransportError::backend(io::Error::new(io::ErrorKind::NotFound, what))
}

#[async_trait]
impl MemberLookup for MockSession {
    async fn guild_member(&self, guild: GuildId, user: UserId) -> Result<MemberInfo, TransportError> {
        self.check_lookup()?;
        self.members
            .get(&(guild, user))
            .cloned()
            .ok_or_else(|| not_found(format!("Unknown Member {} in {}", user, guild)))
    }

    async fn guild(&self, guild: GuildId) -> Result<GuildInfo, TransportError> {
        self.check_lookup()?;
        self.guilds
            .get(&guild)
            .cloned()
            .ok_or_else(|| not_found(format!("Unknown Guild {}", guild)))
    }
}

#[async_trait]
impl Session for MockSession {
    async fn respond(
        &self,
        interaction: &Interaction,
        response: &InteractionResponse,
    ) -> Result<(), TransportError> {
        self.check_response()?;
        let mut responses = self.responses.lock();
        if responses.iter().any(|(id, _)| *id == interaction.id) {
            return Err(TransportError::backend(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "Interaction has already been acknowledged",
            )));
        }
        responses.push((interaction.id, response.clone()));
        Ok(())
    }

    async fn edit_response(
        &self,
        interaction: &Interaction,
        payload: &MessagePayload,
    ) -> Result<(), TransportError> {
        self.check_response()?;
        self.edits.lock().push((interaction.id, payload.clone()));
        Ok(())
    }
}
