//! Startup state machine of the client.
//!
//! The state only moves forward through the startup sequence, one step at a
//! time. [`ClientState::Stopped`] can be entered from anywhere. Reading the
//! current state never blocks.

use crate::error::{BotError, BotResult};
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Phase of the client's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientState {
    /// Built, nothing started yet.
    Constructed,
    /// Resolving and registering extensions.
    ExtensionsLoading,
    /// Building the HTTP transport and fetching the gateway.
    GatewayWarming,
    /// Overwriting the global application commands.
    CommandSyncing,
    /// Startup work finished, about to connect.
    Ready,
    /// Connected and dispatching events.
    Running,
    /// Shut down or failed.
    Stopped,
}

impl ClientState {
    /// Every state, in startup order.
    pub const ALL: [Self; 7] = [
        Self::Constructed,
        Self::ExtensionsLoading,
        Self::GatewayWarming,
        Self::CommandSyncing,
        Self::Ready,
        Self::Running,
        Self::Stopped,
    ];

    /// The step following `self` in the startup sequence.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Constructed => Some(Self::ExtensionsLoading),
            Self::ExtensionsLoading => Some(Self::GatewayWarming),
            Self::GatewayWarming => Some(Self::CommandSyncing),
            Self::CommandSyncing => Some(Self::Ready),
            Self::Ready => Some(Self::Running),
            Self::Running => Some(Self::Stopped),
            Self::Stopped => None,
        }
    }

    /// Whether moving from `self` to `to` is allowed.
    pub fn can_transition_to(self, to: Self) -> bool {
        to == Self::Stopped || self.next() == Some(to)
    }
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constructed => "constructed",
            Self::ExtensionsLoading => "extensions_loading",
            Self::GatewayWarming => "gateway_warming",
            Self::CommandSyncing => "command_syncing",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Shared, lock-free holder of the current [`ClientState`].
#[derive(Debug)]
pub struct Lifecycle {
    state: ArcSwap<ClientState>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Starts in [`ClientState::Constructed`].
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(ClientState::Constructed),
        }
    }

    /// Current state.
    pub fn state(&self) -> ClientState {
        **self.state.load()
    }

    /// Moves to `to` if allowed from the current state, returning the state
    /// it left.
    ///
    /// A rejected transition is logged and leaves the state unchanged.
    pub fn advance(&self, to: ClientState) -> BotResult<ClientState> {
        let previous = self.state.rcu(|current| {
            if current.can_transition_to(to) {
                Arc::new(to)
            } else {
                Arc::clone(current)
            }
        });

        if previous.can_transition_to(to) {
            debug!("Client state {} -> {}", previous, to);
            Ok(*previous)
        } else {
            warn!("Rejected client state transition {} -> {}", previous, to);
            Err(BotError::InvalidState {
                from: *previous,
                to,
            })
        }
    }

    /// Enters [`ClientState::Stopped`], which every state allows.
    pub fn stop(&self) {
        let previous = self.state.swap(Arc::new(ClientState::Stopped));
        debug!("Client state {} -> {}", previous, ClientState::Stopped);
    }
}
