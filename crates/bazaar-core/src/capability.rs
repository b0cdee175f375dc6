//! Capability check for mutating storefront operations.
//!
//! Every mutating entry point calls [`CapabilityGuard::require`] first, with
//! the actor that triggered *that* step. UI round-trips may be actioned by a
//! different member than the one who opened the dialogue.

use crate::error::{BazaarError, Result};
use crate::workspace::{Actor, WorkspaceInfo};

/// An actor together with the workspace it acts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub actor: Actor,
    pub workspace: WorkspaceInfo,
}

impl Caller {
    pub fn new(actor: Actor, workspace: WorkspaceInfo) -> Self {
        Self { actor, workspace }
    }
}

/// Side-effect-free authorization predicate.
pub trait CapabilityGuard: Send + Sync {
    /// Returns true if `actor` may manage the storefront of `workspace`.
    fn authorized(&self, actor: &Actor, workspace: &WorkspaceInfo) -> bool;

    /// Fails with `Unauthorized` unless the caller is authorized.
    fn require(&self, caller: &Caller, action: &str) -> Result<()> {
        if self.authorized(&caller.actor, &caller.workspace) {
            Ok(())
        } else {
            Err(BazaarError::unauthorized(action))
        }
    }
}

/// Authorizes the workspace owner and members with the administrator capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOrAdministrator;

impl CapabilityGuard for OwnerOrAdministrator {
    fn authorized(&self, actor: &Actor, workspace: &WorkspaceInfo) -> bool {
        actor.id == workspace.owner_id || actor.is_administrator
    }
}
