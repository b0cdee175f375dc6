//! Transaction channel provisioning and lifecycle.
//!
//! ```text
//! Requested ──provision──> Provisioned ──close──> Closed
//!                            │    ▲
//!                            └────┘ approve (informational, repeatable)
//! ```

use bazaar_core::capability::{CapabilityGuard, Caller};
use bazaar_core::catalog::PurchaseItem;
use bazaar_core::error::Result;
use bazaar_core::workspace::{
    AccessList, Actor, ActorId, CartAction, ChannelPost, ChannelRef, WorkspaceGateway,
    WorkspaceId, WorkspaceInfo,
};
use std::sync::Arc;
use std::time::Duration;

use crate::settings_service::WorkspaceSettingsService;

/// Prefix of every transaction channel name.
pub const CART_CHANNEL_PREFIX: &str = "🚀";

/// Grace interval between the close announcement and the channel deletion.
pub const DEFAULT_CLOSE_GRACE: Duration = Duration::from_secs(5);

/// Administrators mentioned by a receipt alert, besides the owner.
const RECEIPT_ALERT_ADMINS: usize = 3;

/// A provisioned transaction channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub channel: ChannelRef,
    /// Counter value the channel name was derived from.
    pub sequence: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Deleted,
    /// Someone else deleted the channel first.
    AlreadyClosed,
}

/// Payment details shown to a buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInstructions {
    pub text: String,
    pub price: String,
}

/// Name of the transaction channel for a buyer's `sequence`th purchase.
pub fn cart_channel_name(display_name: &str, sequence: u64) -> String {
    format!("{}{}-{}", CART_CHANNEL_PREFIX, display_name, sequence)
}

pub struct CartProvisioner {
    settings: Arc<WorkspaceSettingsService>,
    gateway: Arc<dyn WorkspaceGateway>,
    guard: Arc<dyn CapabilityGuard>,
    service_actor: ActorId,
    close_grace: Duration,
}

impl CartProvisioner {
    pub fn new(
        settings: Arc<WorkspaceSettingsService>,
        gateway: Arc<dyn WorkspaceGateway>,
        guard: Arc<dyn CapabilityGuard>,
        service_actor: ActorId,
    ) -> Self {
        Self {
            settings,
            gateway,
            guard,
            service_actor,
            close_grace: DEFAULT_CLOSE_GRACE,
        }
    }

    pub fn with_close_grace(mut self, grace: Duration) -> Self {
        self.close_grace = grace;
        self
    }

    /// Creates a private transaction channel for `buyer` purchasing `item`.
    ///
    /// The container is resolved before the counter is touched, so a missing
    /// container (`CategoryUnset` / `CategoryNotFound`) leaves the counter
    /// unchanged.
    pub async fn provision(
        &self,
        buyer: &Actor,
        workspace: WorkspaceId,
        item: &PurchaseItem,
    ) -> Result<Cart> {
        let container = self.settings.resolve_container(workspace).await?;
        let sequence = self.settings.next_sequence(workspace).await?;

        let name = cart_channel_name(&buyer.display_name, sequence);
        let access = AccessList::transaction(buyer.id, self.service_actor);
        let channel = self
            .gateway
            .create_private_channel(workspace, &container, &name, &access)
            .await?;

        self.gateway
            .post(
                &channel,
                ChannelPost::PurchaseSummary {
                    buyer: buyer.id,
                    item: item.clone(),
                    actions: CartAction::ALL.to_vec(),
                },
            )
            .await?;

        tracing::info!(
            buyer = %buyer.id,
            workspace = %workspace,
            channel = %channel,
            sequence,
            "[CartProvisioner] Cart opened for '{}'",
            item.title
        );
        Ok(Cart { channel, sequence })
    }

    /// Posts a payment confirmation. Changes nothing else; repeatable.
    pub async fn approve(&self, caller: &Caller, channel: &ChannelRef, buyer: ActorId) -> Result<()> {
        self.authorize(caller, CartAction::Approve)?;

        self.gateway
            .post(channel, ChannelPost::PaymentApproved { buyer })
            .await?;
        tracing::info!(actor = %caller.actor.id, channel = %channel, "[CartProvisioner] Payment approved");
        Ok(())
    }

    /// Announces the close, waits the grace interval, then deletes the channel.
    ///
    /// A channel that is already gone counts as closed.
    pub async fn close(&self, caller: &Caller, channel: &ChannelRef) -> Result<CloseOutcome> {
        self.authorize(caller, CartAction::Close)?;

        let announce = ChannelPost::Closing {
            grace_secs: self.close_grace.as_secs(),
        };
        match self.gateway.post(channel, announce).await {
            Ok(()) => {}
            Err(e) if e.is_channel_not_found() => return Ok(self.already_closed(channel)),
            Err(e) => return Err(e),
        }

        tokio::time::sleep(self.close_grace).await;

        match self.gateway.delete_channel(channel).await {
            Ok(()) => {
                tracing::info!(actor = %caller.actor.id, channel = %channel, "[CartProvisioner] Cart closed");
                Ok(CloseOutcome::Deleted)
            }
            Err(e) if e.is_channel_not_found() => Ok(self.already_closed(channel)),
            Err(e) => Err(e),
        }
    }

    /// Payment text plus the price of `item`. Visible to anyone in the channel.
    pub async fn payment_info(&self, item: &PurchaseItem) -> PaymentInstructions {
        PaymentInstructions {
            text: self.settings.payment_info().await,
            price: item.price.clone(),
        }
    }

    /// Alerts the owner and administrators that a buyer posted a receipt.
    ///
    /// Only messages with attachments, posted by someone other than the
    /// service actor in a transaction channel, raise an alert.
    ///
    /// # Returns
    ///
    /// `true` if an alert was posted.
    pub async fn notify_receipt(
        &self,
        workspace: &WorkspaceInfo,
        channel: &ChannelRef,
        sender: ActorId,
        attachment_count: usize,
    ) -> Result<bool> {
        if attachment_count == 0
            || sender == self.service_actor
            || !channel.name.starts_with(CART_CHANNEL_PREFIX)
        {
            return Ok(false);
        }

        let mut mentions = vec![workspace.owner_id];
        let administrators = self.gateway.list_administrators(workspace.id).await?;
        mentions.extend(
            administrators
                .into_iter()
                .filter(|id| *id != workspace.owner_id && *id != self.service_actor)
                .take(RECEIPT_ALERT_ADMINS),
        );

        self.gateway
            .post(channel, ChannelPost::ReceiptAlert { sender, mentions })
            .await?;
        tracing::debug!(sender = %sender, channel = %channel, "[CartProvisioner] Receipt alert posted");
        Ok(true)
    }

    fn authorize(&self, caller: &Caller, action: CartAction) -> Result<()> {
        if action.requires_capability() {
            self.guard.require(caller, action.verb())?;
        }
        Ok(())
    }

    fn already_closed(&self, channel: &ChannelRef) -> CloseOutcome {
        tracing::debug!(channel = %channel, "[CartProvisioner] Channel already deleted");
        CloseOutcome::AlreadyClosed
    }
}
