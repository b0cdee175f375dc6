//! Workspace collaborator trait.

use async_trait::async_trait;

use super::model::{AccessList, ActorId, ChannelRef, ContainerRef, WorkspaceId};
use crate::catalog::PurchaseItem;
use crate::error::Result;

/// Actions offered on the purchase summary of a transaction channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    /// Shows the payment instructions. Available to anyone in the channel.
    PaymentInfo,
    /// Posts a payment confirmation. Owner or administrator only.
    Approve,
    /// Deletes the channel after the grace interval. Owner or administrator only.
    Close,
}

impl CartAction {
    /// The action surface of every transaction channel, in display order.
    pub const ALL: [CartAction; 3] = [CartAction::PaymentInfo, CartAction::Approve, CartAction::Close];

    /// Whether invoking the action requires the owner-or-administrator capability.
    pub fn requires_capability(self) -> bool {
        !matches!(self, CartAction::PaymentInfo)
    }

    /// Verb used in `Unauthorized` errors.
    pub fn verb(self) -> &'static str {
        match self {
            CartAction::PaymentInfo => "show payment info",
            CartAction::Approve => "approve payment",
            CartAction::Close => "close cart",
        }
    }
}

/// Structured content posted into a channel. Rendering is up to the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelPost {
    PurchaseSummary {
        buyer: ActorId,
        item: PurchaseItem,
        actions: Vec<CartAction>,
    },
    PaymentApproved {
        buyer: ActorId,
    },
    Closing {
        grace_secs: u64,
    },
    ReceiptAlert {
        sender: ActorId,
        mentions: Vec<ActorId>,
    },
}

/// External collaborator that owns channels and containers.
///
/// Implementations wrap the chat platform. `delete_channel` must fail with
/// `BazaarError::ChannelNotFound` when the channel is already gone.
#[async_trait]
pub trait WorkspaceGateway: Send + Sync {
    /// Lists the containers of a workspace, in platform order.
    async fn list_containers(&self, workspace: WorkspaceId) -> Result<Vec<ContainerRef>>;

    /// Creates a channel under `container` with the given access list.
    async fn create_private_channel(
        &self,
        workspace: WorkspaceId,
        container: &ContainerRef,
        name: &str,
        access: &AccessList,
    ) -> Result<ChannelRef>;

    /// Deletes a channel.
    async fn delete_channel(&self, channel: &ChannelRef) -> Result<()>;

    /// Posts structured content into a channel.
    async fn post(&self, channel: &ChannelRef, post: ChannelPost) -> Result<()>;

    /// Lists members holding the administrator capability, excluding bots.
    async fn list_administrators(&self, workspace: WorkspaceId) -> Result<Vec<ActorId>>;
}
