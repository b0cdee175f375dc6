//! Workspace identities and the external workspace collaborator contract.
//!
//! The storefront never talks to the chat platform directly. Everything it
//! needs (containers, private channels, posting into them) goes through
//! [`WorkspaceGateway`].

mod gateway;
mod model;

pub use gateway::{CartAction, ChannelPost, WorkspaceGateway};
pub use model::{
    AccessEntry, AccessList, AccessSubject, Actor, ActorId, ChannelId, ChannelRef, ContainerId,
    ContainerRef, WorkspaceId, WorkspaceInfo,
};
