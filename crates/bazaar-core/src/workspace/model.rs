//! Workspace domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

snowflake_id!(
    /// Identifier of a workspace member (or the service actor itself).
    ActorId
);
snowflake_id!(
    /// Identifier of a workspace.
    WorkspaceId
);
snowflake_id!(
    /// Identifier of a container that groups channels.
    ContainerId
);
snowflake_id!(
    /// Identifier of a channel.
    ChannelId
);

/// A member acting on the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: ActorId,
    /// Display name, used to derive transaction channel names.
    pub display_name: String,
    /// Whether the member holds the workspace administrator capability.
    pub is_administrator: bool,
}

impl Actor {
    pub fn new(id: impl Into<ActorId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_administrator: false,
        }
    }

    pub fn administrator(id: impl Into<ActorId>, display_name: impl Into<String>) -> Self {
        Self {
            is_administrator: true,
            ..Self::new(id, display_name)
        }
    }
}

/// The parts of a workspace the capability check needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceInfo {
    pub id: WorkspaceId,
    pub owner_id: ActorId,
}

/// A container channels can be created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRef {
    pub id: ContainerId,
    pub name: String,
}

/// Handle to a channel created through the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: ChannelId,
    pub workspace: WorkspaceId,
    pub name: String,
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.name, self.id)
    }
}

/// Who an access entry applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSubject {
    /// Every member without a more specific entry.
    Everyone,
    Member(ActorId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessEntry {
    pub subject: AccessSubject,
    pub read: bool,
    pub write: bool,
}

/// Channel access control list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessList {
    pub entries: Vec<AccessEntry>,
}

impl AccessList {
    /// Access list of a transaction channel: nobody by default, read/write
    /// for the buyer and for the service actor.
    pub fn transaction(buyer: ActorId, service_actor: ActorId) -> Self {
        Self {
            entries: vec![
                AccessEntry {
                    subject: AccessSubject::Everyone,
                    read: false,
                    write: false,
                },
                AccessEntry {
                    subject: AccessSubject::Member(buyer),
                    read: true,
                    write: true,
                },
                AccessEntry {
                    subject: AccessSubject::Member(service_actor),
                    read: true,
                    write: true,
                },
            ],
        }
    }

    /// Returns the entry for `actor`, falling back to the `Everyone` entry.
    pub fn effective(&self, actor: ActorId) -> Option<&AccessEntry> {
        self.entries
            .iter()
            .find(|e| e.subject == AccessSubject::Member(actor))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.subject == AccessSubject::Everyone)
            })
    }

    pub fn can_read(&self, actor: ActorId) -> bool {
        self.effective(actor).is_some_and(|e| e.read)
    }

    pub fn can_write(&self, actor: ActorId) -> bool {
        self.effective(actor).is_some_and(|e| e.write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_access_list() {
        let acl = AccessList::transaction(ActorId(10), ActorId(99));

        assert!(acl.can_read(ActorId(10)));
        assert!(acl.can_write(ActorId(10)));
        assert!(acl.can_read(ActorId(99)));
        assert!(!acl.can_read(ActorId(11)));
        assert!(!acl.can_write(ActorId(11)));
        assert_eq!(acl.entries.len(), 3);
    }

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&ContainerId(123)).unwrap();
        assert_eq!(json, "123");
        assert_eq!(WorkspaceId(7).to_string(), "7");
    }
}
