//! In-process workspace gateway.
//!
//! Keeps channels and posts in memory. Used by the operator binary to run
//! purchases locally and by tests as a recording collaborator.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use bazaar_core::error::{BazaarError, Result};
use bazaar_core::workspace::{
    AccessList, ActorId, ChannelId, ChannelPost, ChannelRef, ContainerRef, WorkspaceGateway,
    WorkspaceId,
};

/// A channel held by [`InMemoryWorkspaceGateway`].
#[derive(Debug, Clone)]
pub struct StoredChannel {
    pub channel: ChannelRef,
    pub container: ContainerRef,
    pub access: AccessList,
    pub posts: Vec<ChannelPost>,
}

#[derive(Default)]
struct Inner {
    containers: HashMap<WorkspaceId, Vec<ContainerRef>>,
    administrators: HashMap<WorkspaceId, Vec<ActorId>>,
    channels: BTreeMap<ChannelId, StoredChannel>,
    deleted: Vec<ChannelId>,
}

pub struct InMemoryWorkspaceGateway {
    inner: Mutex<Inner>,
    next_channel_id: AtomicU64,
}

impl Default for InMemoryWorkspaceGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWorkspaceGateway {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            next_channel_id: AtomicU64::new(1),
        }
    }

    pub fn with_containers(self, workspace: WorkspaceId, containers: Vec<ContainerRef>) -> Self {
        self.lock().containers.insert(workspace, containers);
        self
    }

    pub fn with_administrators(self, workspace: WorkspaceId, administrators: Vec<ActorId>) -> Self {
        self.lock().administrators.insert(workspace, administrators);
        self
    }

    /// Removes a container, as if it was deleted on the platform.
    pub fn remove_container(&self, workspace: WorkspaceId, container: &ContainerRef) {
        if let Some(list) = self.lock().containers.get_mut(&workspace) {
            list.retain(|c| c.id != container.id);
        }
    }

    /// Channels that currently exist.
    pub fn channels(&self) -> Vec<StoredChannel> {
        self.lock().channels.values().cloned().collect()
    }

    pub fn channel(&self, id: ChannelId) -> Option<StoredChannel> {
        self.lock().channels.get(&id).cloned()
    }

    /// Channels deleted so far, in deletion order.
    pub fn deleted(&self) -> Vec<ChannelId> {
        self.lock().deleted.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Poisoning is ignored; every update is a single insert or remove.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl WorkspaceGateway for InMemoryWorkspaceGateway {
    async fn list_containers(&self, workspace: WorkspaceId) -> Result<Vec<ContainerRef>> {
        Ok(self
            .lock()
            .containers
            .get(&workspace)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_private_channel(
        &self,
        workspace: WorkspaceId,
        container: &ContainerRef,
        name: &str,
        access: &AccessList,
    ) -> Result<ChannelRef> {
        let mut inner = self.lock();
        let exists = inner
            .containers
            .get(&workspace)
            .is_some_and(|list| list.iter().any(|c| c.id == container.id));
        if !exists {
            return Err(BazaarError::category_not_found(container.id));
        }

        let channel = ChannelRef {
            id: ChannelId(self.next_channel_id.fetch_add(1, Ordering::SeqCst)),
            workspace,
            name: name.to_string(),
        };
        inner.channels.insert(
            channel.id,
            StoredChannel {
                channel: channel.clone(),
                container: container.clone(),
                access: access.clone(),
                posts: Vec::new(),
            },
        );
        Ok(channel)
    }

    async fn delete_channel(&self, channel: &ChannelRef) -> Result<()> {
        let mut inner = self.lock();
        match inner.channels.remove(&channel.id) {
            Some(_) => {
                inner.deleted.push(channel.id);
                Ok(())
            }
            None => Err(BazaarError::channel_not_found(channel)),
        }
    }

    async fn post(&self, channel: &ChannelRef, post: ChannelPost) -> Result<()> {
        let mut inner = self.lock();
        let stored = inner
            .channels
            .get_mut(&channel.id)
            .ok_or_else(|| BazaarError::channel_not_found(channel))?;
        stored.posts.push(post);
        Ok(())
    }

    async fn list_administrators(&self, workspace: WorkspaceId) -> Result<Vec<ActorId>> {
        Ok(self
            .lock()
            .administrators
            .get(&workspace)
            .cloned()
            .unwrap_or_default())
    }
}
