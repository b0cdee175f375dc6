//! Multi-step bundle authoring.
//!
//! A bundle is built across several independent UI round-trips:
//!
//! ```text
//! start_draft ──> add_option (0..n) ──> finalize
//!      │                 │
//!      └──── cancel / TTL sweep ────┘
//! ```
//!
//! The draft lives in the [`SessionRegistry`] under the initiating actor's
//! key until it is finalized into the catalog. Each step checks the
//! capability of the actor performing *that* step.

use bazaar_core::capability::{CapabilityGuard, Caller};
use bazaar_core::catalog::{
    AuthoringSession, Bundle, CatalogRepository, OptionFields, PanelFields, SessionKey,
};
use bazaar_core::error::{BazaarError, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use crate::session::SessionRegistry;

/// Idle time after which an authoring session is reclaimed by [`BundleBuilder::sweep_expired`].
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(900);

pub struct BundleBuilder {
    sessions: Arc<SessionRegistry>,
    catalog: Arc<dyn CatalogRepository>,
    guard: Arc<dyn CapabilityGuard>,
    session_ttl: Duration,
}

impl BundleBuilder {
    pub fn new(catalog: Arc<dyn CatalogRepository>, guard: Arc<dyn CapabilityGuard>) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::new()),
            catalog,
            guard,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    /// Starts (or restarts) the caller's draft with the given panel fields.
    ///
    /// A draft the caller already had is replaced and its options are lost.
    pub async fn start_draft(&self, caller: &Caller, panel: PanelFields) -> Result<SessionKey> {
        self.guard.require(caller, "create bundle")?;

        let key = SessionKey(caller.actor.id);
        let session = AuthoringSession::new(key, caller.workspace.id, panel, Utc::now());
        if let Some(previous) = self.sessions.start(session).await {
            tracing::warn!(
                actor = %key,
                discarded_options = previous.option_count(),
                "[BundleBuilder] Replaced an unfinished draft"
            );
        } else {
            tracing::info!(actor = %key, "[BundleBuilder] Draft started");
        }
        Ok(key)
    }

    /// Appends an option to the draft of `key`.
    ///
    /// # Returns
    ///
    /// The new option count.
    pub async fn add_option(
        &self,
        caller: &Caller,
        key: &SessionKey,
        option: OptionFields,
    ) -> Result<usize> {
        self.guard.require(caller, "add bundle option")?;

        let count = self.sessions.push_option(key, option, Utc::now()).await?;
        tracing::debug!(actor = %key, options = count, "[BundleBuilder] Option added");
        Ok(count)
    }

    /// Commits the draft of `key` as a new bundle and ends the session.
    ///
    /// Fails with `EmptyBundle` (session kept) when the draft has no options
    /// and with `SessionNotFound` when there is no session, including a
    /// second finalize of the same draft. If the catalog write fails the
    /// session is put back so the author can retry.
    ///
    /// # Returns
    ///
    /// The id of the new bundle.
    pub async fn finalize(&self, caller: &Caller, key: &SessionKey) -> Result<String> {
        self.guard.require(caller, "finalize bundle")?;

        let session = self.sessions.take_for_finalize(key).await?;
        match self.catalog.insert_bundle(session.draft.clone()).await {
            Ok(bundle) => {
                tracing::info!(
                    actor = %key,
                    bundle_id = %bundle.id,
                    options = bundle.options.len(),
                    "[BundleBuilder] Bundle '{}' finalized",
                    bundle.title
                );
                Ok(bundle.id)
            }
            Err(e) => {
                let restored = self.sessions.restore(session).await;
                tracing::warn!(
                    actor = %key,
                    restored,
                    "[BundleBuilder] Failed to store bundle: {}",
                    e
                );
                Err(e)
            }
        }
    }

    /// Discards the draft of `key`.
    pub async fn cancel(&self, caller: &Caller, key: &SessionKey) -> Result<()> {
        self.guard.require(caller, "cancel bundle draft")?;

        if !self.sessions.evict(key).await {
            return Err(BazaarError::session_not_found(key));
        }
        tracing::info!(actor = %key, "[BundleBuilder] Draft cancelled");
        Ok(())
    }

    /// Replaces the panel fields of a committed bundle. Options are unchanged.
    pub async fn edit_bundle(
        &self,
        caller: &Caller,
        bundle_id: &str,
        panel: PanelFields,
    ) -> Result<Bundle> {
        self.guard.require(caller, "edit bundle")?;

        let mut bundle = self
            .catalog
            .find_bundle(bundle_id)
            .await?
            .ok_or_else(|| BazaarError::not_found("bundle", bundle_id))?;
        bundle.apply_panel(panel, Utc::now().to_rfc3339());
        self.catalog.update_bundle(&bundle).await?;

        tracing::info!(actor = %caller.actor.id, bundle_id, "[BundleBuilder] Bundle edited");
        Ok(bundle)
    }

    /// Reclaims drafts idle for longer than the configured TTL.
    ///
    /// # Returns
    ///
    /// The number of drafts removed.
    pub async fn sweep_expired(&self) -> usize {
        let removed = self
            .sessions
            .sweep_expired(self.session_ttl, Utc::now())
            .await;
        if !removed.is_empty() {
            tracing::info!(count = removed.len(), "[BundleBuilder] Expired drafts reclaimed");
        }
        removed.len()
    }
}
