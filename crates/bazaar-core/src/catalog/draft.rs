//! In-progress bundle drafts and the authoring session that carries them.

use chrono::{DateTime, Utc};
use std::fmt;

use super::model::{Bundle, BundleOption, ImageDisplay, OptionFields, PanelFields};
use crate::workspace::{ActorId, WorkspaceId};

/// Key of an authoring session: the actor that started the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey(pub ActorId);

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bundle that has panel fields but has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDraft {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub image_url: Option<String>,
    pub image_display: ImageDisplay,
    pub options: Vec<BundleOption>,
}

impl BundleDraft {
    /// Starts a draft with an empty option sequence.
    pub fn from_panel(fields: PanelFields) -> Self {
        let icon = fields.icon_or_default();
        Self {
            title: fields.title,
            description: fields.description,
            icon,
            image_url: fields.image_url.filter(|u| !u.trim().is_empty()),
            image_display: fields.image_display,
            options: Vec::new(),
        }
    }

    pub fn into_bundle(self, id: String, now: String) -> Bundle {
        Bundle {
            id,
            title: self.title,
            description: self.description,
            icon: self.icon,
            image_url: self.image_url,
            image_display: self.image_display,
            options: self.options,
            created_at: now,
            edited_at: None,
        }
    }
}

/// Transient state of one actor's "create bundle" dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoringSession {
    pub key: SessionKey,
    pub workspace: WorkspaceId,
    pub draft: BundleDraft,
    /// Last time the session was started or extended.
    pub touched_at: DateTime<Utc>,
}

impl AuthoringSession {
    pub fn new(key: SessionKey, workspace: WorkspaceId, panel: PanelFields, now: DateTime<Utc>) -> Self {
        Self {
            key,
            workspace,
            draft: BundleDraft::from_panel(panel),
            touched_at: now,
        }
    }

    /// Appends an option and returns the new option count.
    pub fn push_option(&mut self, fields: OptionFields, now: DateTime<Utc>) -> usize {
        self.draft.options.push(fields.into_option());
        self.touched_at = now;
        self.draft.options.len()
    }

    pub fn option_count(&self) -> usize {
        self.draft.options.len()
    }

    /// True when the session has not been touched since `cutoff`.
    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.touched_at < cutoff
    }
}
