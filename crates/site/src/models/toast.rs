//! Flash notifications.
//!
//! A handler pushes a toast and redirects; the next page rendered for the
//! visitor drains and shows it.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::session::keys;

/// A one-shot notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    /// Rendered in the error style.
    pub destructive: bool,
}

impl Toast {
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            destructive: false,
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            destructive: true,
        }
    }

    /// Queue this toast for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn push(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        let mut queued: Vec<Self> = session.get(keys::TOASTS).await?.unwrap_or_default();
        queued.push(self);
        session.insert(keys::TOASTS, queued).await
    }

    /// Take every queued toast, leaving none behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn drain(session: &Session) -> Result<Vec<Self>, tower_sessions::session::Error> {
        Ok(session
            .remove::<Vec<Self>>(keys::TOASTS)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_toasts_drain_once_in_order() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        Toast::error("Missing origin", "Please select a departure city")
            .push(&session)
            .await
            .unwrap();
        Toast::success("Seats selected", "You have selected seat: 12A")
            .push(&session)
            .await
            .unwrap();

        let toasts = Toast::drain(&session).await.unwrap();
        assert_eq!(toasts.len(), 2);
        assert!(toasts.first().unwrap().destructive);
        assert_eq!(toasts.get(1).unwrap().title, "Seats selected");

        assert!(Toast::drain(&session).await.unwrap().is_empty());
    }
}
