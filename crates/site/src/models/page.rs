//! Per-page chrome: who is logged in and what toasts to show.

use tower_sessions::Session;
use wanderlust_core::user::UserInfo;

use super::{Toast, session};

/// Data every full page needs for the navbar and toast area.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub user: Option<UserInfo>,
    pub toasts: Vec<Toast>,
}

impl Page {
    /// Load the navbar user and drain pending toasts.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        Ok(Self {
            user: session::current_user(session).await?,
            toasts: Toast::drain(session).await?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_load_drains_toasts_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        Toast::success("Booking Confirmed", "See you on board")
            .push(&session)
            .await
            .unwrap();

        let page = Page::load(&session).await.unwrap();
        assert!(page.user.is_none());
        let titles: Vec<_> = page.toasts.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Booking Confirmed"]);

        assert!(Page::load(&session).await.unwrap().toasts.is_empty());
    }
}
