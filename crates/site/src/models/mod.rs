//! Session-held models for the site.
//!
//! Each visitor's session is their scratch space: the last search, the
//! booking in progress, who they are logged in as, their bookings, and
//! toasts waiting to be shown.

pub mod page;
pub mod session;
pub mod toast;

pub use page::Page;
pub use toast::Toast;
