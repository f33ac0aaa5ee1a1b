//! GUI data models for Siproxylin.
//!
//! Plain display records kept separate from presentation code.

mod contact_display;

pub use contact_display::{AccountDisplayData, ConnectionState, ContactDisplayData, PresenceShow};
