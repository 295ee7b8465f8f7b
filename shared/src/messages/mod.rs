//! Wire messages exchanged with the remote management API
//!
//! - `auth`: credential exchange and token extraction
//! - `partner`: partner listing, detail envelopes and the full-record update payload

pub mod auth;
pub mod partner;

pub use auth::{AuthResponse, Credentials};

pub use partner::{OldDataSnapshot, PartnerDetailResponse, PartnerListResponse, UpdatePayload};
