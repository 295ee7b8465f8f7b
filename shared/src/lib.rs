//! Shared types for the QPS limit tuner
//!
//! Contains the partner data model, the wire messages exchanged with the
//! remote management API, shared errors and the run-aware logging setup.

pub mod types;
pub mod errors;
pub mod logging;
pub mod messages;

pub use types::*;
pub use errors::*;

// Re-export the wire messages used at the API boundary
pub use messages::{
    // Authentication
    Credentials, AuthResponse,

    // Partner listing, detail and update
    PartnerListResponse, PartnerDetailResponse, UpdatePayload, OldDataSnapshot,
};
