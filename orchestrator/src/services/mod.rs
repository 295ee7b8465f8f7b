//! Service implementations
//!
//! This module contains real implementations of the collaborator traits.
//! These are the production implementations that handle actual I/O operations.

pub mod api_client;
pub mod audit_writer;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use api_client::RealPartnerApi;
pub use audit_writer::CsvAuditWriter;
