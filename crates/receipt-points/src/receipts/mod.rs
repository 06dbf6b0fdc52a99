//! Receipt intake, points scoring, and score storage.
//!
//! Receipts arrive as loosely typed JSON. Envelope decoding is the only hard failure; each
//! scoring rule reads the fields it needs and contributes nothing when they do not parse.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Receipt, ReceiptId, ReceiptItem, ReceiptParseError};
pub use repository::{InMemoryPointsRepository, PointsRepository, RepositoryError};
pub use router::receipts_router;
pub use scoring::{PointsBreakdown, RuleContribution, ScoringEngine, ScoringRule};
pub use service::{ProcessedReceipt, ReceiptPointsService, ReceiptServiceError};
