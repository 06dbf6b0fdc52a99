use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::domain::{Receipt, ReceiptId};
use super::repository::{PointsRepository, RepositoryError};
use super::scoring::ScoringEngine;

/// Service composing the scoring engine with the points repository.
pub struct ReceiptPointsService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
}

/// Outcome of processing a receipt, shaped as the submit endpoint's response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedReceipt {
    pub id: ReceiptId,
    pub points: u64,
}

impl<R> ReceiptPointsService<R>
where
    R: PointsRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            engine: ScoringEngine::new(),
        }
    }

    /// Score a receipt and record the result under a fresh identifier.
    pub fn process(&self, receipt: &Receipt) -> Result<ProcessedReceipt, ReceiptServiceError> {
        let breakdown = self.engine.score(receipt);
        let id = ReceiptId::generate();

        debug!(%id, contributions = ?breakdown.contributions, "receipt scored");
        self.repository.insert(id.clone(), breakdown.total_points)?;
        info!(%id, points = breakdown.total_points, "receipt processed");

        Ok(ProcessedReceipt {
            id,
            points: breakdown.total_points,
        })
    }

    /// Points recorded for `id`; unknown identifiers read as zero.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        let points = self.repository.fetch(id)?;
        if points.is_none() {
            debug!(%id, "points requested for unknown receipt");
        }
        Ok(points.unwrap_or(0))
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
