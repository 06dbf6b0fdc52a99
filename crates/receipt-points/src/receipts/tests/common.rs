use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{Receipt, ReceiptId, ReceiptItem};
use crate::receipts::repository::{InMemoryPointsRepository, PointsRepository, RepositoryError};
use crate::receipts::{receipts_router, ReceiptPointsService};

pub(super) fn item(description: &str, price: &str) -> ReceiptItem {
    ReceiptItem {
        short_description: description.to_string(),
        price: price.to_string(),
    }
}

/// Scores 28 points.
pub(super) fn target_receipt() -> Receipt {
    Receipt {
        retailer: "Target".to_string(),
        purchase_date: "2022-01-01".to_string(),
        purchase_time: "13:01".to_string(),
        items: vec![
            item("Mountain Dew 12PK", "6.49"),
            item("Emils Cheese Pizza", "12.25"),
            item("Knorr Creamy Chicken", "1.26"),
            item("Doritos Nacho Cheese", "3.35"),
            item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        total: "35.35".to_string(),
    }
}

/// Scores 109 points.
pub(super) fn corner_market_receipt() -> Receipt {
    Receipt {
        retailer: "M&M Corner Market".to_string(),
        purchase_date: "2022-03-20".to_string(),
        purchase_time: "14:33".to_string(),
        items: vec![
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
        ],
        total: "9.00".to_string(),
    }
}

/// A receipt on which no rule fires.
pub(super) fn blank_receipt() -> Receipt {
    Receipt {
        retailer: "&".to_string(),
        purchase_date: "2022-01-02".to_string(),
        purchase_time: "09:00".to_string(),
        items: Vec::new(),
        total: "1.01".to_string(),
    }
}

pub(super) fn build_service() -> (
    ReceiptPointsService<InMemoryPointsRepository>,
    Arc<InMemoryPointsRepository>,
) {
    let repository = Arc::new(InMemoryPointsRepository::default());
    let service = ReceiptPointsService::new(repository.clone());
    (service, repository)
}

pub(super) fn receipts_router_with_service(
    service: ReceiptPointsService<InMemoryPointsRepository>,
) -> axum::Router {
    receipts_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl PointsRepository for UnavailableRepository {
    fn insert(&self, _id: ReceiptId, _points: u64) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &ReceiptId) -> Result<Option<u64>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
