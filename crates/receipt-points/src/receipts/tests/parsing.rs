use super::common::*;
use crate::receipts::{Receipt, ReceiptParseError};

const TARGET_JSON: &str = r#"{
  "retailer": "Target",
  "purchaseDate": "2022-01-01",
  "purchaseTime": "13:01",
  "items": [
    { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
    { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
    { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
    { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
    { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
  ],
  "total": "35.35"
}"#;

#[test]
fn decodes_camel_case_payload() {
    let receipt = Receipt::from_json(TARGET_JSON.as_bytes()).expect("receipt decodes");
    assert_eq!(receipt, target_receipt());
}

#[test]
fn missing_and_null_fields_default_to_empty() {
    let receipt = Receipt::from_json(br#"{"retailer": null, "items": [{"price": "1.00"}]}"#)
        .expect("partial receipt decodes");

    assert_eq!(receipt.retailer, "");
    assert_eq!(receipt.total, "");
    assert_eq!(receipt.items, vec![item("", "1.00")]);

    let receipt = Receipt::from_json(br#"{"items": null}"#).expect("null items decode");
    assert!(receipt.items.is_empty());
}

#[test]
fn unknown_fields_are_ignored() {
    let receipt = Receipt::from_json(br#"{"retailer": "Target", "loyaltyCard": "1234"}"#)
        .expect("unknown fields tolerated");
    assert_eq!(receipt.retailer, "Target");
}

#[test]
fn top_level_null_is_an_empty_receipt() {
    let receipt = Receipt::from_json(b"null").expect("null decodes");
    assert_eq!(receipt, Receipt::default());
}

#[test]
fn trailing_bytes_after_document_are_ignored() {
    let receipt = Receipt::from_json(br#"{"retailer": "Target"} trailing"#)
        .expect("first document decodes");
    assert_eq!(receipt.retailer, "Target");
}

#[test]
fn rejects_empty_body() {
    assert!(matches!(Receipt::from_json(b""), Err(ReceiptParseError::Empty)));
    assert!(matches!(
        Receipt::from_json(b"  \n "),
        Err(ReceiptParseError::Empty)
    ));
}

#[test]
fn rejects_malformed_or_mistyped_envelopes() {
    for body in [
        &b"not json"[..],
        &b"{\"retailer\": \"Target\""[..],
        &b"{\"total\": 35.35}"[..],
        &b"{\"items\": \"none\"}"[..],
    ] {
        match Receipt::from_json(body) {
            Err(ReceiptParseError::Malformed(_)) => {}
            other => panic!("expected malformed error for {body:?}, got {other:?}"),
        }
    }
}

#[test]
fn rejects_documents_that_are_not_objects() {
    for body in [
        &b"[]"[..],
        &br#"["Target", "2022-01-01", "13:01", [], "1.00"]"#[..],
        &b"\"Target\""[..],
        &b"42"[..],
    ] {
        match Receipt::from_json(body) {
            Err(ReceiptParseError::UnexpectedShape { .. }) => {}
            other => panic!("expected shape error for {body:?}, got {other:?}"),
        }
    }
}

#[test]
fn rejects_items_given_as_arrays() {
    let err = Receipt::from_json(br#"{"items": [["Gatorade", "2.25"]]}"#)
        .expect_err("positional item rejected");
    assert_eq!(err.to_string(), "expected an item object, found an array");
}

#[test]
fn null_items_decode_as_empty_items() {
    let receipt = Receipt::from_json(br#"{"items": [null, {"price": "2.25"}]}"#)
        .expect("null item tolerated");
    assert_eq!(receipt.items, vec![item("", ""), item("", "2.25")]);
}

#[test]
fn repeated_keys_keep_the_last_value() {
    let receipt = Receipt::from_json(br#"{"retailer": "A", "retailer": "B"}"#)
        .expect("duplicate keys tolerated");
    assert_eq!(receipt.retailer, "B");
}

#[test]
fn field_names_match_case_insensitively() {
    let receipt = Receipt::from_json(
        br#"{"Retailer": "Target", "PURCHASEDATE": "2022-01-01", "items": [{"ShortDescription": "Gatorade", "PRICE": "2.25"}]}"#,
    )
    .expect("receipt decodes");

    assert_eq!(receipt.retailer, "Target");
    assert_eq!(receipt.purchase_date, "2022-01-01");
    assert_eq!(receipt.items, vec![item("Gatorade", "2.25")]);
}

#[test]
fn exact_case_key_wins_over_case_variant() {
    let receipt = Receipt::from_json(br#"{"retailer": "Target", "RETAILER": "Walgreens"}"#)
        .expect("receipt decodes");
    assert_eq!(receipt.retailer, "Target");
}
