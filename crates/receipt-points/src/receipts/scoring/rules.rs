use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use super::super::domain::{Receipt, ReceiptItem};
use super::{RuleContribution, ScoringRule};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

// Exclusive bounds, minutes since midnight.
const AFTERNOON_START: u32 = 14 * 60;
const AFTERNOON_END: u32 = 16 * 60;

struct Tally {
    contributions: Vec<RuleContribution>,
    total: u64,
}

impl Tally {
    fn new() -> Self {
        Self {
            contributions: Vec::new(),
            total: 0,
        }
    }

    fn add(&mut self, rule: ScoringRule, points: u64, notes: String) {
        if points == 0 {
            return;
        }
        self.total = self.total.saturating_add(points);
        self.contributions.push(RuleContribution {
            rule,
            points,
            notes,
        });
    }
}

pub(crate) fn score_receipt(receipt: &Receipt) -> (Vec<RuleContribution>, u64) {
    let mut tally = Tally::new();

    let retailer = retailer_points(&receipt.retailer);
    tally.add(
        ScoringRule::RetailerName,
        retailer,
        format!("{retailer} alphanumeric characters in '{}'", receipt.retailer),
    );

    if let Some(total) = parse_amount(&receipt.total) {
        tally.add(
            ScoringRule::RoundDollarTotal,
            round_dollar_points(total),
            format!("total {} has no cents", receipt.total),
        );
        tally.add(
            ScoringRule::QuarterMultipleTotal,
            quarter_multiple_points(total),
            format!("total {} is a multiple of 0.25", receipt.total),
        );
    }

    let pairs = item_pair_points(receipt.items.len());
    tally.add(
        ScoringRule::ItemPairs,
        pairs,
        format!("{} items, {} pairs", receipt.items.len(), receipt.items.len() / 2),
    );

    for item in &receipt.items {
        if let Some(points) = description_points(item) {
            tally.add(
                ScoringRule::DescriptionLength,
                points,
                format!(
                    "'{}' trims to a multiple of 3, price {}",
                    item.short_description.trim(),
                    item.price
                ),
            );
        }
    }

    tally.add(
        ScoringRule::OddPurchaseDay,
        odd_day_points(&receipt.purchase_date),
        format!("purchased on odd day {}", receipt.purchase_date),
    );

    tally.add(
        ScoringRule::AfternoonPurchase,
        afternoon_points(&receipt.purchase_time),
        format!("purchased at {} between 14:00 and 16:00", receipt.purchase_time),
    );

    (tally.contributions, tally.total)
}

/// Decimal text to a finite number; anything else voids the dependent rule.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub(crate) fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as u64
}

pub(crate) fn round_dollar_points(total: f64) -> u64 {
    if total.fract() == 0.0 {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

pub(crate) fn quarter_multiple_points(total: f64) -> u64 {
    // Cents are truncated, not rounded.
    let cents = (total.fract() * 100.0) as i64;
    if cents % 25 == 0 {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

pub(crate) fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * POINTS_PER_ITEM_PAIR
}

/// `None` when the item does not qualify or its price cannot be read.
pub(crate) fn description_points(item: &ReceiptItem) -> Option<u64> {
    if item.short_description.trim().len() % 3 != 0 {
        return None;
    }

    let price = parse_amount(&item.price)?;
    let points = (price * DESCRIPTION_PRICE_MULTIPLIER).ceil();
    if points > 0.0 {
        Some(points as u64)
    } else {
        Some(0)
    }
}

/// `YYYY-MM-DD` with every field zero padded; chrono alone would accept `2022-1-3`.
fn is_padded_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// One or two hour digits, then exactly two minute digits.
fn is_clock_time(raw: &str) -> bool {
    let Some((hours, minutes)) = raw.split_once(':') else {
        return false;
    };
    (1..=2).contains(&hours.len())
        && hours.bytes().all(|byte| byte.is_ascii_digit())
        && minutes.len() == 2
        && minutes.bytes().all(|byte| byte.is_ascii_digit())
}

pub(crate) fn odd_day_points(purchase_date: &str) -> u64 {
    if !is_padded_date(purchase_date) {
        return 0;
    }

    match NaiveDate::parse_from_str(purchase_date, "%Y-%m-%d") {
        Ok(date) if date.day() % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

pub(crate) fn afternoon_points(purchase_time: &str) -> u64 {
    if !is_clock_time(purchase_time) {
        return 0;
    }

    let Ok(time) = NaiveTime::parse_from_str(purchase_time, "%H:%M") else {
        return 0;
    };

    let minutes = time.hour() * 60 + time.minute();
    if minutes > AFTERNOON_START && minutes < AFTERNOON_END {
        AFTERNOON_POINTS
    } else {
        0
    }
}
