//! Pre-submission receipt validation
//!
//! Runs once at submit time, not on every keystroke. Every violated field
//! path is collected and reported together so the form can render all
//! field-level messages at once instead of failing on the first.
//!
//! The live-edit coercion in [`super::money`] (non-finite becomes zero) must
//! not leak in here: a non-finite quantity or price is rejected, not zeroed.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::error::{AppError, ErrorCode};
use crate::util::{is_ten_digits, is_ymd_date};

use super::types::{PaymentStatus, PaymentType, ReceiptDraft};

/// Maximum allowed quantity per item; keeps stored quantities within i32
const MAX_QUANTITY: f64 = 9999.0;
/// Maximum allowed price per item
const MAX_PRICE: f64 = 1_000_000.0;

/// Field errors keyed by dotted path (`items.0.quantity`, `paymentPhone.phone`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(path.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.errors.iter()
    }

    /// Field errors as a detail map for the wire error body
    pub fn into_details(self) -> HashMap<String, Value> {
        self.errors
            .into_iter()
            .map(|(path, message)| (path, Value::String(message)))
            .collect()
    }

    /// Convert a failed report into the wire error
    pub fn into_error(self) -> AppError {
        AppError::new(ErrorCode::ReceiptValidationFailed).with_details(self.into_details())
    }
}

/// Validate a draft against the submission schema
///
/// The caller is expected to have recomputed the derived totals first; the
/// checks on `total` and `dueTotal` read whatever the draft carries.
pub fn validate_receipt(draft: &ReceiptDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.receipt_number.trim().is_empty() {
        report.add("receiptNumber", "Receipt number is required");
    }
    if !is_ymd_date(&draft.date) {
        report.add("date", "Date must be in YYYY-MM-DD format");
    }
    // An untouched form submits paymentDate as ""; only a provided value is checked
    if let Some(payment_date) = &draft.payment_date {
        if !payment_date.is_empty() && !is_ymd_date(payment_date) {
            report.add("paymentDate", "Payment date must be in YYYY-MM-DD format");
        }
    }
    if draft.customer_name.trim().is_empty() {
        report.add("customerName", "Customer name is required");
    }
    if draft.customer_contact.chars().count() < 10 {
        report.add(
            "customerContact",
            "Customer contact must be at least 10 characters",
        );
    }

    if !draft.total.is_finite() || draft.total < 0.0 {
        report.add("total", "Total must be at least 0");
    }
    if !draft.due_total.is_finite() || draft.due_total < 0.0 {
        report.add("dueTotal", "Due total must be at least 0");
    }
    if let Some(pct) = draft.gst_percentage {
        if !pct.is_finite() || !(0.0..=28.0).contains(&pct) {
            report.add("gstPercentage", "GST percentage must be between 0 and 28");
        }
    }

    if draft.items.is_empty() {
        report.add("items", "At least one item is required");
    }
    for (i, item) in draft.items.iter().enumerate() {
        if item.description.trim().is_empty() {
            report.add(format!("items.{i}.description"), "Description is required");
        }
        if !item.quantity.is_finite() || item.quantity.fract() != 0.0 || item.quantity < 1.0 {
            report.add(
                format!("items.{i}.quantity"),
                "Quantity must be a whole number of at least 1",
            );
        } else if item.quantity > MAX_QUANTITY {
            report.add(
                format!("items.{i}.quantity"),
                format!("Quantity exceeds the maximum allowed ({MAX_QUANTITY})"),
            );
        }
        if !item.price.is_finite() || item.price < 0.01 {
            report.add(format!("items.{i}.price"), "Price must be at least 0.01");
        } else if item.price > MAX_PRICE {
            report.add(
                format!("items.{i}.price"),
                format!("Price exceeds the maximum allowed ({MAX_PRICE})"),
            );
        }
        if let Some(advance) = item.advance_amount {
            if !advance.is_finite() || advance < 0.0 {
                report.add(
                    format!("items.{i}.advanceAmount"),
                    "Advance amount must be at least 0",
                );
            }
        }
        if let Some(due) = item.due_amount {
            if !due.is_finite() || due < 0.0 {
                report.add(
                    format!("items.{i}.dueAmount"),
                    "Due amount must be at least 0",
                );
            }
        }
    }

    // Secondary check outside the schema: online payments need a reachable
    // phone number unless the receipt is a due receipt.
    if draft.payment_type == PaymentType::Online && draft.payment_status != PaymentStatus::Due {
        let phone = draft
            .payment_phone
            .as_ref()
            .map(|p| p.phone.as_str())
            .unwrap_or("");
        if !is_ten_digits(phone) {
            report.add(
                "paymentPhone.phone",
                "A 10-digit phone number is required for online payments",
            );
        }
    }

    report
}
