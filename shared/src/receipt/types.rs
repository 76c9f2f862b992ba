//! Receipt draft and status types

use serde::{Deserialize, Serialize};

/// Payment instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    #[default]
    Cash,
    Online,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Online => "online",
        }
    }
}

/// Settlement state chosen on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Full,
    Advance,
    Due,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Advance => "advance",
            Self::Due => "due",
        }
    }
}

/// Stored receipt status
///
/// Mirrors [`PaymentStatus`] plus `due_paid`, which marks a due receipt that
/// has since been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Full,
    Advance,
    Due,
    DuePaid,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Advance => "advance",
            Self::Due => "due",
            Self::DuePaid => "due_paid",
        }
    }

    /// Parse the stored form; returns None for unknown values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full" => Some(Self::Full),
            "advance" => Some(Self::Advance),
            "due" => Some(Self::Due),
            "due_paid" => Some(Self::DuePaid),
            _ => None,
        }
    }

    /// Label shown in the list view; also matched by text search
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Full => "Paid",
            Self::Advance => "Advance",
            Self::Due => "Due",
            Self::DuePaid => "Due Paid",
        }
    }
}

impl From<PaymentStatus> for ReceiptStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Full => Self::Full,
            PaymentStatus::Advance => Self::Advance,
            PaymentStatus::Due => Self::Due,
        }
    }
}

/// Line item on a draft receipt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItemDraft {
    #[serde(default)]
    pub description: String,
    /// Whole units; kept as f64 because the form feeds raw numeric input
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub price: f64,
    /// Advance collected against this line (advance receipts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_amount: Option<f64>,
    /// Amount still owed on this line (due receipts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_amount: Option<f64>,
}

/// Phone sub-record for online payments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPhone {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country_code: String,
}

/// Draft receipt as edited on the client and re-validated by the server
///
/// The money fields at the bottom are derived from the items and are
/// recomputed on every mutation; values arriving over the wire are
/// overwritten before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDraft {
    /// Server-assigned, read-only to the user
    #[serde(default)]
    pub receipt_number: String,
    /// ISO `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_contact: String,
    #[serde(default)]
    pub customer_country_code: String,
    #[serde(default)]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    /// Required (10 digits) when paymentType is online and the receipt is
    /// not a due receipt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_phone: Option<PaymentPhone>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub items: Vec<ReceiptItemDraft>,
    /// 5, 12, 18, or 28 on the form picker; absent means no GST. The
    /// pre-submission validator accepts the whole [0, 28] range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_percentage: Option<f64>,

    // Derived totals
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub gst_amount: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub due_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PaymentType::Cash).unwrap(), "\"cash\"");
        assert_eq!(
            serde_json::to_string(&PaymentType::Online).unwrap(),
            "\"online\""
        );
    }

    #[test]
    fn test_payment_type_rejects_unknown() {
        let result: Result<PaymentType, _> = serde_json::from_str("\"card\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_receipt_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&ReceiptStatus::DuePaid).unwrap(),
            "\"due_paid\""
        );
        let status: ReceiptStatus = serde_json::from_str("\"due_paid\"").unwrap();
        assert_eq!(status, ReceiptStatus::DuePaid);
    }

    #[test]
    fn test_receipt_status_parse() {
        assert_eq!(ReceiptStatus::parse("full"), Some(ReceiptStatus::Full));
        assert_eq!(ReceiptStatus::parse("due_paid"), Some(ReceiptStatus::DuePaid));
        assert_eq!(ReceiptStatus::parse("paid"), None);
        assert_eq!(ReceiptStatus::parse(""), None);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(ReceiptStatus::Full.display_label(), "Paid");
        assert_eq!(ReceiptStatus::Advance.display_label(), "Advance");
        assert_eq!(ReceiptStatus::Due.display_label(), "Due");
        assert_eq!(ReceiptStatus::DuePaid.display_label(), "Due Paid");
    }

    #[test]
    fn test_draft_deserializes_camel_case() {
        let draft: ReceiptDraft = serde_json::from_str(
            r#"{
                "receiptNumber": "RCP-0001",
                "date": "2025-03-14",
                "customerName": "Ravi",
                "customerContact": "9876543210",
                "paymentType": "online",
                "paymentStatus": "advance",
                "paymentPhone": {"phone": "9876543210", "countryCode": "+91"},
                "items": [{"description": "Widget", "quantity": 2, "price": 50, "advanceAmount": 40}],
                "gstPercentage": 18
            }"#,
        )
        .unwrap();

        assert_eq!(draft.receipt_number, "RCP-0001");
        assert_eq!(draft.payment_type, PaymentType::Online);
        assert_eq!(draft.payment_status, PaymentStatus::Advance);
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].advance_amount, Some(40.0));
        assert_eq!(draft.gst_percentage, Some(18.0));
        // Wire totals default to zero until the engine recomputes them
        assert_eq!(draft.subtotal, 0.0);
    }
}
