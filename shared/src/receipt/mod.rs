//! Receipt engine
//!
//! Draft editing, money math, validation, and list filtering for
//! merchant receipts. All money math runs on [`rust_decimal::Decimal`]
//! and converts back to `f64` only at the edges; see [`money`] for the
//! rounding and coercion rules.

pub mod draft;
pub mod filter;
pub mod money;
pub mod types;
pub mod validate;

pub use filter::{
    filter_receipts, normalize_total, RawTotal, ReceiptFilter, ReceiptListEntry, ReceiptSummary,
    StatusFilter,
};
pub use money::{
    coerce, compute_totals, money_eq, recalculate_totals, to_decimal, to_f64, ReceiptTotals,
    DECIMAL_PLACES, MONEY_TOLERANCE,
};
pub use types::{
    PaymentPhone, PaymentStatus, PaymentType, ReceiptDraft, ReceiptItemDraft, ReceiptStatus,
};
pub use validate::{validate_receipt, ValidationReport};
