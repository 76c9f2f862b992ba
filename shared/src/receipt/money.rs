//! Money calculation for receipt totals using rust_decimal for precision
//!
//! All derived totals are computed with `Decimal` internally, then converted
//! back to `f64` for storage/serialization.

use rust_decimal::prelude::*;

use super::types::{PaymentStatus, ReceiptDraft, ReceiptItemDraft};

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Input values should have passed through [`coerce`] or the pre-submission
/// validator. If NaN/Infinity somehow reaches here, logs an error and returns
/// ZERO to avoid silent data corruption in financial calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal's full range (~7.9e28) is always representable as f64
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Coerce a raw numeric input for live computation
///
/// Non-finite values silently become zero so an in-progress edit never
/// faults the running totals. The pre-submission validator rejects these
/// values instead of zeroing them; coercion stops at the live-edit path.
#[inline]
pub fn coerce(value: f64) -> Decimal {
    if value.is_finite() {
        to_decimal(value)
    } else {
        Decimal::ZERO
    }
}

/// Derived money fields of a receipt draft
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceiptTotals {
    pub subtotal: f64,
    pub gst_amount: f64,
    pub total: f64,
    pub due_total: f64,
}

/// Compute subtotal, GST amount, total, and due total from the draft items
///
/// ```text
/// subtotal  = sum(quantity * price)       (per-factor clamp to >= 0)
/// gstAmount = subtotal * gstPercentage / 100, or 0 without a percentage
/// total     = subtotal + gstAmount
/// dueTotal  = full:    0
///             advance: total - sum(advanceAmount)
///             due:     sum(dueAmount)
/// ```
///
/// An advance due total may go negative when recorded advances exceed the
/// total. It is reported as-is; the validator rejects it at submit time.
pub fn compute_totals(draft: &ReceiptDraft) -> ReceiptTotals {
    let subtotal: Decimal = draft.items.iter().map(line_total).sum();

    let gst_amount = match draft.gst_percentage {
        Some(pct) => (subtotal * coerce(pct) / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero),
        None => Decimal::ZERO,
    };
    let total = subtotal + gst_amount;

    let due_total = match draft.payment_status {
        PaymentStatus::Full => Decimal::ZERO,
        PaymentStatus::Advance => total - sum_advances(&draft.items),
        PaymentStatus::Due => sum_dues(&draft.items),
    };

    ReceiptTotals {
        subtotal: to_f64(subtotal),
        gst_amount: to_f64(gst_amount),
        total: to_f64(total),
        due_total: to_f64(due_total),
    }
}

/// quantity * price for one line, with negative factors clamped to zero
fn line_total(item: &ReceiptItemDraft) -> Decimal {
    let quantity = coerce(item.quantity).max(Decimal::ZERO);
    let price = coerce(item.price).max(Decimal::ZERO);
    quantity * price
}

/// Sum of per-item advances, treating missing/invalid as 0
pub fn sum_advances(items: &[ReceiptItemDraft]) -> Decimal {
    items
        .iter()
        .map(|item| coerce(item.advance_amount.unwrap_or(0.0)))
        .sum()
}

/// Sum of per-item dues, treating missing/invalid as 0
pub fn sum_dues(items: &[ReceiptItemDraft]) -> Decimal {
    items
        .iter()
        .map(|item| coerce(item.due_amount.unwrap_or(0.0)))
        .sum()
}

/// Write freshly computed totals back onto the draft
pub fn recalculate_totals(draft: &mut ReceiptDraft) {
    let totals = compute_totals(draft);
    draft.subtotal = totals.subtotal;
    draft.gst_amount = totals.gst_amount;
    draft.total = totals.total;
    draft.due_total = totals.due_total;
}

/// Compare two monetary values within [`MONEY_TOLERANCE`]
#[inline]
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() <= MONEY_TOLERANCE
}
