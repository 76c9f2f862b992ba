//! Draft receipt mutation API
//!
//! Every mutation recomputes the derived totals immediately, the way a
//! spreadsheet cell updates. There is no manual "recalculate" step, so the
//! draft never carries stale money fields.

use super::money::recalculate_totals;
use super::types::{PaymentStatus, PaymentType, ReceiptDraft, ReceiptItemDraft};

impl ReceiptDraft {
    /// Empty draft with a server-assigned receipt number and a date
    pub fn new(receipt_number: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            receipt_number: receipt_number.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    /// Append a line item
    pub fn add_item(&mut self, item: ReceiptItemDraft) {
        self.items.push(item);
        recalculate_totals(self);
    }

    /// Remove the item at `index`; out-of-range indexes are ignored
    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
            recalculate_totals(self);
        }
    }

    pub fn set_item_description(&mut self, index: usize, description: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.description = description.into();
            recalculate_totals(self);
        }
    }

    pub fn set_item_quantity(&mut self, index: usize, quantity: f64) {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
            recalculate_totals(self);
        }
    }

    pub fn set_item_price(&mut self, index: usize, price: f64) {
        if let Some(item) = self.items.get_mut(index) {
            item.price = price;
            recalculate_totals(self);
        }
    }

    pub fn set_item_advance(&mut self, index: usize, advance: Option<f64>) {
        if let Some(item) = self.items.get_mut(index) {
            item.advance_amount = advance;
            recalculate_totals(self);
        }
    }

    pub fn set_item_due(&mut self, index: usize, due: Option<f64>) {
        if let Some(item) = self.items.get_mut(index) {
            item.due_amount = due;
            recalculate_totals(self);
        }
    }

    pub fn set_gst_percentage(&mut self, percentage: Option<f64>) {
        self.gst_percentage = percentage;
        recalculate_totals(self);
    }

    pub fn set_payment_type(&mut self, payment_type: PaymentType) {
        self.payment_type = payment_type;
        recalculate_totals(self);
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
        recalculate_totals(self);
    }

    /// Apply the submit-time business rule and refresh totals
    ///
    /// A due receipt is always a cash receipt: GST and online payment do not
    /// apply to a pure IOU, so the payment type is forced to cash regardless
    /// of what the form selected.
    pub fn normalize_for_submit(&mut self) {
        if self.payment_status == PaymentStatus::Due {
            self.payment_type = PaymentType::Cash;
        }
        recalculate_totals(self);
    }
}
