//! Tax aggregation — subtotal, per-GST-type amounts, grand total.
//!
//! Pure and synchronous. The same reduce drives the live payment summary in
//! the form and the amounts transmitted to the document webhook, so rounding
//! is deliberately absent here; two-decimal formatting happens only when the
//! wire payload is built.

use crate::form::{GstType, LineItem, TaxRow};

// =============================================================================
// TYPES
// =============================================================================

/// Per-tax-type amount buckets. Rows sharing a type sum into one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerTypeTotals {
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
}

impl PerTypeTotals {
    #[must_use]
    pub fn amount(&self, kind: GstType) -> f64 {
        match kind {
            GstType::Cgst => self.cgst,
            GstType::Sgst => self.sgst,
            GstType::Igst => self.igst,
        }
    }

    fn add(&mut self, kind: GstType, amount: f64) {
        match kind {
            GstType::Cgst => self.cgst += amount,
            GstType::Sgst => self.sgst += amount,
            GstType::Igst => self.igst += amount,
        }
    }

    fn sum(&self) -> f64 {
        self.cgst + self.sgst + self.igst
    }
}

/// Derived totals for one form state. Recomputed on every change, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxAggregate {
    pub subtotal: f64,
    pub per_type: PerTypeTotals,
    pub grand_total: f64,
}

// =============================================================================
// AGGREGATION
// =============================================================================

/// Fold line items and tax rows into a [`TaxAggregate`].
///
/// Empty `items` yields a zero subtotal; empty `tax_rows` makes the grand
/// total equal the subtotal. Non-finite rates or quantities count as 0.
#[must_use]
pub fn aggregate(items: &[LineItem], tax_rows: &[TaxRow]) -> TaxAggregate {
    let subtotal = items
        .iter()
        .fold(0.0, |sum, item| sum + sanitize(item.rate) * sanitize(item.quantity));

    let mut per_type = PerTypeTotals::default();
    for row in tax_rows {
        per_type.add(row.kind, subtotal * sanitize(row.rate) / 100.0);
    }

    TaxAggregate { subtotal, per_type, grand_total: subtotal + per_type.sum() }
}

fn sanitize(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

#[cfg(test)]
#[path = "totals_test.rs"]
mod tests;
