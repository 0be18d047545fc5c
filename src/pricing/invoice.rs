//! Invoice totals for the admin back-office.
//!
//! Independent of the quote calculator in [`super::quote`] — invoices operate
//! on line-item amounts with a percentage tax rate and an absolute discount,
//! not on service selections.

use serde::{Deserialize, Serialize};

/// One billable line on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub amount: f64,
}

/// Computed invoice totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// `subtotal = Σ amount; tax = subtotal * rate/100; total = subtotal + tax - discount`.
pub fn calculate(items: &[LineItem], tax_rate: f64, discount_amount: f64) -> InvoiceTotals {
    let subtotal: f64 = items.iter().map(|i| i.amount).sum();
    let tax_amount = subtotal * (tax_rate / 100.0);
    InvoiceTotals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount - discount_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(amount: f64) -> LineItem {
        LineItem {
            description: "Production work".to_string(),
            amount,
        }
    }

    #[test]
    fn totals_apply_tax_then_discount() {
        let totals = calculate(&[item(1000.0), item(500.0)], 10.0, 100.0);
        assert_eq!(totals.subtotal, 1500.0);
        assert_eq!(totals.tax_amount, 150.0);
        assert_eq!(totals.total, 1550.0);
    }

    #[test]
    fn zero_tax_and_discount_leave_subtotal() {
        let totals = calculate(&[item(250.0)], 0.0, 0.0);
        assert_eq!(totals.total, 250.0);
    }

    #[test]
    fn empty_invoice_totals_negative_discount_only() {
        // A discount on an empty invoice drives the total below zero; the
        // admin UI is responsible for refusing to save such an invoice.
        let totals = calculate(&[], 20.0, 50.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.tax_amount, 0.0);
        assert_eq!(totals.total, -50.0);
    }
}
