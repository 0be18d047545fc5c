//! Quote totals for a project's selected services.
//!
//! The calculation order is fixed and must not be rearranged — discount is
//! applied to the subtotal first, then the rush-delivery markup:
//!
//! 1. `subtotal = Σ service.price`
//! 2. `DISCOUNT30` (exact, case-sensitive) ⇒ `total = subtotal * 0.7`
//! 3. fast delivery ⇒ `total = total * 1.2`
//!
//! Any other discount code is silently ignored — an unrecognized code is
//! "no discount", never an error.

use crate::models::ServiceSelection;

/// The single recognized discount code.
pub const DISCOUNT_CODE: &str = "DISCOUNT30";

/// Multiplier applied when [`DISCOUNT_CODE`] matches.
const DISCOUNT_MULTIPLIER: f64 = 0.7;

/// Markup multiplier for rush delivery.
const FAST_DELIVERY_MULTIPLIER: f64 = 1.2;

/// Compute the quote total for `services`.
///
/// Returns the un-rounded value; use [`round_for_display`] for presentation.
pub fn calculate_total(services: &[ServiceSelection], discount_code: &str, fast_delivery: bool) -> f64 {
    let subtotal: f64 = services.iter().map(|s| s.price).sum();
    let mut total = if discount_code == DISCOUNT_CODE {
        subtotal * DISCOUNT_MULTIPLIER
    } else {
        subtotal
    };
    if fast_delivery {
        total *= FAST_DELIVERY_MULTIPLIER;
    }
    total
}

/// Subtotal before discount or markup.
pub fn subtotal(services: &[ServiceSelection]) -> f64 {
    services.iter().map(|s| s.price).sum()
}

/// Round to 2 decimal places for display. Presentation-only — internal
/// arithmetic always uses the un-rounded value.
pub fn round_for_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
