//! Rental pricing
//!
//! Pure currency arithmetic shared by the cart view and checkout.
//! Amounts are `Decimal` with two fractional digits, rounded half-up.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::shared::errors::DomainError;

/// Highest daily rate the fleet accepts
pub const MAX_PRICE_PER_DAY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Anything priced per rental day
pub trait Billable {
    fn price_per_day(&self) -> Decimal;
    fn rental_days(&self) -> u32;

    fn subtotal(&self) -> Result<Decimal, DomainError> {
        subtotal(self.price_per_day(), self.rental_days())
    }
}

fn out_of_range() -> DomainError {
    DomainError::validation("total", "Amount exceeds the supported range")
}

/// Round to cents, midpoint away from zero
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `price_per_day × rental_days`, rounded to cents
pub fn subtotal(price_per_day: Decimal, rental_days: u32) -> Result<Decimal, DomainError> {
    price_per_day
        .checked_mul(Decimal::from(rental_days))
        .map(round_currency)
        .ok_or_else(out_of_range)
}

/// Sum of the items' subtotals
pub fn total<T: Billable>(items: &[T]) -> Result<Decimal, DomainError> {
    items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.subtotal()?).ok_or_else(out_of_range)
    })
}

/// Format an amount for display, e.g. `1250.50 INR`
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    format!("{:.2} {}", round_currency(amount), currency)
}
