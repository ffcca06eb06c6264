//! Order totals shown at checkout.

use serde::{Deserialize, Serialize};

use crate::cart::CartState;
use crate::error::CommerceError;
use crate::money::Money;

/// Default sales tax, in basis points (8%).
pub const DEFAULT_TAX_RATE_BP: i64 = 800;

/// Pricing breakdown for a cart at checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Cart total before tax.
    pub subtotal: Money,
    /// Shipping is always free.
    pub shipping_total: Money,
    pub tax_total: Money,
    /// Subtotal plus shipping plus tax.
    pub grand_total: Money,
}

impl OrderSummary {
    /// Price `cart` with a tax rate in basis points.
    pub fn for_cart(cart: &CartState, tax_rate_bp: i64) -> Result<Self, CommerceError> {
        let subtotal = cart.total_amount;
        let shipping_total = Money::zero(subtotal.currency);
        let tax_total = subtotal.checked_percentage(tax_rate_bp)?;
        let grand_total = subtotal
            .checked_add(&shipping_total)?
            .checked_add(&tax_total)?;

        Ok(Self {
            subtotal,
            shipping_total,
            tax_total,
            grand_total,
        })
    }

    pub fn is_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartProduct;
    use crate::ids::ProductId;
    use crate::money::Currency;

    fn cart(prices: &[i64]) -> CartState {
        prices.iter().enumerate().fold(CartState::default(), |cart, (i, cents)| {
            cart.add_to_cart(&CartProduct::new(
                ProductId::new(i as u64 + 1),
                format!("Item {i}"),
                Money::new(*cents, Currency::USD),
                "",
            ))
        })
    }

    #[test]
    fn test_summary_adds_eight_percent_tax() {
        let summary = OrderSummary::for_cart(&cart(&[2599, 2599]), DEFAULT_TAX_RATE_BP).unwrap();

        assert_eq!(summary.subtotal, Money::new(5198, Currency::USD));
        assert!(summary.is_free_shipping());
        assert_eq!(summary.tax_total, Money::new(416, Currency::USD));
        assert_eq!(summary.grand_total, Money::new(5614, Currency::USD));
        assert_eq!(summary.grand_total.display(), "$56.14");
    }

    #[test]
    fn test_summary_of_empty_cart_is_zero() {
        let summary = OrderSummary::for_cart(&CartState::new(Currency::EUR), 800).unwrap();
        assert!(summary.grand_total.is_zero());
        assert_eq!(summary.grand_total.currency, Currency::EUR);
    }

    #[test]
    fn test_custom_tax_rate() {
        let summary = OrderSummary::for_cart(&cart(&[10_000]), 0).unwrap();
        assert_eq!(summary.grand_total, summary.subtotal);

        let summary = OrderSummary::for_cart(&cart(&[10_000]), 1_250).unwrap();
        assert_eq!(summary.tax_total, Money::new(1_250, Currency::USD));
    }
}
