//! Aggregate invariants of the cart reducer over arbitrary action sequences.

use proptest::prelude::*;
use storefront_commerce::prelude::*;

fn usd(cents: i64) -> Money {
    Money::new(cents, Currency::USD)
}

/// Catalog of fixed prices so repeat adds use the same price per id.
fn fixed_price(id: u64) -> Money {
    usd(100 * id as i64 + 99)
}

fn fixed_action() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        4 => (1u64..6).prop_map(|id| CartAction::AddToCart(CartProduct::new(
            ProductId::new(id),
            format!("Product {id}"),
            fixed_price(id),
            "",
        ))),
        1 => (1u64..6).prop_map(|id| CartAction::RemoveFromCart(ProductId::new(id))),
        2 => (1u64..6, -2i64..8).prop_map(|(id, quantity)| CartAction::UpdateQuantity {
            id: ProductId::new(id),
            quantity,
        }),
        1 => (1u64..6, 0u32..4).prop_map(|(id, count)| CartAction::AddQuantity {
            product: CartProduct::new(
                ProductId::new(id),
                format!("Product {id}"),
                fixed_price(id),
                "",
            ),
            count,
        }),
        1 => (1u64..6, -2i64..8).prop_map(|(id, quantity)| CartAction::StepQuantity {
            id: ProductId::new(id),
            quantity,
        }),
        1 => Just(CartAction::ClearCart),
    ]
}

fn varying_action() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        4 => (1u64..4, 0i64..5000).prop_map(|(id, cents)| CartAction::AddToCart(CartProduct::new(
            ProductId::new(id),
            format!("Product {id}"),
            usd(cents),
            "",
        ))),
        1 => (1u64..4).prop_map(|id| CartAction::RemoveFromCart(ProductId::new(id))),
        2 => (1u64..4, -2i64..8).prop_map(|(id, quantity)| CartAction::UpdateQuantity {
            id: ProductId::new(id),
            quantity,
        }),
    ]
}

proptest! {
    #[test]
    fn totals_match_line_items(actions in prop::collection::vec(fixed_action(), 0..40)) {
        let mut cart = CartState::default();
        for action in &actions {
            cart = cart.reduce(action);
            prop_assert!(cart.verify_totals());
            for item in &cart.items {
                prop_assert!(item.quantity >= 1);
                prop_assert_eq!(item.drift().unwrap(), usd(0));
            }
        }
    }

    #[test]
    fn aggregates_hold_even_when_prices_vary(
        actions in prop::collection::vec(varying_action(), 0..40)
    ) {
        let mut cart = CartState::default();
        for action in &actions {
            cart = cart.reduce(action);
            prop_assert!(cart.verify_totals());
        }
    }

    #[test]
    fn line_ids_stay_unique(actions in prop::collection::vec(fixed_action(), 0..40)) {
        let cart = actions.iter().fold(CartState::default(), |cart, a| cart.reduce(a));
        let mut ids: Vec<ProductId> = cart.items.iter().map(|i| i.id).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), cart.items.len());
    }

    #[test]
    fn second_remove_is_noop(
        actions in prop::collection::vec(fixed_action(), 0..20),
        id in 1u64..6,
    ) {
        let cart = actions.iter().fold(CartState::default(), |cart, a| cart.reduce(a));
        let once = cart.remove_from_cart(ProductId::new(id));
        prop_assert_eq!(once.remove_from_cart(ProductId::new(id)), once);
    }
}

#[test]
fn repeated_add_with_new_price_drifts_from_unit_price() {
    let first = CartProduct::new(ProductId::new(1), "Lamp", usd(1000), "");
    let sale = CartProduct::new(ProductId::new(1), "Lamp", usd(800), "");

    let cart = CartState::default().add_to_cart(&first).add_to_cart(&sale);
    let line = cart.get(ProductId::new(1)).unwrap();

    assert_eq!(line.price, usd(1000));
    assert_eq!(line.total_price, usd(1800));
    assert_eq!(line.drift().unwrap(), usd(-200));
    assert_eq!(cart.total_amount, usd(1800));
    assert!(cart.verify_totals());
}
