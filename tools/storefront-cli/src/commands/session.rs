//! Interactive shopping session.

use anyhow::Result;
use dialoguer::{Confirm, Input, Password, Select};
use storefront_commerce::cart::{clamp_purchase_quantity, CartAction, CartProduct, CartState};
use storefront_commerce::checkout::{Checkout, CheckoutForm, OrderConfirmation, OrderSummary};
use storefront_commerce::search::ProductsAction;
use storefront_commerce::{CommerceError, Currency, Store};
use storefront_data::{HttpProductSource, LoadState, ProductLoader};

use super::product::print_detail;
use super::products::{fetch_with_retries, print_table, reapply_search};
use super::SessionArgs;
use crate::context::Context;
use crate::output::Output;

#[derive(Clone, Copy)]
enum MenuItem {
    Browse,
    Search,
    View,
    Add,
    Update,
    Remove,
    Cart,
    Clear,
    Checkout,
    Retry,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 11] = [
        MenuItem::Browse,
        MenuItem::Search,
        MenuItem::View,
        MenuItem::Add,
        MenuItem::Update,
        MenuItem::Remove,
        MenuItem::Cart,
        MenuItem::Clear,
        MenuItem::Checkout,
        MenuItem::Retry,
        MenuItem::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuItem::Browse => "Browse products",
            MenuItem::Search => "Search",
            MenuItem::View => "View product",
            MenuItem::Add => "Add to cart",
            MenuItem::Update => "Change quantity",
            MenuItem::Remove => "Remove from cart",
            MenuItem::Cart => "View cart",
            MenuItem::Clear => "Clear cart",
            MenuItem::Checkout => "Checkout",
            MenuItem::Retry => "Reload products",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Prompt labels for the checkout form, in form order.
const FORM_LABELS: [(&str, &str); 10] = [
    ("first_name", "First name"),
    ("last_name", "Last name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("address", "Address"),
    ("city", "City"),
    ("zip_code", "ZIP code"),
    ("card_number", "Card number"),
    ("expiry_date", "Expiry (MM/YY)"),
    ("cvv", "CVV"),
];

struct Session<'a> {
    store: Store,
    loader: ProductLoader<HttpProductSource>,
    checkout: Checkout,
    currency: Currency,
    output: &'a Output,
}

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let mut session = Session {
        store: ctx.store()?,
        loader: ctx.loader()?,
        checkout: ctx.config.checkout(),
        currency: ctx.currency()?,
        output: &ctx.output,
    };

    let loaded = fetch_with_retries(&mut session.loader, &mut session.store, 0, &ctx.output).await;
    if let Err(e) = loaded {
        ctx.output.error(&format!("{:#}", e));
        ctx.output.info("Choose \"Reload products\" to try again.");
    }
    if let Some(term) = args.search {
        session.store.dispatch(ProductsAction::SetSearchTerm(term));
    }

    let labels: Vec<&str> = MenuItem::ALL.iter().map(|item| item.label()).collect();
    loop {
        println!();
        let choice = Select::new()
            .with_prompt(session.prompt())
            .items(&labels)
            .default(0)
            .interact()?;

        let result = match MenuItem::ALL[choice] {
            MenuItem::Browse => session.browse(),
            MenuItem::Search => session.search(),
            MenuItem::View => session.view(),
            MenuItem::Add => session.add(),
            MenuItem::Update => session.update(),
            MenuItem::Remove => session.remove(),
            MenuItem::Cart => session.show_cart(),
            MenuItem::Clear => session.clear(),
            MenuItem::Checkout => session.checkout().await,
            MenuItem::Retry => session.retry().await,
            MenuItem::Quit => break,
        };

        if let Err(e) = result {
            ctx.output.error(&format!("{:#}", e));
        }
    }

    Ok(())
}

impl Session<'_> {
    fn prompt(&self) -> String {
        let cart = self.store.cart();
        format!(
            "Cart: {} item(s), {}",
            cart.total_quantity,
            cart.total_amount.display()
        )
    }

    fn browse(&self) -> Result<()> {
        let products = self.store.products();
        if let Some(error) = &products.error {
            self.output.warn(error);
        }
        if products.is_searching() {
            self.output.header(&format!(
                "Results for \"{}\" ({} of {})",
                products.search_term,
                products.filtered_products.len(),
                products.products.len()
            ));
        } else {
            let count = products.filtered_products.len();
            self.output.header(&format!("Products ({})", count));
        }
        if products.filtered_products.is_empty() {
            self.output.info("No products to show.");
            return Ok(());
        }
        print_table(&products.filtered_products, self.currency, self.output);
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let term: String = Input::new()
            .with_prompt("Search (empty to clear)")
            .with_initial_text(self.store.products().search_term.clone())
            .allow_empty(true)
            .interact_text()?;

        if term.trim().is_empty() {
            self.store.dispatch(ProductsAction::ClearSearch);
        } else {
            self.store.dispatch(ProductsAction::SetSearchTerm(term));
        }
        self.browse()
    }

    fn view(&self) -> Result<()> {
        let Some(index) = self.pick_product("View which product?")? else {
            return Ok(());
        };
        let product = &self.store.products().filtered_products[index];
        print_detail(product, self.currency, self.output);
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        let Some(index) = self.pick_product("Add which product?")? else {
            return Ok(());
        };
        let product = self.store.products().filtered_products[index].clone();
        if !product.is_available() {
            self.output.warn(&format!("{} is out of stock", product.title));
            return Ok(());
        }

        let requested: u32 = Input::new()
            .with_prompt(format!("Quantity (1-{})", product.stock))
            .default(1)
            .interact_text()?;
        let quantity = clamp_purchase_quantity(requested, product.stock);

        let item = CartProduct::from_product(&product, self.currency);
        self.store.dispatch(CartAction::AddQuantity {
            product: item,
            count: quantity,
        });
        let added = format!("Added {} x {} to cart", quantity, product.title);
        self.output.success(&added);
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let Some(index) = self.pick_line("Change which item?")? else {
            return Ok(());
        };
        let line = &self.store.cart().items[index];
        let id = line.id;
        let quantity: i64 = Input::new()
            .with_prompt(format!("New quantity for {} (0 or less removes)", line.title))
            .default(line.quantity)
            .interact_text()?;

        self.store.dispatch(CartAction::StepQuantity { id, quantity });
        self.show_cart()
    }

    fn remove(&mut self) -> Result<()> {
        let Some(index) = self.pick_line("Remove which item?")? else {
            return Ok(());
        };
        let line = &self.store.cart().items[index];
        let (id, title) = (line.id, line.title.clone());
        self.store.dispatch(CartAction::RemoveFromCart(id));
        self.output.success(&format!("Removed {}", title));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.store.cart().is_empty() {
            self.output.info("Your cart is already empty.");
            return Ok(());
        }
        let confirmed = Confirm::new()
            .with_prompt("Remove everything from your cart?")
            .default(false)
            .interact()?;
        if confirmed {
            self.store.dispatch(CartAction::ClearCart);
            self.output.success("Cart cleared");
        }
        Ok(())
    }

    async fn checkout(&mut self) -> Result<()> {
        if self.store.cart().is_empty() {
            self.output.warn(&CommerceError::EmptyCart.to_string());
            return Ok(());
        }
        self.show_cart()?;

        let mut form = CheckoutForm::default();
        let mut pending: Vec<&str> = FORM_LABELS.iter().map(|(field, _)| *field).collect();
        loop {
            for field in &pending {
                prompt_field(&mut form, field)?;
            }
            let errors = form.validate();
            if errors.is_empty() {
                break;
            }
            for error in &errors {
                self.output.warn(&format!("{}: {}", label_for(error.field), error.message));
            }
            let again = Confirm::new()
                .with_prompt("Fix these fields?")
                .default(true)
                .interact()?;
            if !again {
                self.output.info("Checkout cancelled");
                return Ok(());
            }
            pending = errors.iter().map(|e| e.field).collect();
        }

        let spinner = self.output.spinner("Processing order...");
        let result = self.checkout.submit(&mut self.store, &form).await;
        spinner.finish_and_clear();

        print_confirmation(&result?, self.output);
        Ok(())
    }

    async fn retry(&mut self) -> Result<()> {
        if matches!(self.loader.state(), LoadState::Success) {
            fetch_with_retries(&mut self.loader, &mut self.store, 0, self.output).await?;
        } else {
            let delay = self.loader.policy().delay_for(self.loader.retry_count());
            let msg = match delay {
                Some(d) => format!("Retrying in {}s...", d.as_secs_f64()),
                None => "Retrying...".to_string(),
            };
            let spinner = self.output.spinner(&msg);
            self.loader.refetch(&mut self.store).await;
            spinner.finish_and_clear();
            reapply_search(&mut self.store);
        }

        match self.loader.state() {
            LoadState::Failure(message) => self.output.error(message),
            _ => self.output.success(&format!(
                "Loaded {} products",
                self.store.products().products.len()
            )),
        }
        Ok(())
    }

    fn show_cart(&self) -> Result<()> {
        let summary = self.checkout.summary(&self.store)?;
        print_cart(self.store.cart(), &summary, self.output);
        Ok(())
    }

    /// Index into the filtered products, `None` when there is nothing to pick.
    fn pick_product(&self, prompt: &str) -> Result<Option<usize>> {
        let products = &self.store.products().filtered_products;
        if products.is_empty() {
            self.output.info("No products to choose from.");
            return Ok(None);
        }
        let items: Vec<String> = products
            .iter()
            .map(|p| format!("{} ({})", p.title, p.price_money(self.currency)))
            .collect();
        let index = Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()?;
        Ok(Some(index))
    }

    fn pick_line(&self, prompt: &str) -> Result<Option<usize>> {
        let cart = self.store.cart();
        if cart.is_empty() {
            self.output.info("Your cart is empty.");
            return Ok(None);
        }
        let items: Vec<String> = cart
            .items
            .iter()
            .map(|line| format!("{} x{}", line.title, line.quantity))
            .collect();
        let index = Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()?;
        Ok(Some(index))
    }
}

fn label_for(field: &str) -> &str {
    FORM_LABELS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, label)| *label)
        .unwrap_or(field)
}

fn prompt_field(form: &mut CheckoutForm, field: &str) -> Result<()> {
    let label = label_for(field);
    if field == "cvv" {
        form.cvv = Password::new().with_prompt(label).interact()?;
        return Ok(());
    }

    let slot = match field {
        "first_name" => &mut form.first_name,
        "last_name" => &mut form.last_name,
        "email" => &mut form.email,
        "phone" => &mut form.phone,
        "address" => &mut form.address,
        "city" => &mut form.city,
        "zip_code" => &mut form.zip_code,
        "card_number" => &mut form.card_number,
        "expiry_date" => &mut form.expiry_date,
        _ => return Ok(()),
    };
    *slot = Input::new()
        .with_prompt(label)
        .with_initial_text(slot.clone())
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

fn print_cart(cart: &CartState, summary: &OrderSummary, output: &Output) {
    output.header("Your cart");
    if cart.is_empty() {
        output.info("Your cart is empty.");
        return;
    }
    for line in &cart.items {
        output.list_item(&format!(
            "{} x{} @ {} = {}",
            line.title,
            line.quantity,
            line.price.display(),
            line.total_price.display()
        ));
    }
    output.kv("items", &cart.total_quantity.to_string());
    print_summary(summary, output);
}

fn print_summary(summary: &OrderSummary, output: &Output) {
    output.kv("subtotal", &summary.subtotal.display());
    output.kv("shipping", &shipping_label(summary));
    output.kv("tax", &summary.tax_total.display());
    output.kv("total", &summary.grand_total.display());
}

fn shipping_label(summary: &OrderSummary) -> String {
    if summary.is_free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping_total.display()
    }
}

fn print_confirmation(order: &OrderConfirmation, output: &Output) {
    if output.is_json() {
        output.json(order);
        return;
    }
    output.success("Order placed");
    output.kv("order", order.order_id.as_str());
    output.kv("customer", &order.customer);
    output.kv("email", &order.email);
    output.kv("items", &order.item_count.to_string());
    print_summary(&order.summary, output);
    output.kv("card", &order.masked_card);
    output.kv("placed", &order.placed_at.to_rfc2822());
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::{Money, ProductId};

    #[test]
    fn test_form_labels_cover_every_field() {
        let form = CheckoutForm::default();
        let names: Vec<&str> = form.fields().iter().map(|(name, _)| *name).collect();
        let labelled: Vec<&str> = FORM_LABELS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, labelled);
    }

    #[test]
    fn test_shipping_label() {
        let cart = CartState::new(Currency::USD).add_to_cart(&CartProduct::new(
            ProductId::new(1),
            "Lamp",
            Money::new(2500, Currency::USD),
            "",
        ));
        let summary = OrderSummary::for_cart(&cart, 800).unwrap();
        assert_eq!(shipping_label(&summary), "Free");

        let summary = OrderSummary {
            shipping_total: Money::new(499, Currency::USD),
            ..summary
        };
        assert_eq!(shipping_label(&summary), "$4.99");
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for("zip_code"), "ZIP code");
        assert_eq!(label_for("unknown"), "unknown");
    }
}
