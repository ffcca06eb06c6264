//! Product detail view.

use anyhow::{anyhow, Result};
use storefront_commerce::catalog::Product;
use storefront_commerce::{Currency, Money};
use storefront_data::{detail_error_message, ProductDetailLoader};

use super::ProductArgs;
use crate::context::Context;
use crate::output::{format_rating, stock_badge, Output};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let loader = ProductDetailLoader::new(ctx.source()?);

    let spinner = ctx.output.spinner(&format!("Loading product {}...", args.id));
    let result = loader.fetch(&args.id).await;
    spinner.finish_and_clear();

    let product = result.map_err(|e| anyhow!(detail_error_message(&e)))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    print_detail(&product, ctx.currency()?, &ctx.output);
    Ok(())
}

/// Print the full detail card for a product.
pub fn print_detail(product: &Product, currency: Currency, output: &Output) {
    output.header(&product.title);
    if let Some(brand) = &product.brand {
        output.kv("brand", brand);
    }
    output.kv("category", &product.category);
    output.kv("rating", &format_rating(product.rating));

    let price = product.price_money(currency).display();
    if product.discount_percentage > 0.0 {
        let original = Money::from_decimal(product.original_price(), currency);
        output.kv(
            "price",
            &format!(
                "{} (was {}, -{:.0}%)",
                price,
                original.display(),
                product.discount_percentage
            ),
        );
    } else {
        output.kv("price", &price);
    }
    output.kv("stock", &stock_badge(product));

    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }
    if !product.images.is_empty() {
        output.kv("images", &product.images.len().to_string());
    }
}
