//! Product listing and search.

use anyhow::{bail, Result};
use serde::Serialize;
use storefront_commerce::catalog::{Product, StockStatus};
use storefront_commerce::search::{ProductsAction, SearchFilter};
use storefront_commerce::{Currency, Store};
use storefront_data::{LoadState, ProductLoader, ProductSource};

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{format_rating, stock_badge, Output};

const WIDTHS: [usize; 5] = [5, 34, 14, 12, 11];

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.store()?;
    let mut loader = ctx.loader()?;

    fetch_with_retries(&mut loader, &mut store, args.retries, &ctx.output).await?;

    if args.categories {
        return print_categories(&store, ctx);
    }

    if let Some(term) = args.search {
        store.dispatch(ProductsAction::SetSearchTerm(term));
    }

    let mut shown = store.products().filtered_products.clone();
    if let Some(category) = args.category.as_deref() {
        shown = SearchFilter::category(category).apply(&shown);
    }

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    let products = store.products();
    if products.is_searching() {
        ctx.output.header(&format!(
            "Results for \"{}\" ({} of {})",
            products.search_term,
            shown.len(),
            products.products.len()
        ));
    } else {
        ctx.output.header(&format!("Products ({})", shown.len()));
    }

    if shown.is_empty() {
        ctx.output.info("No products match. Try a different search term.");
        return Ok(());
    }

    print_table(&shown, ctx.currency()?, &ctx.output);
    Ok(())
}

/// Load the list, retrying up to `retries` times on failure.
pub async fn fetch_with_retries<S: ProductSource>(
    loader: &mut ProductLoader<S>,
    store: &mut Store,
    retries: u32,
    output: &Output,
) -> Result<()> {
    let spinner = output.spinner("Loading products...");
    loader.load(store).await;

    let mut attempt = 0;
    while let LoadState::Failure(message) = loader.state() {
        if attempt == retries {
            spinner.finish_and_clear();
            bail!("{}", message);
        }
        attempt += 1;
        let wait = loader
            .policy()
            .delay_for(loader.retry_count())
            .map(|d| format!(" in {}s", d.as_secs_f64()))
            .unwrap_or_default();
        spinner.set_message(format!("{} Retrying{} ({}/{})", message, wait, attempt, retries));
        loader.refetch(store).await;
    }

    spinner.finish_and_clear();
    reapply_search(store);
    output.debug(&format!("Fetched {} products", loader.products().len()));
    Ok(())
}

/// Filter a freshly loaded list by the search term still held in the store.
pub fn reapply_search(store: &mut Store) {
    if store.products().is_searching() {
        let term = store.products().search_term.clone();
        store.dispatch(ProductsAction::SetSearchTerm(term));
    }
}

/// Print products as a table.
pub fn print_table(products: &[Product], currency: Currency, output: &Output) {
    output.table_row(&["ID", "Title", "Category", "Price", "Rating"], &WIDTHS);
    for product in products {
        let id = product.id.to_string();
        let price = product.price_money(currency).display();
        let rating = format_rating(product.rating);
        output.table_row(
            &[
                id.as_str(),
                product.title.as_str(),
                product.category.as_str(),
                price.as_str(),
                rating.as_str(),
            ],
            &WIDTHS,
        );
        if product.stock_status() != StockStatus::InStock {
            output.kv("stock", &stock_badge(product));
        }
    }
}

#[derive(Serialize)]
struct CategoryCount<'a> {
    category: &'a str,
    count: usize,
}

fn print_categories(store: &Store, ctx: &Context) -> Result<()> {
    let products = store.products();
    let counts: Vec<CategoryCount<'_>> = products
        .categories()
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: SearchFilter::category(category)
                .apply(&products.products)
                .len(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&counts);
        return Ok(());
    }

    ctx.output.header("Categories");
    for entry in &counts {
        ctx.output.list_item(&format!("{} ({})", entry.category, entry.count));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::ProductId;

    fn reload(store: &mut Store) {
        store.dispatch(ProductsAction::SetProducts(vec![
            Product::new(ProductId::new(1), "Red Shirt", 20.0),
            Product::new(ProductId::new(2), "Blue Hat", 15.0),
        ]));
    }

    #[test]
    fn test_reload_keeps_active_search() {
        let mut store = Store::new(Currency::USD);
        store.dispatch(ProductsAction::SetSearchTerm("red".to_string()));
        reload(&mut store);
        reapply_search(&mut store);

        let products = store.products();
        assert_eq!(products.search_term, "red");
        assert_eq!(products.filtered_products.len(), 1);
        assert_eq!(products.filtered_products[0].title, "Red Shirt");
    }

    #[test]
    fn test_reload_without_search_shows_everything() {
        let mut store = Store::new(Currency::USD);
        reload(&mut store);
        reapply_search(&mut store);
        assert_eq!(store.products().filtered_products.len(), 2);
    }
}
