//! Show a product and its variant family.

use anyhow::{Context as _, Result};
use serde::Serialize;
use techmart_catalog::catalog::{Product, ProductAccessory};
use techmart_catalog::ids::ProductId;
use techmart_catalog::review::{average_rating, ProductReview};
use techmart_catalog::search::VariantFamily;

use super::ProductArgs;
use crate::context::Context;
use crate::output::{format_price, format_stock};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductView {
    #[serde(flatten)]
    family: VariantFamily,
    #[serde(skip_serializing_if = "Option::is_none")]
    reviews: Option<Vec<ProductReview>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accessories: Option<Vec<ProductAccessory>>,
}

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::new(args.id);
    let client = ctx.client();

    let spinner = ctx.output.spinner(&format!("Loading product {}...", id));
    let family = client.product_and_variants(id).await;
    spinner.finish_and_clear();
    let family = family.with_context(|| format!("Failed to load product {}", id))?;

    let reviews = if args.reviews {
        Some(client.reviews().for_product(id).await.context("Failed to load reviews")?)
    } else {
        None
    };
    let accessories = if args.accessories {
        Some(
            client
                .products()
                .accessories(id)
                .await
                .context("Failed to load accessories")?,
        )
    } else {
        None
    };

    let view = ProductView {
        family,
        reviews,
        accessories,
    };

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    print_family(&view.family, ctx);
    if let Some(reviews) = &view.reviews {
        print_reviews(reviews, ctx);
    }
    if let Some(accessories) = &view.accessories {
        ctx.output.header("Accessories");
        if accessories.is_empty() {
            ctx.output.info("None");
        }
        for link in accessories {
            let name = link.accessory_product.as_ref().map_or_else(
                || format!("Product {}", link.accessory_product_id),
                |p| p.product_name.clone(),
            );
            ctx.output.list_item(&name);
        }
    }

    Ok(())
}

fn print_family(family: &VariantFamily, ctx: &Context) {
    let main = &family.main_product;
    ctx.output.header(&main.product_name);
    if let Some(brand) = &main.brand {
        ctx.output.kv("Brand", brand);
    }
    ctx.output.kv("Price", &format_price(main.numeric_price()));
    if let Some(pct) = main.discount_percentage() {
        ctx.output.kv("Discount", &format!("{:.0}%", pct));
    }
    ctx.output.kv("Stock", &format_stock(main.stock()));
    for attribute in &main.attributes {
        ctx.output.kv(&attribute.name, &attribute.value);
    }
    if !main.short_description().is_empty() {
        ctx.output.kv("About", &main.short_description());
    }

    ctx.output.header(&format!("Variants ({})", family.variants.len()));
    let widths = [8, 36, 16, 12];
    for variant in &family.variants {
        print_variant(variant, main, &widths, ctx);
    }
    if let Some(best) = family.cheapest_available() {
        ctx.output.info(&format!(
            "Cheapest in stock: {} at {}",
            best.product_name,
            format_price(best.numeric_price())
        ));
    }
}

fn print_variant(variant: &Product, main: &Product, widths: &[usize], ctx: &Context) {
    let marker = if variant.id.is_some() && variant.id == main.id { "*" } else { "" };
    let id = variant
        .id
        .map_or_else(|| "-".to_string(), |id| format!("{}{}", id, marker));
    let price = format_price(variant.numeric_price());
    let stock = format_stock(variant.stock());
    ctx.output
        .table_row(&[&id, &variant.product_name, &price, &stock], widths);
}

fn print_reviews(reviews: &[ProductReview], ctx: &Context) {
    let heading = match average_rating(reviews) {
        Some(avg) => format!("Reviews ({}, avg {:.1}/5)", reviews.len(), avg),
        None => "Reviews (none yet)".to_string(),
    };
    ctx.output.header(&heading);
    for review in reviews {
        let stars = "★".repeat(review.rating as usize);
        ctx.output.list_item(&format!("{} {}", stars, review.comment));
    }
}
