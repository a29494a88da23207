//! List the category tree.

use anyhow::{Context as _, Result};
use techmart_catalog::catalog::ProductCategory;

use super::CategoriesArgs;
use crate::context::Context;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client();
    let spinner = ctx.output.spinner("Loading categories...");
    let categories = if args.flat {
        client.categories().list_flat().await
    } else {
        client.categories().list_tree().await
    };
    spinner.finish_and_clear();
    let categories = categories.context("Failed to load categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    let mut lines = Vec::new();
    for category in &categories {
        tree_lines(category, 0, &mut lines);
    }
    for line in &lines {
        ctx.output.list_item(line);
    }

    Ok(())
}

/// Indented `name (#id)` lines, depth first.
fn tree_lines(category: &ProductCategory, depth: usize, out: &mut Vec<String>) {
    let id = category
        .id
        .map_or_else(String::new, |id| format!(" (#{})", id));
    out.push(format!("{}{}{}", "  ".repeat(depth), category.category_name, id));
    for child in &category.children {
        tree_lines(child, depth + 1, out);
    }
}
