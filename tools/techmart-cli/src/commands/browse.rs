//! Browse a category as variant groups.

use anyhow::{anyhow, Result};
use techmart_catalog::search::{
    extract_facet_options, group_products, Facet, FacetOptions, HomeSearch, ProductFilters,
    ProductGroup, SortOption,
};

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{format_price_range, format_stock};

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let category_id = ctx.config.category(&args.category)?;
    let sort = SortOption::from_str(&args.sort)
        .ok_or_else(|| anyhow!("Unknown sort order '{}'", args.sort))?;
    let facets: Vec<Facet> = args.facets.iter().map(|name| Facet::resolve(name)).collect();

    let pending = if args.fresh { None } else { ctx.take_search()? };
    if let Some(search) = &pending {
        ctx.output.debug(&format!("Applying saved search: {:?}", search));
    }
    let filters = build_filters(&args, pending);

    let client = ctx.client();
    let spinner = ctx.output.spinner(&format!("Loading category {}...", category_id));
    let fetched = if args.options {
        client
            .products()
            .by_category(category_id)
            .await
            .map(|products| {
                let options = extract_facet_options(&products, &facets);
                (group_products(&products, &filters, &facets), Some(options))
            })
    } else {
        client
            .category_groups(category_id, &filters, &facets)
            .await
            .map(|groups| (groups, None))
    };
    spinner.finish_and_clear();
    let (mut groups, options) = fetched?;
    sort.apply(&mut groups);

    if ctx.output.is_json() {
        ctx.output.json(&groups);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} ({} groups, {})",
        args.category,
        groups.len(),
        sort.display_name()
    ));
    if !filters.is_empty() {
        ctx.output.kv("Filters", &describe_filters(&filters));
    }

    if let Some(options) = &options {
        print_options(options, ctx);
    }

    if groups.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    let widths = [8, 32, 30, 12, 5];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "STOCK", "VARS"], &widths);
    for group in &groups {
        print_group(group, &facets, &widths, ctx);
    }

    Ok(())
}

/// Explicit flags win over a pending homepage search.
fn build_filters(args: &BrowseArgs, pending: Option<HomeSearch>) -> ProductFilters {
    let mut filters = pending.map(HomeSearch::into_filters).unwrap_or_default();
    if let Some(brand) = &args.brand {
        filters.brand = Some(brand.clone());
    }
    if let Some(search) = &args.search {
        filters.search_text = Some(search.clone());
    }
    if args.min_price.is_some() {
        filters.min_price = args.min_price;
    }
    if args.max_price.is_some() {
        filters.max_price = args.max_price;
    }
    for (name, value) in &args.attributes {
        filters = filters.with_attribute(name.clone(), value.clone());
    }
    filters
}

fn describe_filters(filters: &ProductFilters) -> String {
    let mut parts = Vec::new();
    if let Some(brand) = &filters.brand {
        parts.push(format!("brand~{}", brand));
    }
    if let Some(text) = &filters.search_text {
        parts.push(format!("name~{}", text));
    }
    for (name, value) in &filters.attribute_filters {
        parts.push(format!("{}~{}", name, value));
    }
    match (filters.min_price, filters.max_price) {
        (Some(min), Some(max)) => parts.push(format!("price {}..{}", min, max)),
        (Some(min), None) => parts.push(format!("price >= {}", min)),
        (None, Some(max)) => parts.push(format!("price <= {}", max)),
        (None, None) => {}
    }
    parts.join(", ")
}

fn print_options(options: &FacetOptions, ctx: &Context) {
    ctx.output.kv("Brands", &options.brands.join(", "));
    for (facet, values) in &options.values {
        if !values.is_empty() {
            ctx.output.kv(facet, &values.join(", "));
        }
    }
}

fn print_group(group: &ProductGroup, facets: &[Facet], widths: &[usize], ctx: &Context) {
    let id = group
        .representative_id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let price = format_price_range(group.min_price, group.max_price);
    let stock = format_stock(group.total_stock);
    let count = group.member_count.to_string();
    ctx.output
        .table_row(&[&id, &group.name, &price, &stock, &count], widths);

    let specs: Vec<String> = facets
        .iter()
        .filter_map(|f| group.attribute(&f.name).map(|v| format!("{}: {}", f.name, v)))
        .collect();
    if !specs.is_empty() {
        ctx.output.debug(&specs.join(" | "));
    }
}
