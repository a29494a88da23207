//! Homepage search hand-off.

use anyhow::Result;
use techmart_catalog::search::HomeSearch;

use super::{SearchArgs, SearchCommand};
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SearchCommand::Put {
            brand,
            search,
            min_price,
            max_price,
        } => {
            let pending = HomeSearch {
                brand,
                search,
                min_price,
                max_price,
            };
            ctx.put_search(pending)?;
            ctx.output
                .success("Search saved; the next `techmart browse` opens with it.");
        }
        SearchCommand::Show => {
            let pending = ctx.peek_search()?;
            if ctx.output.is_json() {
                ctx.output.json(&pending);
                return Ok(());
            }
            match pending {
                Some(search) => {
                    ctx.output.header("Pending search");
                    ctx.output.kv("brand", search.brand.as_deref().unwrap_or("-"));
                    ctx.output.kv("search", search.search.as_deref().unwrap_or("-"));
                    ctx.output.kv("min_price", &bound(search.min_price));
                    ctx.output.kv("max_price", &bound(search.max_price));
                }
                None => ctx.output.info("No pending search."),
            }
        }
        SearchCommand::Clear => {
            if ctx.take_search()?.is_some() {
                ctx.output.success("Pending search discarded.");
            } else {
                ctx.output.info("No pending search.");
            }
        }
    }

    Ok(())
}

fn bound(value: Option<f64>) -> String {
    value
        .filter(|v| *v > 0.0)
        .map_or_else(|| "-".to_string(), |v| v.to_string())
}
