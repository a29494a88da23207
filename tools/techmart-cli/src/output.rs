//! Output formatting for the CLI.

use console::{measure_text_width, pad_str, style, truncate_str, Alignment};
use indicatif::{ProgressBar, ProgressStyle};
use techmart_catalog::checkout::OrderStatus;
use techmart_catalog::money::{format_range, Vnd};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", table_line(cols, widths));
    }

    /// Create a spinner shown while waiting on the backend.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Pad or cut each cell to its column width. Styled cells are measured
/// without their escape codes.
fn table_line(cols: &[&str], widths: &[usize]) -> String {
    let formatted: Vec<String> = cols
        .iter()
        .zip(widths.iter())
        .map(|(col, &width)| {
            if measure_text_width(col) > width {
                truncate_str(col, width, "…").into_owned()
            } else {
                pad_str(col, width, Alignment::Left, None).into_owned()
            }
        })
        .collect();
    formatted.join("  ").trim_end().to_string()
}

/// Colored badge for an order status code.
pub fn status_badge(code: i32) -> String {
    match OrderStatus::from_code(code) {
        Some(status @ OrderStatus::Delivered) => style(status.as_str()).green().to_string(),
        Some(status @ (OrderStatus::Pending | OrderStatus::Confirmed)) => {
            style(status.as_str()).yellow().to_string()
        }
        Some(status @ OrderStatus::Shipped) => style(status.as_str()).cyan().to_string(),
        Some(status @ OrderStatus::Cancelled) => style(status.as_str()).red().to_string(),
        None => style(format!("unknown ({})", code)).dim().to_string(),
    }
}

/// A single price, or `-` when the backend sent none.
pub fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| Vnd(p).to_string())
}

/// A group's price range.
pub fn format_price_range(min: f64, max: f64) -> String {
    format_range(min, max)
}

/// Stock count, dimmed when nothing is left.
pub fn format_stock(stock: i64) -> String {
    if stock > 0 {
        stock.to_string()
    } else {
        style("out of stock").dim().to_string()
    }
}
