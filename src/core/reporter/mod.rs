//! # Reporter Module
//!
//! Renders similarity reports for human review.
//!
//! ## Formats
//! - **HTML** - one page, one section per directory, the two images of
//!   every pair side by side under a `Similarity: <pct>% (<distance>)` line
//! - **JSON** - the same content for scripts

mod export;

pub use export::{export_html, export_json, export_to_file, ReportFormat};

const UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// Format a byte count with IEC units, e.g. `512.0B` or `1.5KiB`
pub fn format_size(bytes: u64) -> String {
    let mut num = bytes as f64;

    for unit in UNITS {
        if num.abs() < 1024.0 {
            return format!("{:3.1}{}B", num, unit);
        }
        num /= 1024.0;
    }

    format!("{:.1}YiB", num)
}
