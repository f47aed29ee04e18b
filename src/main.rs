//! # photo-canon CLI
//!
//! Command-line interface for the image canonicalizer.
//!
//! ## Usage
//! ```bash
//! photo-canon --mode rename --path ~/Photos --verbose
//! photo-canon --mode similar+rename --path ~/Photos --report review.html
//! photo-canon --mode organize --path ~/Photos --skip archive
//! ```

mod cli;

use photo_canon::Result;

fn main() -> Result<()> {
    cli::run()
}
