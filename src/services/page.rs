//! HTML page for a single flower.
//!
//! The page only carries the flower's data as `data-*` attributes; drawing it
//! from the seed is left to the client. Templates are `.html`, so minijinja
//! escapes every interpolated value.

use std::sync::OnceLock;

use chrono::SecondsFormat;
use minijinja::{context, Environment};

use crate::models::Flower;
use crate::Result;

const FLOWER_TEMPLATE: &str = "flower.html";

static TEMPLATES: OnceLock<Environment<'static>> = OnceLock::new();

fn templates() -> &'static Environment<'static> {
    TEMPLATES.get_or_init(|| {
        let mut env = Environment::new();
        // Compiled into the binary, so a parse failure is caught by the tests
        if let Err(e) = env.add_template(
            FLOWER_TEMPLATE,
            include_str!("../../templates/flower.html"),
        ) {
            tracing::error!(error = %e, "Failed to load flower template");
        }
        env
    })
}

/// Render the view page for a flower.
pub fn render_flower(flower: &Flower) -> Result<String> {
    let label = flower
        .variation_enum()
        .map(|v| v.label())
        .unwrap_or("Unknown");

    let page = templates().get_template(FLOWER_TEMPLATE)?.render(context! {
        flower => flower,
        label => label,
        planted_at => flower.planted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        planted_on => flower.planted_at.format("%B %-d, %Y").to_string(),
    })?;

    Ok(page)
}
