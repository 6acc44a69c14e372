//! `cherokee providers`: configured providers and the default fallback order.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

pub fn list_providers(state: &AppState, json: bool) -> Result<()> {
    let listing = state.provider_listing();

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("Configured Providers").bold());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Kind").fg(Color::White),
        Cell::new("Endpoint").fg(Color::White),
        Cell::new("API key").fg(Color::White),
        Cell::new("Order").fg(Color::White),
    ]);

    for provider in &listing.providers {
        let key_cell = if provider.has_api_key {
            Cell::new("set").fg(Color::Green)
        } else {
            Cell::new("-").fg(Color::DarkGrey)
        };
        let position = listing
            .default_order
            .iter()
            .position(|id| *id == provider.id)
            .map(|i| (i + 1).to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&provider.id).fg(Color::Cyan),
            Cell::new(provider.kind).fg(Color::DarkGrey),
            Cell::new(provider.endpoint.as_deref().unwrap_or("(default)")).fg(Color::DarkGrey),
            key_cell,
            Cell::new(position).fg(Color::White),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} {}",
        style("Fallback order:").bold(),
        listing.default_order.join(" → ")
    );
    println!();

    Ok(())
}
