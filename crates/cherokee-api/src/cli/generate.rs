//! `cherokee generate`: one orchestration call from the command line.

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde_json::{Map, Value, json};

use cherokee_types::llm::{GenerateError, GenerationSettings};

use crate::http::error::generate_error_body;
use crate::state::AppState;

/// Parse `--settings`. Absent means empty; anything but a JSON object is rejected.
pub fn parse_settings(raw: Option<&str>) -> Result<GenerationSettings> {
    let Some(raw) = raw else {
        return Ok(GenerationSettings::from(Map::new()));
    };
    match serde_json::from_str::<Value>(raw).context("--settings is not valid JSON")? {
        Value::Object(map) => Ok(GenerationSettings::from(map)),
        other => bail!("--settings must be a JSON object, got {other}"),
    }
}

/// Run `prompt` through the chain and print the outcome.
///
/// Returns an error (non-zero exit) when no provider produced text.
pub async fn generate(
    state: &AppState,
    prompt: &str,
    providers: Vec<String>,
    settings: Option<&str>,
    json: bool,
) -> Result<()> {
    let settings = parse_settings(settings)?;
    let order = (!providers.is_empty()).then_some(providers);

    match state.manager.generate(prompt, &settings, order.as_deref()).await {
        Ok(result) => {
            if json {
                let body = json!({
                    "prompt": prompt,
                    "provider": result.provider,
                    "code": result.text,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!();
                println!(
                    "  {} Generated by {}",
                    style("✓").green().bold(),
                    style(&result.provider).cyan()
                );
                println!();
                println!("{}", result.text);
                println!();
            }
            Ok(())
        }
        Err(err) => {
            if json {
                let (_, body) = generate_error_body(&err);
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_failures(&err);
            }
            bail!("{err}")
        }
    }
}

fn print_failures(err: &GenerateError) {
    println!();
    println!("  {} {}", style("✗").red().bold(), style(err).bold());
    println!();

    if err.failures().is_empty() {
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Provider").fg(Color::White),
        Cell::new("Error").fg(Color::White),
        Cell::new("Details").fg(Color::White),
    ]);

    for (index, failure) in err.failures().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).fg(Color::DarkGrey),
            Cell::new(&failure.provider).fg(Color::Cyan),
            Cell::new(failure.code).fg(Color::Red),
            Cell::new(&failure.details).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();
}
