//! Output formatting for CLI commands.
//!
//! Every renderer returns a `String` so commands stay trivially testable;
//! printing happens in the command handlers.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde_json::json;

use alofi_lib::{Network, RouteRenderMode, RouteReport, SnappedNode};

use crate::terminal::{format_with_separators, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Markdown table, suitable for pasting into notes or issues.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

/// Render the list of loaded network variants.
pub fn render_networks(
    networks: &[Network],
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    if format == OutputFormat::Json {
        let listing = networks
            .iter()
            .map(|network| {
                json!({
                    "name": network.name,
                    "label": network.label,
                    "nodes": network.graph.node_count(),
                    "edges": network.graph.edge_count(),
                })
            })
            .collect::<Vec<_>>();
        return Ok(serde_json::to_string_pretty(&listing)?);
    }

    let mut buffer = String::new();
    if networks.is_empty() {
        let _ = writeln!(buffer, "no networks found in dataset");
        return Ok(buffer);
    }

    for network in networks {
        let nodes = format_with_separators(network.graph.node_count() as u64);
        let edges = format_with_separators(network.graph.edge_count() as u64);
        let _ = match format {
            OutputFormat::Rich => writeln!(
                buffer,
                "* **{}** (`{}`): {nodes} nodes, {edges} edges",
                network.label, network.name
            ),
            _ => writeln!(
                buffer,
                "{bold}{}{reset} {gray}({}){reset}: {green}{nodes}{reset} nodes, {green}{edges}{reset} edges",
                network.label,
                network.name,
                bold = palette.white_bold,
                gray = palette.gray,
                green = palette.green,
                reset = palette.reset,
            ),
        };
    }
    Ok(buffer)
}

/// Render the result of a nearest-node lookup.
pub fn render_nearest(
    network: &Network,
    snapped: &SnappedNode,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    let coordinate = network.graph.node(snapped.node).map(|node| node.coordinate);

    match format {
        OutputFormat::Json => {
            let value = json!({
                "network": network.name,
                "node": snapped.node,
                "distance_m": round_to_tenth(snapped.distance),
                "latitude": coordinate.map(|c| c.latitude),
                "longitude": coordinate.map(|c| c.longitude),
            });
            Ok(serde_json::to_string_pretty(&value)?)
        }
        OutputFormat::Rich => Ok(format!(
            "Nearest node on **{}**: `{}` ({} m away)\n",
            network.label,
            snapped.node,
            round_to_tenth(snapped.distance)
        )),
        OutputFormat::Text => Ok(format!(
            "{bold}{}{reset}: node {} {gray}({} m away){reset}\n",
            network.label,
            snapped.node,
            round_to_tenth(snapped.distance),
            bold = palette.white_bold,
            gray = palette.gray,
            reset = palette.reset,
        )),
    }
}

/// Render a planned route report.
pub fn render_route_report(
    report: &RouteReport,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(report.to_json()?),
        OutputFormat::Rich => Ok(report.render(RouteRenderMode::RichText)),
        OutputFormat::Text => {
            let body = report.render(RouteRenderMode::PlainText);
            if report.is_partial() {
                Ok(format!("{}{body}{}", palette.orange, palette.reset))
            } else {
                Ok(body)
            }
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
