//! Route command handler for planning diverse routes between two coordinates.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use alofi_lib::{
    plan_route, Coordinate, CostModel, PlannerConfig, RouteReport, RouteRequest,
    DEFAULT_EMISSION_RATE_G_PER_KM, DEFAULT_PENALTY, DEFAULT_ROUTE_COUNT,
};

use crate::commands::load_catalog;
use crate::output::{render_route_report, OutputFormat};
use crate::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteCommandArgs {
    /// Network variant name or label (e.g. G_sustainable).
    #[arg(long)]
    pub network: String,
    /// Start latitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub from_lat: f64,
    /// Start longitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub from_lon: f64,
    /// Destination latitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub to_lat: f64,
    /// Destination longitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub to_lon: f64,
    /// Maximum number of diverse routes to return.
    #[arg(long, default_value_t = DEFAULT_ROUTE_COUNT)]
    pub count: usize,
    /// Weight multiplier applied to edges of each discovered route.
    #[arg(long, default_value_t = DEFAULT_PENALTY)]
    pub penalty: f64,
    /// Emission rate in grams of CO2 per kilometer.
    #[arg(long, default_value_t = DEFAULT_EMISSION_RATE_G_PER_KM)]
    pub emission_rate: f64,
    /// Settled-node budget for each shortest-path search.
    #[arg(long)]
    pub max_expansions: Option<usize>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let planner = PlannerConfig {
            max_expansions: self.max_expansions,
            ..PlannerConfig::new(self.count, self.penalty)
        };
        RouteRequest::new(
            self.network.clone(),
            Coordinate::new(self.from_lat, self.from_lon),
            Coordinate::new(self.to_lat, self.to_lon),
        )
        .with_planner(planner)
        .with_cost_model(CostModel::with_emission_rate(self.emission_rate))
    }
}

/// Handle the route subcommand.
///
/// Loads the dataset, plans diverse routes and prints the report. Finding
/// fewer routes than requested is reported in the output, not as a failure.
pub fn handle_route_command(
    target: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let catalog = load_catalog(target)?;
    let request = args.to_request();
    let plan = plan_route(&catalog, &request)
        .with_context(|| format!("failed to plan routes on {}", args.network))?;
    info!(
        found = plan.routes.len(),
        requested = plan.requested,
        "route planning finished"
    );

    let report = RouteReport::from_plan(&plan);
    let rendered = render_route_report(&report, format, ColorPalette::detect())?;
    print!("{rendered}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
