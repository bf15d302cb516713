//! Per-edge environmental cost model.
//!
//! Every estimate here is a pure function of an edge's attributes: CO₂ grows
//! linearly with segment length and the ventilation penalty is either the
//! value carried by the edge or a road-class heuristic.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Edge;

/// Default passenger-car emission rate in grams of CO₂ per kilometer.
pub const DEFAULT_EMISSION_RATE_G_PER_KM: f64 = 150.0;

/// Ventilation penalty for well-ventilated streets.
pub const VENTILATION_GOOD: u8 = 1;
/// Ventilation penalty for arterial roads.
pub const VENTILATION_MODERATE: u8 = 2;
/// Ventilation penalty for motorways and tunnels.
pub const VENTILATION_POOR: u8 = 3;

/// Estimated CO₂ emissions in grams for a segment of `length_meters`.
pub fn calculate_co2(length_meters: f64, emission_rate_g_per_km: f64) -> f64 {
    (length_meters / 1000.0) * emission_rate_g_per_km
}

/// Heuristic ventilation penalty for a normalized road class.
///
/// Unknown and missing classes are treated as well ventilated.
pub fn estimate_ventilation(highway: Option<&str>) -> u8 {
    match highway {
        Some("motorway") | Some("tunnel") => VENTILATION_POOR,
        Some("primary") | Some("secondary") => VENTILATION_MODERATE,
        _ => VENTILATION_GOOD,
    }
}

/// Environmental estimates for one edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeCost {
    pub co2_grams: f64,
    pub ventilation: u8,
}

/// Emission parameters applied to every edge of a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub emission_rate_g_per_km: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            emission_rate_g_per_km: DEFAULT_EMISSION_RATE_G_PER_KM,
        }
    }
}

impl CostModel {
    pub fn with_emission_rate(emission_rate_g_per_km: f64) -> Self {
        Self {
            emission_rate_g_per_km,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.emission_rate_g_per_km.is_finite() || self.emission_rate_g_per_km < 0.0 {
            return Err(Error::InvalidParameter {
                name: "emission_rate",
                message: format!(
                    "must be finite and non-negative, got {}",
                    self.emission_rate_g_per_km
                ),
            });
        }
        Ok(())
    }

    pub fn co2(&self, edge: &Edge) -> f64 {
        calculate_co2(edge.length, self.emission_rate_g_per_km)
    }

    /// Explicit penalty when the edge carries one, otherwise the road-class estimate.
    pub fn ventilation(&self, edge: &Edge) -> u8 {
        edge.ventilation_penalty
            .unwrap_or_else(|| estimate_ventilation(edge.highway.as_deref()))
    }

    pub fn edge_cost(&self, edge: &Edge) -> EdgeCost {
        EdgeCost {
            co2_grams: self.co2(edge),
            ventilation: self.ventilation(edge),
        }
    }
}
