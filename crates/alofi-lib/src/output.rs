use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::geo::SnappedNode;
use crate::graph::NodeId;
use crate::routing::RoutePlan;
use crate::scoring::RouteSummaryDisplay;

/// Presentation style for turning a [`RouteReport`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Snapped endpoint of a report.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ReportEndpoint {
    pub node: NodeId,
    /// Distance in meters from the query coordinate to the node.
    pub snap_distance_m: f64,
}

impl From<SnappedNode> for ReportEndpoint {
    fn from(snapped: SnappedNode) -> Self {
        Self {
            node: snapped.node,
            snap_distance_m: (snapped.distance * 10.0).round() / 10.0,
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteRow {
    pub label: String,
    #[serde(flatten)]
    pub metrics: RouteSummaryDisplay,
    #[serde(skip_serializing_if = "is_zero")]
    pub skipped_pairs: usize,
    pub path: Vec<NodeId>,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// Structured representation of a route plan that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteReport {
    pub network: String,
    pub network_label: String,
    pub start: ReportEndpoint,
    pub goal: ReportEndpoint,
    pub requested: usize,
    pub found: usize,
    pub routes: Vec<RouteRow>,
}

impl RouteReport {
    pub fn from_plan(plan: &RoutePlan) -> Self {
        let routes = plan
            .routes
            .iter()
            .map(|planned| RouteRow {
                label: planned.label.clone(),
                metrics: planned.summary.display(),
                skipped_pairs: planned.summary.skipped_pairs,
                path: planned.route.nodes().to_vec(),
            })
            .collect::<Vec<_>>();

        Self {
            network: plan.network.clone(),
            network_label: plan.network_label.clone(),
            start: plan.start.into(),
            goal: plan.goal.into(),
            requested: plan.requested,
            found: routes.len(),
            routes,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.found < self.requested
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn partial_note(&self) -> Option<String> {
        if self.routes.is_empty() {
            Some("no route found between the selected locations".to_string())
        } else if self.is_partial() {
            Some(format!(
                "found {} of {} requested routes",
                self.found, self.requested
            ))
        } else {
            None
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{} ({}): node {} -> node {}",
            self.network_label, self.network, self.start.node, self.goal.node
        );

        for row in &self.routes {
            let m = &row.metrics;
            let _ = writeln!(
                buffer,
                "{}: {} m, {} min, {} g CO2, ventilation {}, score {} ({} nodes)",
                row.label,
                m.distance_m,
                m.travel_time_min,
                m.co2_g,
                m.ventilation_penalty,
                m.sustainability_score,
                m.nodes
            );
            let _ = writeln!(buffer, "  path: {}", join_path(&row.path, " -> "));
        }

        if let Some(note) = self.partial_note() {
            let _ = writeln!(buffer, "note: {note}");
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**{}** (`{}`): node `{}` → node `{}`",
            self.network_label, self.network, self.start.node, self.goal.node
        );
        let _ = writeln!(buffer);
        let _ = writeln!(
            buffer,
            "| Route | Distance (m) | Time (min) | CO₂ (g) | Ventilation | Score |"
        );
        let _ = writeln!(buffer, "|---|---:|---:|---:|---:|---:|");
        for row in &self.routes {
            let m = &row.metrics;
            let _ = writeln!(
                buffer,
                "| {} | {} | {} | {} | {} | {} |",
                row.label,
                m.distance_m,
                m.travel_time_min,
                m.co2_g,
                m.ventilation_penalty,
                m.sustainability_score
            );
        }
        if let Some(note) = self.partial_note() {
            let _ = writeln!(buffer);
            let _ = writeln!(buffer, "_{note}_");
        }
        buffer
    }
}

fn join_path(path: &[NodeId], separator: &str) -> String {
    path.iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}
