//! Output formatting for CLI commands.
//!
//! Every command renders in two modes: human-readable text (with colors,
//! see [`color`]) and JSON for programmatic use (`--json`).

pub mod color;

use crate::domain::{DependencyEdge, Neighborhood, WorkItemRef};
use serde::Serialize;
use std::fmt::Write as _;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Text,

    /// Pretty-printed JSON.
    Json,
}

/// Print any serializable value as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize>(value: &T) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a chain of items as `a -> b -> c`.
#[must_use]
pub fn format_chain(items: &[WorkItemRef]) -> String {
    items
        .iter()
        .map(WorkItemRef::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Render one edge as `source --[type]--> target` with styling.
#[must_use]
pub fn format_edge(edge: &DependencyEdge) -> String {
    format!(
        "{} --[{}]--> {}",
        color::item_id(edge.source.as_str()),
        color::relationship(edge.relationship),
        color::item_id(edge.target.as_str())
    )
}

/// Render a neighborhood as rings of items followed by the edge list.
#[must_use]
pub fn render_neighborhood(hood: &Neighborhood) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Neighborhood of {}:", color::item_id(hood.focus.as_str()));

    let max_ring = hood.nodes.iter().map(|n| n.ring).max().unwrap_or(0);
    for ring in 0..=max_ring {
        let members: Vec<&str> = hood
            .nodes
            .iter()
            .filter(|n| n.ring == ring)
            .map(|n| n.item.as_str())
            .collect();
        if members.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  ring {}: {}", ring, members.join(", "));
    }

    if hood.edges.is_empty() {
        let _ = writeln!(out, "  (no visible edges)");
    } else {
        let _ = writeln!(out, "  edges ({}):", hood.edges.len());
        for edge in &hood.edges {
            let _ = writeln!(out, "    {}", format_edge(edge));
        }
    }

    out
}
