use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::schedule::ConnectionGraph;

/// Writes the connection graph as the flat JSON record the route finder
/// reads. Node and edge order follow route processing order, so identical
/// input produces a byte-identical file.
pub fn save_graph(path: &Path, graph: &ConnectionGraph) -> Result<()> {
    let json = serde_json::to_string(graph)?;

    fs::write(path, json).with_context(|| format!("writing the graph to {}", path.display()))?;

    Ok(())
}
