use crate::bounds::Bounds;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// What a single render did, in paint order.
#[derive(Debug, Clone, Serialize)]
pub struct RenderDump {
    pub bounds: Bounds,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub output_width: u32,
    pub output_height: u32,
    /// Output pixels per grid cell.
    pub magnification: f32,
    pub layers: Vec<ItemDump>,
    pub entities: Vec<ItemDump>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDump {
    /// Position in the snapshot's input array.
    pub index: usize,
    pub kind: &'static str,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Painted,
    /// Valid but nothing to draw, e.g. a path with a single point.
    Empty,
    /// Malformed coordinates.
    Skipped,
    /// Type the renderer does not draw.
    Unsupported,
}

impl RenderDump {
    pub fn skipped_count(&self) -> usize {
        self.layers
            .iter()
            .chain(&self.entities)
            .filter(|item| item.status == ItemStatus::Skipped)
            .count()
    }
}

pub fn write_render_dump(path: &Path, dump: &RenderDump) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dump)?;
    Ok(())
}
