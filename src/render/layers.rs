use crate::bounds::Projection;
use crate::canvas::Canvas;
use crate::decode::decode_cells;
use crate::render_dump::{ItemDump, ItemStatus};
use crate::snapshot::{LayerKind, MapSnapshot};
use crate::theme::{Rgba, Theme};
use tracing::{trace, warn};

fn layer_color(kind: LayerKind, theme: &Theme) -> Option<Rgba> {
    match kind {
        LayerKind::Floor => Some(theme.floor),
        LayerKind::Segment => Some(theme.segment),
        LayerKind::Wall => Some(theme.wall),
        LayerKind::Unknown => None,
    }
}

/// Paints every layer bottom-up: floor, then segments, then walls.
pub(super) fn paint_layers(
    canvas: &mut Canvas,
    snapshot: &MapSnapshot,
    projection: &Projection,
    theme: &Theme,
) -> Vec<ItemDump> {
    let mut ordered: Vec<_> = snapshot.layers.iter().enumerate().collect();
    ordered.sort_by_key(|(_, layer)| layer.kind.z_order());

    let side = projection.scale;
    let mut report = Vec::with_capacity(ordered.len());
    for (index, layer) in ordered {
        let kind = layer.kind.as_str();
        let Some(color) = layer_color(layer.kind, theme) else {
            report.push(ItemDump {
                index,
                kind,
                status: ItemStatus::Unsupported,
                cells: None,
                reason: None,
            });
            continue;
        };

        let cells = match decode_cells(layer) {
            Ok(cells) => cells,
            Err(err) => {
                warn!(index, kind, %err, "skipping malformed layer");
                report.push(ItemDump {
                    index,
                    kind,
                    status: ItemStatus::Skipped,
                    cells: None,
                    reason: Some(err.to_string()),
                });
                continue;
            }
        };

        let mut painted = 0usize;
        for (x, y) in cells {
            let (left, top) = projection.cell_origin(x, y);
            canvas.fill_square(left, top, side, color);
            painted += 1;
        }
        trace!(index, kind, cells = painted, "painted layer");
        report.push(ItemDump {
            index,
            kind,
            status: if painted == 0 {
                ItemStatus::Empty
            } else {
                ItemStatus::Painted
            },
            cells: Some(painted),
            reason: None,
        });
    }
    report
}
