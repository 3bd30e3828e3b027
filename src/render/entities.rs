use crate::bounds::Projection;
use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::error::FormatError;
use crate::icons::Icons;
use crate::render_dump::{ItemDump, ItemStatus};
use crate::snapshot::{Entity, EntityKind, MapSnapshot};
use resvg::tiny_skia::Transform;
use tracing::warn;

/// Paints entities bottom-up: paths, predicted paths, the dock, then the robot.
pub(super) fn paint_entities(
    canvas: &mut Canvas,
    snapshot: &MapSnapshot,
    projection: &Projection,
    icons: &Icons,
    config: &RenderConfig,
) -> Vec<ItemDump> {
    let mut ordered: Vec<_> = snapshot.entities.iter().enumerate().collect();
    ordered.sort_by_key(|(_, entity)| entity.kind.z_order());

    let mut report = Vec::with_capacity(ordered.len());
    for (index, entity) in ordered {
        let kind = entity.kind.as_str();
        let (status, reason) = match paint_entity(canvas, entity, projection, icons, config) {
            Ok(status) => (status, None),
            Err(err) => {
                warn!(index, kind, %err, "skipping malformed entity");
                (ItemStatus::Skipped, Some(err.to_string()))
            }
        };
        report.push(ItemDump {
            index,
            kind,
            status,
            cells: None,
            reason,
        });
    }
    report
}

fn paint_entity(
    canvas: &mut Canvas,
    entity: &Entity,
    projection: &Projection,
    icons: &Icons,
    config: &RenderConfig,
) -> Result<ItemStatus, FormatError> {
    match entity.kind {
        EntityKind::ChargerLocation => {
            let (x_mm, y_mm) = entity.anchor()?;
            let (x, y) = projection.project(x_mm, y_mm);
            canvas.draw_centered(&icons.charger, x, y);
            Ok(ItemStatus::Painted)
        }
        EntityKind::RobotPosition => {
            let (x_mm, y_mm) = entity.anchor()?;
            let (x, y) = projection.project(x_mm, y_mm);
            // rotate about the same whole-unit point draw_centered places the icon on
            let (x, y) = (x.floor(), y.floor());
            let rotation = entity
                .metadata
                .angle
                .map(|angle| Transform::from_rotate_at(angle, x, y))
                .unwrap_or_default();
            let mut scope = canvas.scoped_transform(rotation);
            scope.draw_centered(&icons.robot, x, y);
            Ok(ItemStatus::Painted)
        }
        EntityKind::Path | EntityKind::PredictedPath => {
            let points: Vec<(f32, f32)> = entity
                .point_pairs()?
                .map(|(x_mm, y_mm)| projection.project(x_mm, y_mm))
                .collect();
            if points.len() < 2 {
                return Ok(ItemStatus::Empty);
            }
            let color = if entity.kind == EntityKind::Path {
                config.theme.path
            } else {
                config.theme.predicted_path
            };
            canvas.stroke_polyline(&points, config.path_width, color);
            Ok(ItemStatus::Painted)
        }
        EntityKind::Unknown => Ok(ItemStatus::Unsupported),
    }
}
