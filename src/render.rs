mod entities;
mod layers;

use crate::bounds::{Projection, compute_bounds};
use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::icons::IconStore;
use crate::render_dump::RenderDump;
use crate::snapshot::MapSnapshot;
use resvg::tiny_skia::Pixmap;
use std::path::Path;
use tracing::debug;

/// Renders a snapshot to PNG bytes.
pub fn render_map(snapshot: &MapSnapshot, config: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    let pixmap = render_pixmap(snapshot, config)?;
    encode_png(&pixmap)
}

/// Parses a snapshot document and renders it to PNG bytes.
pub fn render_map_json(input: &str, config: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    let snapshot: MapSnapshot = serde_json::from_str(input)?;
    render_map(&snapshot, config)
}

/// Renders a snapshot to the final, upscaled pixmap without encoding it.
pub fn render_pixmap(snapshot: &MapSnapshot, config: &RenderConfig) -> Result<Pixmap, RenderError> {
    render_scene(snapshot, config).map(|(pixmap, _)| pixmap)
}

/// Renders a snapshot and reports what happened to every layer and entity.
pub fn dump_render(snapshot: &MapSnapshot, config: &RenderConfig) -> Result<RenderDump, RenderError> {
    render_scene(snapshot, config).map(|(_, dump)| dump)
}

/// Renders a snapshot, returning both the final pixmap and its dump.
pub fn render_scene(
    snapshot: &MapSnapshot,
    config: &RenderConfig,
) -> Result<(Pixmap, RenderDump), RenderError> {
    config.validate()?;
    let icons = IconStore::ensure_initialized()?;
    let bounds = compute_bounds(snapshot, config.padding_ratio)?;
    let projection = Projection::new(bounds, snapshot.pixel_size, config.scale);
    let (width, height) = projection.canvas_size();

    let mut canvas = Canvas::new(width, height, config.theme.background)?;
    let layers = layers::paint_layers(&mut canvas, snapshot, &projection, &config.theme);
    let entities = entities::paint_entities(&mut canvas, snapshot, &projection, icons, config);
    let pixmap = canvas.upscale(config.final_upscale)?;

    let dump = RenderDump {
        bounds,
        canvas_width: width,
        canvas_height: height,
        output_width: pixmap.width(),
        output_height: pixmap.height(),
        magnification: config.magnification(),
        layers,
        entities,
    };
    debug!(
        ?bounds,
        width = dump.output_width,
        height = dump.output_height,
        layers = dump.layers.len(),
        entities = dump.entities.len(),
        skipped = dump.skipped_count(),
        "rendered map"
    );
    Ok((pixmap, dump))
}

pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderError> {
    pixmap
        .encode_png()
        .map_err(|err| RenderError::Encode(err.to_string()))
}

pub fn write_output_png(png: &[u8], output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, png)?;
        }
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(png)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::snapshot::{Entity, EntityKind, MapSize};

    fn empty_snapshot() -> MapSnapshot {
        MapSnapshot {
            size: MapSize { x: 1000, y: 600 },
            pixel_size: 5,
            ..Default::default()
        }
    }

    #[test]
    fn empty_map_renders_blank_canvas() {
        let config = RenderConfig::default();
        let pixmap = render_pixmap(&empty_snapshot(), &config).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (1200, 720));
        assert!(pixmap.pixels().iter().all(|px| px.alpha() == 0));
    }

    #[test]
    fn output_is_png() {
        let png = render_map(&empty_snapshot(), &RenderConfig::default()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn dump_lists_items_in_paint_order() {
        let mut snapshot = empty_snapshot();
        snapshot.entities = vec![
            Entity::new(EntityKind::RobotPosition, vec![500, 300]),
            Entity::new(EntityKind::Path, vec![0, 0, 500, 300]),
        ];
        let dump = dump_render(&snapshot, &RenderConfig::default()).unwrap();
        assert_eq!((dump.canvas_width, dump.canvas_height), (400, 240));
        assert_eq!((dump.output_width, dump.output_height), (1200, 720));
        assert_eq!(dump.entities[0].kind, "path");
        assert_eq!(dump.entities[1].kind, "robot_position");
        assert_eq!(dump.skipped_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected_before_drawing() {
        let mut config = RenderConfig::default();
        config.final_upscale = 0.0;
        let err = render_pixmap(&empty_snapshot(), &config).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Config(ConfigError::Invalid { field: "finalUpscale", .. })
        ));

        let mut config = RenderConfig::default();
        config.scale = -2.0;
        let err = render_map(&empty_snapshot(), &config).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Config(ConfigError::Invalid { field: "scale", .. })
        ));
    }

    #[test]
    fn invalid_json_is_a_snapshot_error() {
        let err = render_map_json("{\"size\": 3}", &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Snapshot(_)));
    }
}
