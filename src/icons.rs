use crate::error::AssetError;
use once_cell::sync::OnceCell;
use resvg::tiny_skia::{Pixmap, Transform};
use tracing::debug;

const ROBOT_SVG: &str = include_str!("../assets/robot.svg");
const CHARGER_SVG: &str = include_str!("../assets/charger.svg");

static ICONS: OnceCell<Icons> = OnceCell::new();

/// Rasterized entity icons, shared read-only by every render.
#[derive(Debug)]
pub struct Icons {
    pub robot: Pixmap,
    pub charger: Pixmap,
}

/// Process-wide owner of the bundled icons.
///
/// The first caller rasterizes both icons; concurrent callers block until that
/// finishes and then share the same instance. A failed attempt stores nothing,
/// so the error reaches whoever triggered it.
pub struct IconStore;

impl IconStore {
    pub fn ensure_initialized() -> Result<&'static Icons, AssetError> {
        ICONS.get_or_try_init(|| {
            let icons = Icons {
                robot: rasterize("robot", ROBOT_SVG)?,
                charger: rasterize("charger", CHARGER_SVG)?,
            };
            debug!(
                robot = ?(icons.robot.width(), icons.robot.height()),
                charger = ?(icons.charger.width(), icons.charger.height()),
                "rasterized map icons"
            );
            Ok(icons)
        })
    }
}

fn rasterize(name: &'static str, svg: &str) -> Result<Pixmap, AssetError> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|source| AssetError::Parse { name, source })?;
    let size = tree.size().to_int_size();
    let mut pixmap =
        Pixmap::new(size.width(), size.height()).ok_or(AssetError::EmptyIcon { name })?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
    Ok(pixmap)
}
