pub mod bounds;
pub mod canvas;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod icons;
pub mod render;
pub mod render_dump;
pub mod snapshot;
pub mod theme;

pub use config::{RenderConfig, load_config};
pub use error::{AssetError, ConfigError, FormatError, RenderError};
pub use render::{dump_render, encode_png, render_map, render_map_json, render_pixmap, render_scene};
pub use snapshot::{Entity, EntityKind, Layer, LayerKind, MapSnapshot};
pub use theme::{Rgba, Theme};

#[cfg(feature = "cli")]
pub use cli::run;
