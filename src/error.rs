use thiserror::Error;

/// Malformed coordinate arrays on a single layer or entity.
///
/// These never abort a render: the offending item is skipped and the rest of
/// the map is still painted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("pixels array has odd length {0}")]
    OddPixelCount(usize),
    #[error("compressedPixels length {0} is not a multiple of 3")]
    CompressedPixelCount(usize),
    #[error("points array has odd length {0}")]
    OddPointCount(usize),
    #[error("entity has no points")]
    MissingPoints,
}

/// The bundled icons could not be rasterized.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to parse {name} icon: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: usvg::Error,
    },
    #[error("{name} icon has an empty size")]
    EmptyIcon { name: &'static str },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pixel size must be positive, got {0}")]
    InvalidPixelSize(i32),
    #[error("failed to allocate a {width}x{height} canvas")]
    Allocation { width: u32, height: u32 },
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("failed to encode PNG: {0}")]
    Encode(String),
    #[error("invalid map snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: f32 },
}
