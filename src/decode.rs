use crate::error::FormatError;
use crate::snapshot::Layer;

/// Lazily enumerates the occupied grid cells of a layer.
///
/// Raw `pixels` pairs come first, followed by the expansion of every
/// `(startX, y, count)` run in `compressedPixels`. Array lengths are checked
/// up front so iteration never reads past either slice.
pub fn decode_cells(layer: &Layer) -> Result<impl Iterator<Item = (i32, i32)> + '_, FormatError> {
    check_lengths(layer)?;
    let raw = layer.pixels.chunks_exact(2).map(|pair| (pair[0], pair[1]));
    let runs = layer
        .compressed_pixels
        .chunks_exact(3)
        .flat_map(|run| expand_run(run[0], run[1], run[2]));
    Ok(raw.chain(runs))
}

fn check_lengths(layer: &Layer) -> Result<(), FormatError> {
    if layer.pixels.len() % 2 != 0 {
        return Err(FormatError::OddPixelCount(layer.pixels.len()));
    }
    if layer.compressed_pixels.len() % 3 != 0 {
        return Err(FormatError::CompressedPixelCount(layer.compressed_pixels.len()));
    }
    Ok(())
}

fn expand_run(start_x: i32, y: i32, count: i32) -> impl Iterator<Item = (i32, i32)> {
    (0..count.max(0)).map(move |offset| (start_x.saturating_add(offset), y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::LayerKind;

    fn layer(pixels: Vec<i32>, compressed: Vec<i32>) -> Layer {
        let mut layer = Layer::new(LayerKind::Floor);
        layer.pixels = pixels;
        layer.compressed_pixels = compressed;
        layer
    }

    fn cells(layer: &Layer) -> Vec<(i32, i32)> {
        decode_cells(layer).unwrap().collect()
    }

    #[test]
    fn expands_compressed_run() {
        let layer = layer(Vec::new(), vec![5, 10, 3]);
        assert_eq!(cells(&layer), vec![(5, 10), (6, 10), (7, 10)]);
    }

    #[test]
    fn reads_raw_pairs() {
        let layer = layer(vec![2, 3, 4, 5], Vec::new());
        assert_eq!(cells(&layer), vec![(2, 3), (4, 5)]);
    }

    #[test]
    fn empty_arrays_decode_to_nothing() {
        let layer = layer(Vec::new(), Vec::new());
        assert!(cells(&layer).is_empty());
    }

    #[test]
    fn mixes_raw_and_compressed() {
        let layer = layer(vec![0, 0], vec![1, 1, 2, 7, 2, 1]);
        assert_eq!(cells(&layer), vec![(0, 0), (1, 1), (2, 1), (7, 2)]);
    }

    #[test]
    fn non_positive_run_is_empty() {
        let layer = layer(Vec::new(), vec![5, 10, 0, 6, 11, -4]);
        assert!(cells(&layer).is_empty());
    }

    #[test]
    fn rejects_truncated_arrays() {
        let odd = layer(vec![1, 2, 3], Vec::new());
        assert_eq!(decode_cells(&odd).err(), Some(FormatError::OddPixelCount(3)));
        let short = layer(Vec::new(), vec![5, 10, 3, 6]);
        assert_eq!(decode_cells(&short).err(), Some(FormatError::CompressedPixelCount(4)));
    }
}
