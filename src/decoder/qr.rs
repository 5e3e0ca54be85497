use std::path::Path;

use crate::decoder::DecodeError;

/// Decode every QR code found in the image at `path`.
///
/// Grids that are detected but fail to decode are skipped.
pub(super) fn decode_image_file(path: &Path) -> Result<Vec<String>, DecodeError> {
    let luma = ::image::open(path)
        .map_err(|source| DecodeError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_luma8();

    let (width, height) = luma.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            luma.get_pixel(x as u32, y as u32).0[0]
        });

    let mut payloads = Vec::new();
    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_, content)) => payloads.push(content),
            Err(err) => tracing::debug!(path = %path.display(), "skipping undecodable QR grid: {err}"),
        }
    }

    tracing::debug!(path = %path.display(), found = payloads.len(), "decoded image");
    Ok(payloads)
}
