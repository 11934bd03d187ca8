use crate::error::{GenerationError, Result};
use image::{imageops, imageops::FilterType, DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;

pub const CELL_SIZE: u32 = 512;
pub const GRID_SIZE: u32 = CELL_SIZE * 2;

/// Top-left corner of the cell holding the image at `index` (row-major).
pub fn cell_origin(index: usize) -> (u32, u32) {
    let col = (index % 2) as u32;
    let row = (index / 2) as u32;
    (col * CELL_SIZE, row * CELL_SIZE)
}

/// Paste four images into a 2x2 mosaic. Each is stretched to exactly one cell.
pub fn compose_grid(images: &[DynamicImage; 4]) -> RgbImage {
    let mut canvas = RgbImage::new(GRID_SIZE, GRID_SIZE);

    for (index, image) in images.iter().enumerate() {
        let cell = imageops::resize(
            &image.to_rgb8(),
            CELL_SIZE,
            CELL_SIZE,
            FilterType::CatmullRom,
        );
        let (x, y) = cell_origin(index);
        imageops::replace(&mut canvas, &cell, i64::from(x), i64::from(y));
    }

    canvas
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| GenerationError::EncodeError(e.to_string()))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_cell_origins() {
        assert_eq!(cell_origin(0), (0, 0));
        assert_eq!(cell_origin(1), (512, 0));
        assert_eq!(cell_origin(2), (0, 512));
        assert_eq!(cell_origin(3), (512, 512));
    }

    #[test]
    fn test_grid_places_each_phase_in_its_cell() {
        let red = [200, 0, 0];
        let green = [0, 200, 0];
        let blue = [0, 0, 200];
        let white = [255, 255, 255];
        let images = [
            solid(1024, 1024, red),
            solid(300, 200, green),
            solid(64, 64, blue),
            solid(512, 700, white),
        ];

        let grid = compose_grid(&images);
        assert_eq!(grid.dimensions(), (1024, 1024));

        assert_eq!(grid.get_pixel(0, 0), &Rgb(red));
        assert_eq!(grid.get_pixel(511, 511), &Rgb(red));
        assert_eq!(grid.get_pixel(512, 0), &Rgb(green));
        assert_eq!(grid.get_pixel(1023, 511), &Rgb(green));
        assert_eq!(grid.get_pixel(0, 512), &Rgb(blue));
        assert_eq!(grid.get_pixel(511, 1023), &Rgb(blue));
        assert_eq!(grid.get_pixel(512, 512), &Rgb(white));
        assert_eq!(grid.get_pixel(1023, 1023), &Rgb(white));
    }

    #[test]
    fn test_encode_png_round_trips_dimensions() {
        let png = encode_png(&solid(16, 9, [1, 2, 3])).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 9));
    }
}
