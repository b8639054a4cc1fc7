use image::GrayImage;
use imageproc::contours::BorderType;
use crate::{error::Result, traits::ContourExtractor, types::Contour};

/// Imageproc-based extractor that keeps only outermost borders.
///
/// Hole borders and anything nested inside another blob are dropped.
#[derive(Debug, Clone, Default)]
pub struct ExternalContourExtractor;

impl ContourExtractor for ExternalContourExtractor {
    fn extract_contours(&self, edges: &GrayImage) -> Result<Vec<Contour>> {
        let contours = imageproc::contours::find_contours::<i32>(edges);

        let result = contours
            .into_iter()
            .filter(|contour| contour.parent.is_none() && contour.border_type == BorderType::Outer)
            .map(|contour| {
                Contour::new(contour.points.iter().map(|p| [p.x, p.y]).collect())
            })
            .collect();

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn ring_image() -> GrayImage {
        // A 1px square ring at 5..=14 with a filled square nested inside it
        let mut img = GrayImage::new(30, 30);
        for i in 5..=14 {
            img.put_pixel(i, 5, Luma([255u8]));
            img.put_pixel(i, 14, Luma([255u8]));
            img.put_pixel(5, i, Luma([255u8]));
            img.put_pixel(14, i, Luma([255u8]));
        }
        for y in 8..=11 {
            for x in 8..=11 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        // A separate blob elsewhere
        for y in 20..=23 {
            for x in 20..=23 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        img
    }

    #[test]
    fn test_only_external_contours_are_kept() {
        let contours = ExternalContourExtractor.extract_contours(&ring_image()).unwrap();
        assert_eq!(contours.len(), 2);
    }

    #[test]
    fn test_empty_image_has_no_contours() {
        let contours = ExternalContourExtractor
            .extract_contours(&GrayImage::new(10, 10))
            .unwrap();
        assert!(contours.is_empty());
    }
}
