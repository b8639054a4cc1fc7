use image::GrayImage;
use crate::{config::DetectionConfig, error::Result, traits::EdgeDetector};

/// Canny edge detector with fixed hysteresis thresholds
#[derive(Debug, Clone)]
pub struct CannyEdgeDetector {
    pub low: f32,
    pub high: f32,
}

impl Default for CannyEdgeDetector {
    fn default() -> Self {
        Self::from(&DetectionConfig::default())
    }
}

impl From<&DetectionConfig> for CannyEdgeDetector {
    fn from(config: &DetectionConfig) -> Self {
        Self {
            low: config.canny_low,
            high: config.canny_high,
        }
    }
}

impl EdgeDetector for CannyEdgeDetector {
    fn detect_edges(&self, image: &GrayImage) -> Result<GrayImage> {
        Ok(imageproc::edges::canny(image, self.low, self.high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_flat_image_has_no_edges() {
        let image = GrayImage::from_pixel(32, 32, Luma([200u8]));
        let edges = CannyEdgeDetector::default().detect_edges(&image).unwrap();
        assert!(edges.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_step_produces_edges() {
        let mut image = GrayImage::from_pixel(32, 32, Luma([255u8]));
        for y in 0..32 {
            for x in 16..32 {
                image.put_pixel(x, y, Luma([0u8]));
            }
        }
        let edges = CannyEdgeDetector::default().detect_edges(&image).unwrap();
        assert!(edges.pixels().any(|p| p[0] > 0));
    }
}
