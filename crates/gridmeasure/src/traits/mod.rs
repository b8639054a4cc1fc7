use image::GrayImage;
use crate::{error::Result, types::Contour};

/// Trait for edge detection algorithms
pub trait EdgeDetector: Send + Sync {
    /// Produce a binary edge map (non-zero = edge) from a grayscale image
    fn detect_edges(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract the contours to index from a binary edge map
    fn extract_contours(&self, edges: &GrayImage) -> Result<Vec<Contour>>;
}
