use crate::{
    algorithms::{CannyEdgeDetector, ExternalContourExtractor},
    config::DetectionConfig,
    indexer::ContourIndexer,
    traits::{ContourExtractor, EdgeDetector},
};

/// Builder for [`ContourIndexer`] with a fluent API
pub struct IndexerBuilder {
    edge_detector: Option<Box<dyn EdgeDetector>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    max_area: f64,
}

impl IndexerBuilder {
    pub fn new() -> Self {
        Self {
            edge_detector: None,
            contour_extractor: None,
            max_area: DetectionConfig::default().max_area,
        }
    }

    /// Canny thresholds and area bound taken from a detection config
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new()
            .set_edge_detector(CannyEdgeDetector::from(config))
            .with_max_area(config.max_area)
    }

    /// Set the edge detector (replaces any existing one)
    pub fn set_edge_detector<E>(mut self, detector: E) -> Self
    where
        E: EdgeDetector + 'static,
    {
        self.edge_detector = Some(Box::new(detector));
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<C>(mut self, extractor: C) -> Self
    where
        C: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    pub fn with_max_area(mut self, max_area: f64) -> Self {
        self.max_area = max_area;
        self
    }

    /// Build the indexer with default components if not specified
    pub fn build(self) -> ContourIndexer {
        let edge_detector = self.edge_detector
            .unwrap_or_else(|| Box::new(CannyEdgeDetector::default()));

        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ExternalContourExtractor));

        ContourIndexer::new(edge_detector, contour_extractor, self.max_area)
    }
}

impl Default for IndexerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Result, types::Contour};
    use image::{DynamicImage, GrayImage};

    struct FixedContours(Vec<Contour>);

    impl ContourExtractor for FixedContours {
        fn extract_contours(&self, _edges: &GrayImage) -> Result<Vec<Contour>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_custom_extractor_and_area() {
        let contours = vec![
            Contour::new(vec![[0, 0], [6, 0], [6, 6], [0, 6]]),
            Contour::new(vec![[20, 20], [22, 20], [22, 22], [20, 22]]),
        ];
        let indexer = IndexerBuilder::new()
            .set_contour_extractor(FixedContours(contours))
            .with_max_area(10.0)
            .build();

        let index = indexer.index(&DynamicImage::new_rgb8(30, 30)).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.centroids().next().map(|c| (c.x, c.y)), Some((21, 21)));
    }

    #[test]
    fn test_from_config_uses_area_bound() {
        let config = DetectionConfig { max_area: 42.0, ..Default::default() };
        assert_eq!(IndexerBuilder::from_config(&config).build().max_area(), 42.0);
    }
}
