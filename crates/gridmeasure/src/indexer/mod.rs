pub mod builder;

use std::collections::BTreeMap;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    traits::{ContourExtractor, EdgeDetector},
    types::{Centroid, Contour},
};

/// Centroid → contour mapping built once per loaded image.
///
/// Iteration is in ascending `(x, y)` order, which also fixes the tie-break
/// for nearest-hole lookups.
#[derive(Debug, Clone, Default)]
pub struct ContourIndex {
    holes: BTreeMap<Centroid, Contour>,
    image_width: u32,
    image_height: u32,
}

impl ContourIndex {
    /// Index raw contours, keeping those with a defined centroid and an
    /// area strictly below `max_area`. Duplicate centroids overwrite.
    pub fn from_contours<I>(contours: I, max_area: f64) -> Self
    where
        I: IntoIterator<Item = Contour>,
    {
        let mut holes = BTreeMap::new();
        let mut skipped = 0usize;

        for contour in contours {
            let area = contour.area();
            let Some(centroid) = contour.centroid() else {
                skipped += 1;
                continue;
            };
            if area >= max_area {
                skipped += 1;
                continue;
            }
            debug!(x = centroid.x, y = centroid.y, area, "indexed hole");
            holes.insert(centroid, contour);
        }

        debug!(indexed = holes.len(), skipped, "contour indexing finished");

        Self {
            holes,
            image_width: 0,
            image_height: 0,
        }
    }

    fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    pub fn len(&self) -> usize {
        self.holes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    pub fn get(&self, centroid: &Centroid) -> Option<&Contour> {
        self.holes.get(centroid)
    }

    pub fn centroids(&self) -> impl Iterator<Item = Centroid> + '_ {
        self.holes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Centroid, &Contour)> {
        self.holes.iter()
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }
}

/// Runs grayscale conversion, edge detection and contour extraction, then
/// builds a [`ContourIndex`]
pub struct ContourIndexer {
    edge_detector: Box<dyn EdgeDetector>,
    contour_extractor: Box<dyn ContourExtractor>,
    max_area: f64,
}

impl ContourIndexer {
    pub fn builder() -> builder::IndexerBuilder {
        builder::IndexerBuilder::new()
    }

    pub fn new(
        edge_detector: Box<dyn EdgeDetector>,
        contour_extractor: Box<dyn ContourExtractor>,
        max_area: f64,
    ) -> Self {
        Self {
            edge_detector,
            contour_extractor,
            max_area,
        }
    }

    pub fn max_area(&self) -> f64 {
        self.max_area
    }

    pub fn index(&self, image: &DynamicImage) -> Result<ContourIndex> {
        let gray = image.to_luma8();
        let edges = self.edge_detector.detect_edges(&gray)?;
        let contours = self.contour_extractor.extract_contours(&edges)?;
        debug!(contours = contours.len(), "extracted external contours");

        let index = ContourIndex::from_contours(contours, self.max_area)
            .with_dimensions(image.width(), image.height());

        if index.is_empty() {
            warn!("No contours detected! Clicks will not snap to any hole");
        } else {
            info!("Indexed {} holes", index.len());
        }

        Ok(index)
    }
}

impl Default for ContourIndexer {
    fn default() -> Self {
        Self::builder().build()
    }
}
