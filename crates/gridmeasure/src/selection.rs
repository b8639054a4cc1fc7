use tracing::{debug, warn};

use crate::{
    config::SelectionConfig,
    indexer::ContourIndex,
    session::MeasurementSession,
    types::{Centroid, Click},
};

/// Snaps clicks to the nearest indexed hole within a fixed distance
#[derive(Debug, Clone)]
pub struct PointSelector {
    pub threshold: f64,
}

impl Default for PointSelector {
    fn default() -> Self {
        Self::from(&SelectionConfig::default())
    }
}

impl From<&SelectionConfig> for PointSelector {
    fn from(config: &SelectionConfig) -> Self {
        Self { threshold: config.threshold_distance }
    }
}

impl PointSelector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Nearest centroid strictly closer than the threshold.
    ///
    /// Ties go to the first centroid in index order (lowest `x`, then `y`).
    pub fn nearest(&self, index: &ContourIndex, click: Click) -> Option<Centroid> {
        let mut best: Option<(Centroid, f64)> = None;

        for centroid in index.centroids() {
            let distance = click.distance_to(centroid);
            if best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((centroid, distance));
            }
        }

        best.filter(|&(_, distance)| distance < self.threshold)
            .map(|(centroid, _)| centroid)
    }

    /// Resolve a click and record it in the session when accepted.
    /// Rejected clicks leave the session untouched.
    pub fn select(
        &self,
        index: &ContourIndex,
        session: &mut MeasurementSession,
        click: Click,
    ) -> Option<Centroid> {
        match self.nearest(index, click) {
            Some(centroid) => {
                let phase = session.record(centroid);
                debug!(x = centroid.x, y = centroid.y, %phase, "selected hole");
                Some(centroid)
            }
            None => {
                warn!(x = click.x, y = click.y, "Point is too far away!");
                None
            }
        }
    }
}
