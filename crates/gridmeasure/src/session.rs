use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::{
    error::{MeasureError, Result},
    types::Centroid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize, Deserialize, JsonSchema)]
#[strum(serialize_all = "snake_case")]
pub enum SessionPhase {
    /// No point selected
    Idle,
    /// First point selected, waiting for the second
    FirstSet,
    /// Both points selected, distance is available
    PairComplete,
}

/// Two-point measurement plus the history of every accepted selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MeasurementSession {
    first: Option<Centroid>,
    second: Option<Centroid>,
    visited: Vec<Centroid>,
    scale: f64,
}

impl MeasurementSession {
    /// `scale` is the real-world distance per pixel. It is not validated here;
    /// see [`crate::config::MeasureConfig::validate`].
    pub fn new(scale: f64) -> Self {
        Self {
            first: None,
            second: None,
            visited: Vec::new(),
            scale,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.first, self.second) {
            (Some(_), Some(_)) => SessionPhase::PairComplete,
            (Some(_), None) => SessionPhase::FirstSet,
            _ => SessionPhase::Idle,
        }
    }

    /// Record an accepted selection.
    ///
    /// A selection made while a pair is complete starts a new pair; the
    /// history keeps every accepted point regardless.
    pub fn record(&mut self, centroid: Centroid) -> SessionPhase {
        self.visited.push(centroid);
        match self.phase() {
            SessionPhase::Idle | SessionPhase::PairComplete => {
                self.first = Some(centroid);
                self.second = None;
            }
            SessionPhase::FirstSet => {
                self.second = Some(centroid);
            }
        }
        self.phase()
    }

    pub fn first(&self) -> Option<Centroid> {
        self.first
    }

    pub fn second(&self) -> Option<Centroid> {
        self.second
    }

    pub fn pair(&self) -> Option<(Centroid, Centroid)> {
        self.first.zip(self.second)
    }

    pub fn visited(&self) -> &[Centroid] {
        &self.visited
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixel distance between the two selected points
    pub fn distance(&self) -> Result<f64> {
        let (first, second) = self.pair().ok_or_else(|| {
            MeasureError::InvalidState(format!(
                "distance requires two selected points, session is {}",
                self.phase()
            ))
        })?;
        Ok(first.distance_to(second))
    }

    pub fn scaled_distance(&self) -> Result<f64> {
        Ok(self.distance()? * self.scale)
    }

    /// Clear both points and the visit history
    pub fn reset(&mut self) {
        self.first = None;
        self.second = None;
        self.visited.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_follow_selections() {
        let mut session = MeasurementSession::new(1.0);
        assert_eq!(session.phase(), SessionPhase::Idle);

        assert_eq!(session.record(Centroid::new(1, 1)), SessionPhase::FirstSet);
        assert_eq!(session.record(Centroid::new(4, 5)), SessionPhase::PairComplete);
        assert_eq!(session.distance().unwrap(), 5.0);
    }

    #[test]
    fn test_distance_requires_pair() {
        let mut session = MeasurementSession::new(2.0);
        assert!(matches!(session.distance(), Err(MeasureError::InvalidState(_))));

        session.record(Centroid::new(0, 0));
        assert!(matches!(session.scaled_distance(), Err(MeasureError::InvalidState(_))));
    }

    #[test]
    fn test_third_selection_starts_new_pair() {
        let mut session = MeasurementSession::new(1.0);
        session.record(Centroid::new(0, 0));
        session.record(Centroid::new(0, 10));

        assert_eq!(session.record(Centroid::new(20, 20)), SessionPhase::FirstSet);
        assert_eq!(session.first(), Some(Centroid::new(20, 20)));
        assert_eq!(session.second(), None);
        assert_eq!(session.visited().len(), 3);
    }

    #[test]
    fn test_scaled_distance_and_symmetry() {
        let a = Centroid::new(3, 7);
        let b = Centroid::new(11, 2);

        let mut forward = MeasurementSession::new(0.25);
        forward.record(a);
        forward.record(b);

        let mut backward = MeasurementSession::new(0.25);
        backward.record(b);
        backward.record(a);

        let d = forward.distance().unwrap();
        assert_eq!(d, backward.distance().unwrap());
        assert!((forward.scaled_distance().unwrap() - d * 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_history_is_not_deduplicated() {
        let mut session = MeasurementSession::new(1.0);
        let point = Centroid::new(2, 2);
        session.record(point);
        session.record(point);
        assert_eq!(session.distance().unwrap(), 0.0);

        assert_eq!(session.record(point), SessionPhase::FirstSet);
        assert_eq!(session.visited(), &[point, point, point]);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut session = MeasurementSession::new(3.0);
        session.record(Centroid::new(1, 2));
        session.record(Centroid::new(3, 4));
        session.reset();

        assert_eq!(session, MeasurementSession::new(3.0));
        assert_eq!(session.phase(), SessionPhase::Idle);
    }
}
