use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr, VariantNames};

use crate::{
    config::MeasureConfig,
    error::MeasureError,
    indexer::ContourIndex,
    selection::PointSelector,
    session::{MeasurementSession, SessionPhase},
    types::{Centroid, Click},
};

/// User actions the presentation shell forwards to the core
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UiEvent {
    /// Enter measure mode
    Measure,
    /// Left click on the image, in image pixels
    Click { x: i32, y: i32 },
    /// Leave measure mode and forget all selections
    Clear,
    /// Write the visit history to the configured export file
    Generate,
}

impl UiEvent {
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(UiEvent)
    }

    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }
}

/// Parses the one-line form used by the terminal shell:
/// `measure`, `click X Y`, `clear`, `generate`.
impl FromStr for UiEvent {
    type Err = MeasureError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let invalid = || MeasureError::InvalidCommand(format!("'{}'", line.trim()));

        match (command.as_str(), args.as_slice()) {
            ("measure", []) => Ok(Self::Measure),
            ("clear", []) => Ok(Self::Clear),
            ("generate", []) => Ok(Self::Generate),
            ("click", [x, y]) => {
                let x = x.parse().map_err(|_| invalid())?;
                let y = y.parse().map_err(|_| invalid())?;
                Ok(Self::Click { x, y })
            }
            _ => Err(invalid()),
        }
    }
}

/// What the shell should do after an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum UiEffect {
    None,
    /// Click arrived while measure mode was off
    Ignored,
    /// Click did not land near any hole
    TooFar { click: Click },
    /// Outline the first hole of a pair
    HighlightContour { centroid: Centroid },
    /// Connect the pair and show the scaled distance
    DrawLine { from: Centroid, to: Centroid, readout: f64 },
    /// Restore the unmarked image
    Cleared,
    /// Export the visit history
    Export,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub measure_mode: bool,
    pub session: MeasurementSession,
}

impl AppState {
    pub fn new(scale: f64) -> Self {
        Self {
            measure_mode: false,
            session: MeasurementSession::new(scale),
        }
    }
}

/// Event handling over a fixed hole index
pub struct Controller {
    index: ContourIndex,
    selector: PointSelector,
}

impl Controller {
    pub fn new(index: ContourIndex, selector: PointSelector) -> Self {
        Self { index, selector }
    }

    pub fn from_config(index: ContourIndex, config: &MeasureConfig) -> Self {
        Self::new(index, PointSelector::from(&config.selection))
    }

    pub fn index(&self) -> &ContourIndex {
        &self.index
    }

    pub fn handle(&self, event: UiEvent, mut state: AppState) -> (AppState, UiEffect) {
        let effect = match event {
            UiEvent::Measure => {
                state.measure_mode = true;
                UiEffect::None
            }
            UiEvent::Click { .. } if !state.measure_mode => UiEffect::Ignored,
            UiEvent::Click { x, y } => self.click(Click::new(x, y), &mut state.session),
            UiEvent::Clear => {
                state.measure_mode = false;
                state.session.reset();
                UiEffect::Cleared
            }
            UiEvent::Generate => UiEffect::Export,
        };
        (state, effect)
    }

    fn click(&self, click: Click, session: &mut MeasurementSession) -> UiEffect {
        let Some(centroid) = self.selector.select(&self.index, session, click) else {
            return UiEffect::TooFar { click };
        };

        match (session.phase(), session.pair(), session.scaled_distance()) {
            (SessionPhase::PairComplete, Some((from, to)), Ok(distance)) => UiEffect::DrawLine {
                from,
                to,
                readout: round_readout(distance),
            },
            _ => UiEffect::HighlightContour { centroid },
        }
    }
}

/// Distance readout rounded to four decimal places
pub fn round_readout(distance: f64) -> f64 {
    (distance * 10_000.0).round() / 10_000.0
}
