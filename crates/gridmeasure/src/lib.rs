//! # Perforated Grid Measurement Library
//!
//! Detects the holes of a perforated panel in a photograph, snaps user clicks
//! to the nearest hole, measures the distance between two chosen holes and
//! exports every visited hole to a flat file.
//!
//! ## Core Features
//!
//! - **Hole Indexing**: Canny edges → external contours → centroid map, filtered by area
//! - **Snap-to-Hole Selection**: nearest indexed centroid within a fixed distance
//! - **Measurement Session**: two-point pair, scaled distance and visit history
//! - **Pure Event Handling**: `(UiEvent, AppState) -> (AppState, UiEffect)`
//! - **Export**: NumPy, CSV and TSV writers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gridmeasure::{AppState, ContourIndexer, Controller, PointSelector, UiEvent};
//!
//! let image = image::open("grid.png")?;
//! let index = ContourIndexer::default().index(&image)?;
//! let controller = Controller::new(index, PointSelector::default());
//!
//! let state = AppState::new(0.5);
//! let (state, _) = controller.handle(UiEvent::Measure, state);
//! let (state, effect) = controller.handle(UiEvent::Click { x: 120, y: 48 }, state);
//! println!("{effect:?}, visited {}", state.session.visited().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod traits;
pub mod algorithms;
pub mod indexer;
pub mod selection;
pub mod session;
pub mod controller;
pub mod export;
pub mod render;
pub mod io;

// Re-exports for convenience
pub use error::{MeasureError, Result};
pub use types::{Centroid, Click, Contour};
pub use config::{DetectionConfig, MeasureConfig, SelectionConfig, StartupConfig};
pub use traits::*;
pub use algorithms::*;
pub use indexer::{ContourIndex, ContourIndexer, builder::IndexerBuilder};
pub use selection::PointSelector;
pub use session::{MeasurementSession, SessionPhase};
pub use controller::{AppState, Controller, UiEffect, UiEvent};
pub use export::{ExportFormat, ExportWriter};
