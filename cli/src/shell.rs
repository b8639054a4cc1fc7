use std::path::{Path, PathBuf};

use gridmeasure::{
    AppState, Controller, ExportFormat, ExportWriter, IndexerBuilder, MeasureConfig, UiEffect,
    UiEvent, render,
};
use image::{Rgb, RgbImage};
use tracing::{error, info};

pub const APP_NAME: &str = "Measurement App";

/// Terminal stand-in for the window: owns the frames and performs effects
pub struct Shell {
    controller: Controller,
    base: RgbImage,
    frame: RgbImage,
    pen: Rgb<u8>,
    writer: ExportWriter,
    output_dir: PathBuf,
}

impl Shell {
    pub fn new(
        controller: Controller,
        base: RgbImage,
        pen: Rgb<u8>,
        writer: ExportWriter,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            controller,
            frame: base.clone(),
            base,
            pen,
            writer,
            output_dir,
        }
    }

    /// Open the configured image and index its holes
    pub fn load(config: &MeasureConfig) -> gridmeasure::Result<Self> {
        let startup = &config.startup;
        let image = image::open(&startup.image_path)?;
        info!(
            "{}: {} ({}x{})",
            APP_NAME,
            startup.image_path.display(),
            image.width(),
            image.height()
        );

        let index = IndexerBuilder::from_config(&config.detection).build().index(&image)?;

        Ok(Self::new(
            Controller::from_config(index, config),
            image.to_rgb8(),
            Rgb(startup.pen_color),
            ExportWriter::new(ExportFormat::from_name(&startup.file_type)),
            startup.output_dir.clone(),
        ))
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn base(&self) -> &RgbImage {
        &self.base
    }

    pub fn frame(&self) -> &RgbImage {
        &self.frame
    }

    pub fn pen(&self) -> Rgb<u8> {
        self.pen
    }

    /// Run one event through the controller and carry out its effect.
    ///
    /// A failed export is logged and the session is kept, so `generate` can
    /// be retried.
    pub fn apply(&mut self, state: AppState, event: UiEvent) -> AppState {
        let (state, effect) = self.controller.handle(event, state);

        match &effect {
            UiEffect::DrawLine { readout, .. } => println!("Distance: {readout}"),
            UiEffect::Ignored => info!("Click ignored, press Measure first"),
            UiEffect::Export => match self.writer.export(&state.session, &self.output_dir) {
                Ok(path) => {
                    println!("Wrote {} points to {}", state.session.visited().len(), path.display());
                }
                Err(err) => error!(
                    "Export to {} failed, session kept for retry: {}",
                    self.output_dir.display(),
                    err
                ),
            },
            _ => {}
        }

        if let Some(frame) = render::render_effect(&self.base, self.controller.index(), &effect, self.pen) {
            self.frame = frame;
        }

        state
    }

    pub fn save_frame(&self, path: &Path) -> gridmeasure::Result<()> {
        self.frame.save(path)?;
        info!("Saved frame to {}", path.display());
        Ok(())
    }
}
