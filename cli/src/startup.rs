use std::path::PathBuf;

use clap::Args;
use gridmeasure::{MeasureConfig, MeasureError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("failed to load config {path}: {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: MeasureError,
    },
    #[error(transparent)]
    Invalid(#[from] MeasureError),
    #[error("--color takes exactly three values (R G B), got {0}")]
    ColorArity(usize),
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),
    #[error("Output directory not found: {0}")]
    OutputDirNotFound(PathBuf),
}

/// Startup flags shared by every subcommand. Flags override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct StartupArgs {
    /// TOML or JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Path to the grid image
    #[arg(short, long)]
    pub path: Option<PathBuf>,
    /// Real-world distance per pixel
    #[arg(short, long, allow_negative_numbers = true)]
    pub scale: Option<f64>,
    /// Pen colour for outlines and lines
    #[arg(short, long, num_args = 3, value_names = ["R", "G", "B"])]
    pub color: Option<Vec<u8>>,
    /// Export file type: numpy, csv or tsv
    #[arg(short = 't', long = "type")]
    pub file_type: Option<String>,
    /// Directory export files are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl StartupArgs {
    /// Apply the flags on top of `config` without touching the filesystem
    pub fn merge_into(&self, mut config: MeasureConfig) -> Result<MeasureConfig, StartupError> {
        if let Some(path) = &self.path {
            config.startup.image_path = path.clone();
        }
        if let Some(scale) = self.scale {
            config.startup.scale_factor = scale;
        }
        if let Some(color) = &self.color {
            config.startup.pen_color = color
                .as_slice()
                .try_into()
                .map_err(|_| StartupError::ColorArity(color.len()))?;
        }
        if let Some(file_type) = &self.file_type {
            config.startup.file_type = file_type.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.startup.output_dir = output_dir.clone();
        }
        Ok(config)
    }

    /// Load the config file (or defaults), merge the flags and fail fast on
    /// anything that would only surface later
    pub fn resolve(&self) -> Result<MeasureConfig, StartupError> {
        let base = match &self.config {
            Some(path) => MeasureConfig::from_file(path).map_err(|source| StartupError::ConfigLoad {
                path: path.clone(),
                source,
            })?,
            None => MeasureConfig::default(),
        };

        let config = self.merge_into(base)?;
        config.validate()?;

        if !config.startup.image_path.is_file() {
            return Err(StartupError::ImageNotFound(config.startup.image_path.clone()));
        }
        if !config.startup.output_dir.is_dir() {
            return Err(StartupError::OutputDirNotFound(config.startup.output_dir.clone()));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::Path;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        startup: StartupArgs,
    }

    fn parse(args: &[&str]) -> StartupArgs {
        let argv = std::iter::once("grid-measure").chain(args.iter().copied());
        Harness::try_parse_from(argv).unwrap().startup
    }

    fn workspace() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("grid.png");
        fs::write(&image, b"not decoded at startup").unwrap();
        (dir, image)
    }

    fn path_arg(path: &Path) -> String {
        path.display().to_string()
    }

    #[test]
    fn test_flags_resolve() {
        let (dir, image) = workspace();
        let args = parse(&[
            "-p", &path_arg(&image),
            "-s", "0.25",
            "-c", "1", "2", "3",
            "-t", "csv",
            "--output-dir", &path_arg(dir.path()),
        ]);

        let config = args.resolve().unwrap();
        assert_eq!(config.startup.image_path, image);
        assert_eq!(config.startup.scale_factor, 0.25);
        assert_eq!(config.startup.pen_color, [1, 2, 3]);
        assert_eq!(config.startup.file_type, "csv");
    }

    #[test]
    fn test_flags_override_config_file() {
        let (dir, image) = workspace();
        let config_path = dir.path().join("measure.toml");
        fs::write(
            &config_path,
            format!(
                "[startup]\nimage_path = {:?}\nscale_factor = 3.0\nfile_type = \"tsv\"\noutput_dir = {:?}\n\n[selection]\nthreshold_distance = 9.0\n",
                path_arg(&image),
                path_arg(dir.path()),
            ),
        )
        .unwrap();

        let config = parse(&["--config", &path_arg(&config_path), "-s", "0.5"])
            .resolve()
            .unwrap();

        assert_eq!(config.startup.scale_factor, 0.5);
        assert_eq!(config.startup.file_type, "tsv");
        assert_eq!(config.selection.threshold_distance, 9.0);
    }

    #[test]
    fn test_missing_image_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.png");
        let err = parse(&["-p", &path_arg(&missing), "--output-dir", &path_arg(dir.path())])
            .resolve()
            .unwrap_err();
        assert!(matches!(err, StartupError::ImageNotFound(path) if path == missing));
    }

    #[test]
    fn test_missing_output_dir_fails_fast() {
        let (dir, image) = workspace();
        let missing = dir.path().join("nope");
        let err = parse(&["-p", &path_arg(&image), "--output-dir", &path_arg(&missing)])
            .resolve()
            .unwrap_err();
        assert!(matches!(err, StartupError::OutputDirNotFound(path) if path == missing));
    }

    #[test]
    fn test_bad_scale_is_rejected() {
        let (dir, image) = workspace();
        for scale in ["0", "-1.5", "NaN"] {
            let scale_flag = format!("--scale={scale}");
            let err = parse(&[
                "-p", &path_arg(&image),
                "--output-dir", &path_arg(dir.path()),
                &scale_flag,
            ])
            .resolve()
            .unwrap_err();
            assert!(matches!(err, StartupError::Invalid(MeasureError::InvalidConfig(_))), "{scale}");
        }
    }

    #[test]
    fn test_non_numeric_scale_is_a_parse_error() {
        let argv = ["grid-measure", "--scale", "wide"];
        assert!(Harness::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_color_arity() {
        assert!(Harness::try_parse_from(["grid-measure", "-c", "1", "2"]).is_err());

        let args = StartupArgs { color: Some(vec![1, 2]), ..Default::default() };
        let err = args.merge_into(MeasureConfig::default()).unwrap_err();
        assert!(matches!(err, StartupError::ColorArity(2)));
    }

    #[test]
    fn test_unreadable_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("measure.yaml");
        let err = parse(&["--config", &path_arg(&config_path)]).resolve().unwrap_err();
        assert!(matches!(err, StartupError::ConfigLoad { path, .. } if path == config_path));
    }
}
