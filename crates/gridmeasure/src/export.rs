//! Flat-file export of the visit history.
//!
//! | format         | file         | content                                  |
//! |----------------|--------------|------------------------------------------|
//! | `numpy`        | `files.npy`  | raw centroids, `<i8`, shape `(N, 2)`     |
//! | `csv`          | `files.csv`  | header + `serial,x*scale,y*scale` rows   |
//! | `tsv`          | `output.tsv` | `x*scale\ty*scale` rows, no header       |
//! | `numpy_scaled` | `files.npy`  | scaled coordinates, `<f8`, shape `(N, 2)` |
//!
//! Names match exactly; anything else, including `CSV` or ` tsv `,
//! resolves to `numpy_scaled`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr, VariantNames};
use tracing::{info, warn};

use crate::{error::Result, session::MeasurementSession, types::Centroid};

const CSV_HEADER: [&str; 3] = ["Serial No", "X coordinate", "Y coordinate"];
const LINE_END: &str = "\r\n";
const NPY_MAGIC: &[u8] = b"\x93NUMPY";
const NPY_ALIGN: usize = 64;

#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExportFormat {
    /// Raw integer centroids as a NumPy array
    Numpy,
    /// Comma-separated serial number and scaled coordinates
    Csv,
    /// Tab-separated scaled coordinates
    Tsv,
    /// Scaled coordinates as a NumPy float array
    #[strum(serialize = "numpy_scaled")]
    #[serde(rename = "numpy_scaled")]
    ScaledNumpy,
}

impl ExportFormat {
    /// Resolve a user-supplied file type name. Never fails.
    pub fn from_name(name: &str) -> Self {
        match name.parse::<Self>() {
            Ok(format) => format,
            Err(_) => {
                warn!("Unrecognized file type '{}'! Defaulting to scaled NumPy format", name);
                Self::ScaledNumpy
            }
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Numpy | Self::ScaledNumpy => "files.npy",
            Self::Csv => "files.csv",
            Self::Tsv => "output.tsv",
        }
    }
}

/// Writes a session's visit history in one export format
#[derive(Debug, Clone, Copy)]
pub struct ExportWriter {
    format: ExportFormat,
}

impl ExportWriter {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn write_to<W: Write>(&self, session: &MeasurementSession, writer: &mut W) -> Result<()> {
        let visited = session.visited();
        let scale = session.scale();

        match self.format {
            ExportFormat::Numpy => write_npy_i64(writer, visited)?,
            ExportFormat::ScaledNumpy => write_npy_f64(writer, &scaled(visited, scale))?,
            ExportFormat::Csv => {
                write!(writer, "{}{}", CSV_HEADER.join(","), LINE_END)?;
                for (serial, [x, y]) in scaled(visited, scale).into_iter().enumerate() {
                    write!(writer, "{},{:?},{:?}{}", serial + 1, x, y, LINE_END)?;
                }
            }
            ExportFormat::Tsv => {
                for [x, y] in scaled(visited, scale) {
                    write!(writer, "{:?}\t{:?}{}", x, y, LINE_END)?;
                }
            }
        }

        Ok(())
    }

    pub fn to_bytes(&self, session: &MeasurementSession) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(session, &mut buffer)?;
        Ok(buffer)
    }

    /// Write the export file into `dir` and return its path
    pub fn export<P: AsRef<Path>>(&self, session: &MeasurementSession, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.format.file_name());
        let mut writer = BufWriter::new(File::create(&path)?);
        self.write_to(session, &mut writer)?;
        writer.flush()?;

        info!("{} file generated successfully: {}", self.format, path.display());
        Ok(path)
    }
}

fn scaled(visited: &[Centroid], scale: f64) -> Vec<[f64; 2]> {
    visited.iter().map(|c| c.scaled(scale)).collect()
}

fn write_npy_header<W: Write>(writer: &mut W, descr: &str, rows: usize) -> Result<()> {
    let dict = format!("{{'descr': '{descr}', 'fortran_order': False, 'shape': ({rows}, 2), }}");
    // magic + version + u16 length, then the dict padded so data starts aligned
    let preamble = NPY_MAGIC.len() + 2 + 2;
    let unpadded = preamble + dict.len() + 1;
    let padding = (NPY_ALIGN - unpadded % NPY_ALIGN) % NPY_ALIGN;
    let header_len = (dict.len() + padding + 1) as u16;

    writer.write_all(NPY_MAGIC)?;
    writer.write_all(&[1, 0])?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(dict.as_bytes())?;
    writer.write_all(" ".repeat(padding).as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn write_npy_i64<W: Write>(writer: &mut W, points: &[Centroid]) -> Result<()> {
    write_npy_header(writer, "<i8", points.len())?;
    for point in points {
        writer.write_all(&i64::from(point.x).to_le_bytes())?;
        writer.write_all(&i64::from(point.y).to_le_bytes())?;
    }
    Ok(())
}

fn write_npy_f64<W: Write>(writer: &mut W, points: &[[f64; 2]]) -> Result<()> {
    write_npy_header(writer, "<f8", points.len())?;
    for [x, y] in points {
        writer.write_all(&x.to_le_bytes())?;
        writer.write_all(&y.to_le_bytes())?;
    }
    Ok(())
}
