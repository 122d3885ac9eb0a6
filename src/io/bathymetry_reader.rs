//! Bathymetry sounding file reader.
//!
//! # File Format
//!
//! ```text
//! # Ship-track soundings
//! # source: multibeam centre beam
//! # units: m
//! # columns: lon lat depth
//! -38.2 65.1 1240.0
//! -38.1 65.2 1310.5
//! ```
//!
//! Columns may be separated by whitespace or commas. A CSV header line
//! starting with `lon` is skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use thiserror::Error;

use crate::bathymetry::{Bathymetry, BathymetryError};
use crate::geometry::Coordinates;

/// Error type for bathymetry file operations.
#[derive(Debug, Error)]
pub enum BathymetryFileError {
    /// IO error reading file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Parse error in file content
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Samples do not form a valid survey
    #[error("Invalid bathymetry: {0}")]
    InvalidBathymetry(#[from] BathymetryError),
}

/// Parsed bathymetry file.
#[derive(Clone, Debug)]
pub struct BathymetryFile {
    /// Depth samples in file order
    pub bathymetry: Bathymetry,
    /// Metadata from `# key: value` comments
    pub metadata: HashMap<String, String>,
}

impl BathymetryFile {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.bathymetry.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.bathymetry.is_empty()
    }
}

/// Read a bathymetry file.
pub fn read_bathymetry_file(path: &Path) -> Result<BathymetryFile, BathymetryFileError> {
    let reader = BufReader::new(File::open(path)?);

    let mut metadata = HashMap::new();
    let mut positions = Vec::new();
    let mut depths = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some((key, value)) = comment.trim().split_once(':') {
                metadata.insert(key.trim().to_lowercase(), value.trim().to_string());
            }
            continue;
        }

        if line.to_lowercase().starts_with("lon") {
            continue;
        }

        let parts: Vec<&str> = if line.contains(',') {
            line.split(',').map(|s| s.trim()).collect()
        } else {
            line.split_whitespace().collect()
        };

        if parts.len() < 3 {
            return Err(BathymetryFileError::ParseError(format!(
                "Line {} needs 3 columns (lon, lat, depth): {}",
                line_num + 1,
                line
            )));
        }

        let parse = |i: usize, what: &str| -> Result<f64, BathymetryFileError> {
            parts[i].parse().map_err(|_| {
                BathymetryFileError::ParseError(format!(
                    "Invalid {} at line {}: {}",
                    what,
                    line_num + 1,
                    parts[i]
                ))
            })
        };

        positions.push(Coordinates::new(parse(0, "longitude")?, parse(1, "latitude")?));
        depths.push(parse(2, "depth")?);
    }

    if depths.is_empty() {
        return Err(BathymetryFileError::InvalidFormat(
            "No depth records found in file".to_string(),
        ));
    }

    Ok(BathymetryFile {
        bathymetry: Bathymetry::new(positions, depths)?,
        metadata,
    })
}

/// Write a bathymetry file.
pub fn write_bathymetry_file(
    path: &Path,
    bathymetry: &Bathymetry,
    metadata: &HashMap<String, String>,
) -> Result<(), BathymetryFileError> {
    let mut writer = std::io::BufWriter::new(File::create(path)?);

    writeln!(writer, "# Bathymetry soundings")?;
    let mut keys: Vec<&String> = metadata.keys().filter(|k| k.as_str() != "columns").collect();
    keys.sort();
    for key in keys {
        writeln!(writer, "# {}: {}", key, metadata[key])?;
    }
    writeln!(writer, "# columns: lon lat depth")?;

    for (p, depth) in bathymetry.samples() {
        writeln!(writer, "{} {} {}", p.lon, p.lat, depth)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_simple_format() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"# Ship-track soundings
# cruise: KN200
# units: m
-38.2 65.1 1240.0
-38.1 65.2 1310.5

-38.0 65.3 1402.25"#
        )
        .unwrap();

        let bathy = read_bathymetry_file(file.path()).unwrap();

        assert_eq!(bathy.len(), 3);
        assert_eq!(bathy.metadata["cruise"], "KN200");
        assert_eq!(bathy.bathymetry.positions()[1], Coordinates::new(-38.1, 65.2));
        assert_eq!(bathy.bathymetry.depths()[2], 1402.25);
    }

    #[test]
    fn test_read_csv_format() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"lon,lat,depth
10.0,60.0,200.0
10.5,60.5,250.0"#
        )
        .unwrap();

        let bathy = read_bathymetry_file(file.path()).unwrap();
        assert_eq!(bathy.len(), 2);
        assert_eq!(bathy.bathymetry.depths(), &[200.0, 250.0]);
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let original = Bathymetry::new(
            vec![Coordinates::new(-10.25, 54.0), Coordinates::new(-10.0, 54.125)],
            vec![85.5, 92.0],
        )
        .unwrap();
        let metadata = HashMap::from([("source".to_string(), "echosounder".to_string())]);

        let file = NamedTempFile::new().unwrap();
        write_bathymetry_file(file.path(), &original, &metadata).unwrap();

        let read_back = read_bathymetry_file(file.path()).unwrap();
        assert_eq!(read_back.bathymetry, original);
        assert_eq!(read_back.metadata["source"], "echosounder");
        assert_eq!(read_back.metadata["columns"], "lon lat depth");
    }

    #[test]
    fn test_errors() {
        let file = NamedTempFile::new().unwrap();
        writeln!(&file, "# Just comments").unwrap();
        assert!(matches!(
            read_bathymetry_file(file.path()),
            Err(BathymetryFileError::InvalidFormat(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0 2.0 deep").unwrap();
        assert!(matches!(
            read_bathymetry_file(file.path()),
            Err(BathymetryFileError::ParseError(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0 2.0 -5.0").unwrap();
        assert!(matches!(
            read_bathymetry_file(file.path()),
            Err(BathymetryFileError::InvalidBathymetry(_))
        ));
    }
}
