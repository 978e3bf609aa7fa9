//! Star catalogs module
//!
//! This module provides lazy readers for fixed-column star catalog files.
//! Every supported format yields the same [`StarRecord`]: position plus the
//! B and V magnitudes the renderer needs.

pub mod hipparcos;
pub mod scan;
pub mod tycho2;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, warn};
use thiserror::Error;

use crate::coordinates::Equatorial;

/// Errors that can occur while opening a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to open catalog {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown catalog format '{0}' (expected 'hipparcos' or 'tycho2')")]
    UnknownFormat(String),
}

/// A single catalog star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRecord {
    /// Equatorial position in radians
    pub position: Equatorial,
    /// Blue (B_T) magnitude
    pub b_mag: f32,
    /// Visual (V_T) magnitude
    pub v_mag: f32,
}

/// Supported catalog text layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogFormat {
    /// `hip_main.dat` from the Hipparcos catalog
    Hipparcos,
    /// `tyc2.dat` from the Tycho-2 catalog
    Tycho2,
}

impl CatalogFormat {
    /// Parse a single line in this format
    pub fn parse_line(&self, line: &[u8]) -> Option<StarRecord> {
        match self {
            CatalogFormat::Hipparcos => hipparcos::parse_line(line),
            CatalogFormat::Tycho2 => tycho2::parse_line(line),
        }
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogFormat::Hipparcos => write!(f, "hipparcos"),
            CatalogFormat::Tycho2 => write!(f, "tycho2"),
        }
    }
}

impl FromStr for CatalogFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hipparcos" | "hip" => Ok(CatalogFormat::Hipparcos),
            "tycho2" | "tycho-2" | "tyc" => Ok(CatalogFormat::Tycho2),
            _ => Err(CatalogError::UnknownFormat(s.to_string())),
        }
    }
}

/// Lazy iterator over the valid records of a catalog.
///
/// Lines that do not parse are skipped and counted; they never stop the
/// iteration. A read error ends it.
pub struct CatalogReader<R> {
    reader: R,
    format: CatalogFormat,
    line: Vec<u8>,
    records: usize,
    skipped: usize,
    finished: bool,
}

impl<R: BufRead> CatalogReader<R> {
    pub fn new(reader: R, format: CatalogFormat) -> Self {
        Self {
            reader,
            format,
            line: Vec::with_capacity(256),
            records: 0,
            skipped: 0,
            finished: false,
        }
    }

    /// Number of records produced so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Number of lines skipped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn finish(&mut self) {
        self.finished = true;
        debug!(
            "{} catalog: {} records, {} lines skipped",
            self.format, self.records, self.skipped
        );
    }
}

impl<R: BufRead> Iterator for CatalogReader<R> {
    type Item = StarRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => self.finish(),
                Ok(_) => match self.format.parse_line(&self.line) {
                    Some(record) => {
                        self.records += 1;
                        return Some(record);
                    }
                    None => self.skipped += 1,
                },
                Err(e) => {
                    warn!("{} catalog: read failed, stopping early: {e}", self.format);
                    self.finish();
                }
            }
        }
        None
    }
}

/// Open a catalog file for lazy reading
pub fn read_catalog<P: AsRef<Path>>(
    path: P,
    format: CatalogFormat,
) -> Result<CatalogReader<BufReader<File>>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(CatalogReader::new(BufReader::new(file), format))
}
