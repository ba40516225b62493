// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Readers for [OpenFlights](https://openflights.org/data) `airports.dat` and `routes.dat` tables.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

mod model;
mod openflights;

pub use model::{Airport, Flight};

/// Format of the input file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the compression based on the content
    #[default]
    Unknown,

    /// Force uncompressed CSV
    Csv,

    /// Force CSV with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    CsvGz,

    /// Force CSV with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    CsvBz2,
}

impl FileFormat {
    /// Guesses the format of a stream by its first bytes.
    fn detect(magic: &[u8]) -> Self {
        if magic.starts_with(&[0x1F, 0x8B]) {
            Self::CsvGz
        } else if magic.starts_with(b"BZh") {
            Self::CsvBz2
        } else {
            Self::Csv
        }
    }
}

/// Additional controls for reading OpenFlights tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,
}

/// Error conditions which may occur when reading OpenFlights tables.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("line {line}: missing column {column}")]
    MissingField { line: u64, column: usize },

    #[error("line {line}: invalid value in column {column}: {value:?}")]
    InvalidField {
        line: u64,
        column: usize,
        value: String,
    },
}

/// Wraps the provided stream in a decompressor as per the provided [Options].
fn decompress<'a, R: io::Read + 'a>(
    options: &Options,
    reader: R,
) -> Result<Box<dyn io::Read + 'a>, Error> {
    let mut b = io::BufReader::new(reader);

    let file_format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        known => known,
    };

    Ok(match file_format {
        FileFormat::Unknown | FileFormat::Csv => Box::new(b),
        FileFormat::CsvGz => Box::new(flate2::read::MultiGzDecoder::new(b)),
        FileFormat::CsvBz2 => Box::new(bzip2::read::MultiBzDecoder::new(b)),
    })
}

/// Parse [Airports](Airport) from a reader as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn airports_from_io<R: io::Read>(
    options: &Options,
    reader: R,
) -> Result<Vec<Airport>, Error> {
    let r = decompress(options, reader)?;
    openflights::Reader::new(r).read_airports()
}

/// Parse [Airports](Airport) from a file at the provided path as per the provided [Options].
pub fn airports_from_file<P: AsRef<Path>>(
    options: &Options,
    path: P,
) -> Result<Vec<Airport>, Error> {
    let f = File::open(path)?;
    airports_from_io(options, f)
}

/// Parse [Airports](Airport) from a static buffer as per the provided [Options].
pub fn airports_from_buffer(options: &Options, data: &[u8]) -> Result<Vec<Airport>, Error> {
    airports_from_io(options, data)
}

/// Parse direct [Flights](Flight) from a reader as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn flights_from_io<R: io::Read>(options: &Options, reader: R) -> Result<Vec<Flight>, Error> {
    let r = decompress(options, reader)?;
    openflights::Reader::new(r).read_flights()
}

/// Parse direct [Flights](Flight) from a file at the provided path as per the provided [Options].
pub fn flights_from_file<P: AsRef<Path>>(
    options: &Options,
    path: P,
) -> Result<Vec<Flight>, Error> {
    let f = File::open(path)?;
    flights_from_io(options, f)
}

/// Parse direct [Flights](Flight) from a static buffer as per the provided [Options].
pub fn flights_from_buffer(options: &Options, data: &[u8]) -> Result<Vec<Flight>, Error> {
    flights_from_io(options, data)
}
