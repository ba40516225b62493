// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;
use std::str::FromStr;

use super::model::{Airport, Flight};
use super::Error;

/// Placeholder used by OpenFlights for missing values.
const NULL: &str = "\\N";

mod airport_columns {
    pub const NAME: usize = 1;
    pub const COUNTRY: usize = 3;
    pub const CODE: usize = 4;
    pub const LAT: usize = 6;
    pub const LON: usize = 7;
}

mod route_columns {
    pub const ORIGIN: usize = 2;
    pub const DESTINATION: usize = 4;
    pub const STOPS: usize = 7;
}

/// Reader wraps a [csv::Reader] over headerless OpenFlights tables,
/// remembering the position of the current record for error reporting.
pub(super) struct Reader<R: io::Read> {
    inner: csv::Reader<R>,
    record: csv::StringRecord,
}

impl<R: io::Read> Reader<R> {
    pub(super) fn new(reader: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Self {
            inner,
            record: csv::StringRecord::new(),
        }
    }

    /// Advances to the next record. Returns `false` at the end of the input.
    fn advance(&mut self) -> Result<bool, Error> {
        Ok(self.inner.read_record(&mut self.record)?)
    }

    fn line(&self) -> u64 {
        self.record.position().map_or(0, |p| p.line())
    }

    fn field(&self, column: usize) -> Result<&str, Error> {
        self.record.get(column).ok_or_else(|| Error::MissingField {
            line: self.line(),
            column,
        })
    }

    fn parse<T: FromStr>(&self, column: usize) -> Result<T, Error> {
        let value = self.field(column)?;
        value.trim().parse().map_err(|_| Error::InvalidField {
            line: self.line(),
            column,
            value: value.to_string(),
        })
    }

    /// Reads all airports. Airports without an IATA code or with
    /// non-finite coordinates can't be routed to, and are skipped.
    pub(super) fn read_airports(mut self) -> Result<Vec<Airport>, Error> {
        let mut airports = Vec::default();

        while self.advance()? {
            let code = self.field(airport_columns::CODE)?;
            if code.is_empty() || code == NULL {
                log::debug!("line {}: skipping airport without a code", self.line());
                continue;
            }

            let lat: f64 = self.parse(airport_columns::LAT)?;
            let lon: f64 = self.parse(airport_columns::LON)?;
            if !lat.is_finite() || !lon.is_finite() {
                log::warn!(
                    "line {}: skipping airport {} with invalid position ({}, {})",
                    self.line(),
                    code,
                    lat,
                    lon,
                );
                continue;
            }

            airports.push(Airport {
                code: code.to_string(),
                name: self.field(airport_columns::NAME)?.to_string(),
                country: self.field(airport_columns::COUNTRY)?.to_string(),
                lat,
                lon,
            });
        }

        log::info!("read {} airports", airports.len());
        Ok(airports)
    }

    /// Reads all direct flights; flights with stops are dropped.
    pub(super) fn read_flights(mut self) -> Result<Vec<Flight>, Error> {
        let mut flights = Vec::default();
        let mut with_stops: usize = 0;

        while self.advance()? {
            let stops: u32 = self.parse(route_columns::STOPS)?;
            if stops != 0 {
                with_stops += 1;
                continue;
            }

            flights.push(Flight {
                origin: self.field(route_columns::ORIGIN)?.to_string(),
                destination: self.field(route_columns::DESTINATION)?.to_string(),
            });
        }

        log::info!(
            "read {} direct flights ({} flights with stops dropped)",
            flights.len(),
            with_stops,
        );
        Ok(flights)
    }
}
