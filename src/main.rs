use std::collections::HashMap;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use faresearch::reader::{self, Airport, Flight};
use faresearch::{Graph, PerKilometer, RouteError, SearchOptions};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct TableLoadError(PathBuf, #[source] reader::Error);

#[derive(Parser)]
struct Cli {
    /// The path to the OpenFlights airports table (optionally gzip or bzip2 compressed)
    airports: PathBuf,

    /// The path to the OpenFlights routes table (optionally gzip or bzip2 compressed)
    routes: PathBuf,

    /// IATA code of the departure airport; prompted for if missing
    from: Option<String>,

    /// IATA code of the arrival airport; prompted for if missing
    to: Option<String>,

    /// Price of flying one kilometer
    #[arg(long, default_value_t = faresearch::DEFAULT_PRICE_PER_KM, value_parser = parse_price)]
    price_per_km: f64,

    /// Maximum number of airports expanded before giving up
    #[arg(long, default_value_t = faresearch::DEFAULT_STEP_LIMIT)]
    step_limit: usize,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    colog::default_builder()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let airports = load_airports(&cli.airports)?;
    let flights = load_flights(&cli.routes)?;

    let g = Graph::load(
        airports.iter().map(Airport::node),
        flights.iter().map(Flight::edge),
        PerKilometer {
            price_per_km: cli.price_per_km,
        },
    );

    let from = match cli.from {
        Some(code) => code,
        None => prompt("Enter source airport: ")?,
    };
    let to = match cli.to {
        Some(code) => code,
        None => prompt("Enter destination airport: ")?,
    };

    let options = SearchOptions {
        step_limit: cli.step_limit,
        ..SearchOptions::default()
    };

    let route = match faresearch::find_route(&g, &from, &to, &options) {
        Ok(route) => route,
        Err(RouteError::NoPathFound) => {
            eprintln!("no route from {} to {}", from, to);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let by_code: HashMap<&str, &Airport> =
        airports.iter().map(|a| (a.code.as_str(), a)).collect();
    for (index, code) in route.path.iter().enumerate() {
        match by_code.get(code.as_str()) {
            Some(a) => println!("{} | {} - {} - {}", index, a.code, a.name, a.country),
            None => println!("{} | {}", index, code),
        }
    }
    println!("{:.2} €", route.cost);

    Ok(ExitCode::SUCCESS)
}

fn parse_price(s: &str) -> Result<f64, String> {
    let price: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(format!("price must be a non-negative number, got {}", s))
    }
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::default();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_uppercase())
}

fn load_airports<P: AsRef<Path>>(path: P) -> Result<Vec<Airport>, TableLoadError> {
    reader::airports_from_file(&reader::Options::default(), path.as_ref())
        .map_err(|e| TableLoadError(PathBuf::from(path.as_ref()), e))
}

fn load_flights<P: AsRef<Path>>(path: P) -> Result<Vec<Flight>, TableLoadError> {
    reader::flights_from_file(&reader::Options::default(), path.as_ref())
        .map_err(|e| TableLoadError(PathBuf::from(path.as_ref()), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price("0.1"), Ok(0.1));
        assert_eq!(parse_price("0"), Ok(0.0));
        assert_eq!(parse_price("2.5e1"), Ok(25.0));

        assert!(parse_price("-0.1").is_err());
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("inf").is_err());
        assert!(parse_price("cheap").is_err());
    }

    #[test]
    fn cli_rejects_invalid_price() {
        let parse = |price: &str| {
            Cli::try_parse_from(["faresearch", "a.dat", "r.dat", "--price-per-km", price])
        };

        assert_eq!(parse("0.25").unwrap().price_per_km, 0.25);
        assert!(parse("-0.1").is_err());
        assert!(parse("NaN").is_err());

        let defaults = Cli::try_parse_from(["faresearch", "a.dat", "r.dat"]).unwrap();
        assert_eq!(defaults.price_per_km, faresearch::DEFAULT_PRICE_PER_KM);
    }
}
