//! `flights` subcommand: the results page pipeline on the command line.

use clap::Args;
use wanderlust_core::AirportCode;
use wanderlust_core::flight::Flight;
use wanderlust_core::generator::FlightCatalog;
use wanderlust_core::search::{self, FlightFilters, PriceRange, SortKey, StopBucket};

use super::CliError;

#[derive(Args, Debug, Default)]
pub struct FlightsArgs {
    /// Departure airport code
    #[arg(long)]
    pub from: Option<String>,

    /// Arrival airport code
    #[arg(long)]
    pub to: Option<String>,

    /// `price`, `duration`, `departure` or `arrival`
    #[arg(long, default_value = "price")]
    pub sort: String,

    /// Lowest fare in dollars
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Highest fare in dollars
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Airline name (repeatable)
    #[arg(long)]
    pub airline: Vec<String>,

    /// Stop bucket: `0`, `1` or `2` for two or more (repeatable)
    #[arg(long)]
    pub stops: Vec<String>,

    /// Seed for a reproducible catalog
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn airport(code: Option<&str>) -> Result<Option<AirportCode>, CliError> {
    Ok(code.map(AirportCode::parse).transpose()?)
}

/// Flights in `catalog` matching `args`, sorted.
///
/// # Errors
///
/// Returns an error if an airport code is malformed.
pub fn select<'a>(catalog: &'a FlightCatalog, args: &FlightsArgs) -> Result<Vec<&'a Flight>, CliError> {
    let route = search::route_flights(
        catalog,
        airport(args.from.as_deref())?,
        airport(args.to.as_deref())?,
    );
    let initial = PriceRange::initial(&route);
    let filters = FlightFilters {
        price: PriceRange {
            min: args.min_price.unwrap_or(initial.min),
            max: args.max_price.unwrap_or(initial.max),
        },
        airlines: args.airline.clone(),
        stops: args.stops.iter().filter_map(|s| StopBucket::parse(s)).collect(),
        departure_periods: Vec::new(),
    };
    Ok(search::apply(&route, &filters, SortKey::parse(&args.sort)))
}

fn row(flight: &Flight) -> String {
    format!(
        "{:<22} {:<16} {:<8} {}-{} {}-{} {:>7} {:>9} {}",
        flight.id.as_str(),
        flight.airline.name,
        flight.flight_number,
        flight.departure.airport,
        flight.arrival.airport,
        flight.departure.time_label(),
        flight.arrival.time_label(),
        flight.duration_label(),
        flight.price.to_string(),
        flight.stops_label(),
    )
}

/// Generate a catalog and print the matching flights.
///
/// # Errors
///
/// Returns an error for a malformed airport code or a JSON encoding failure.
#[allow(clippy::print_stdout)]
pub fn list(args: &FlightsArgs) -> Result<(), CliError> {
    let catalog = FlightCatalog::generate(&mut super::rng(args.seed));
    let flights = select(&catalog, args)?;
    tracing::info!(
        catalog = catalog.len(),
        matching = flights.len(),
        "Flights selected"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&flights)?);
    } else {
        for flight in &flights {
            println!("{}", row(flight));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn catalog() -> FlightCatalog {
        FlightCatalog::generate(&mut StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_route_and_sort() {
        let catalog = catalog();
        let args = FlightsArgs {
            from: Some("del".to_owned()),
            to: Some("BOM".to_owned()),
            sort: "price".to_owned(),
            ..FlightsArgs::default()
        };
        let flights = select(&catalog, &args).unwrap();
        assert!(!flights.is_empty());
        assert!(flights.iter().all(|f| f.departure.airport.as_str() == "DEL"));
        assert!(flights.windows(2).all(|w| match w {
            [a, b] => a.price.amount <= b.price.amount,
            _ => true,
        }));
    }

    #[test]
    fn test_stop_filter() {
        let catalog = catalog();
        let args = FlightsArgs {
            stops: vec!["0".to_owned()],
            ..FlightsArgs::default()
        };
        let flights = select(&catalog, &args).unwrap();
        assert!(flights.iter().all(|f| f.stops == 0));
    }

    #[test]
    fn test_bad_airport() {
        let args = FlightsArgs {
            from: Some("DELHI".to_owned()),
            ..FlightsArgs::default()
        };
        assert!(matches!(
            select(&catalog(), &args),
            Err(CliError::Airport(_))
        ));
    }
}
