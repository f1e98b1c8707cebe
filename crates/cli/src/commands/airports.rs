//! `airports` subcommand.

use wanderlust_core::catalog::{AIRPORTS, Airport, ROUTE_NETWORK_SIZE};

/// One line per airport; `*` marks airports the generator schedules flights for.
pub fn lines() -> Vec<String> {
    AIRPORTS
        .iter()
        .enumerate()
        .map(|(i, a): (usize, &Airport)| {
            let served = if i < ROUTE_NETWORK_SIZE { '*' } else { ' ' };
            format!("{served} {}  {:<12} {:<10} {}", a.code, a.city, a.country, a.name)
        })
        .collect()
}

#[allow(clippy::print_stdout)]
pub fn list() {
    for line in lines() {
        println!("{line}");
    }
}
