//! `seats` subcommand.

use wanderlust_core::CabinClass;
use wanderlust_core::seats::SeatMap;

/// Render a seat map as text: `.` free, `x` taken, aisle between C and D.
pub fn render(map: &SeatMap) -> Vec<String> {
    let mut lines = Vec::new();
    for cabin in CabinClass::ALL {
        lines.push(format!(
            "{} ({} free, surcharge ${})",
            cabin.label(),
            map.available_in(cabin),
            cabin.surcharge()
        ));
        for row in map.rows_in(cabin) {
            let mut line = format!("{:>3} ", row.first().map_or(0, |s| s.id.row()));
            for seat in &row {
                if seat.id.column() == 'D' {
                    line.push_str("  ");
                }
                line.push(seat.id.column());
                line.push(if seat.occupied { 'x' } else { '.' });
                line.push(' ');
            }
            lines.push(line.trim_end().to_owned());
        }
    }
    lines
}

#[allow(clippy::print_stdout)]
pub fn draw(seed: Option<u64>) {
    let map = SeatMap::generate(&mut super::rng(seed));
    for line in render(&map) {
        println!("{line}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wanderlust_core::SeatId;
    use wanderlust_core::seats::Seat;

    use super::*;

    #[test]
    fn test_render_marks_taken_and_aisle() {
        let seat = |id: &str, occupied| {
            let id = SeatId::parse(id).unwrap();
            Seat {
                id,
                cabin: CabinClass::for_row(id.row()),
                occupied,
            }
        };
        let map = SeatMap::from_seats(vec![seat("1A", true), seat("1D", false)]);
        let lines = render(&map);
        assert_eq!(lines.first().unwrap(), "First Class (1 free, surcharge $150)");
        assert_eq!(lines.get(1).unwrap(), "  1 Ax   D.");
    }
}
