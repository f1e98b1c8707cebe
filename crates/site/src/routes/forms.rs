//! Small helpers shared by the HTML forms.

use chrono::NaiveDate;

/// One `<option>`, radio button or checkbox, with its checked state worked
/// out in Rust rather than in the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl Choice {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Parse the `YYYY-MM-DD` value of a date input.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Render a date back into a date input.
#[must_use]
pub fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// A date as shown on the page: `Fri, Aug 15, 2025`.
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    date.format("%a, %b %d, %Y").to_string()
}

/// Split a raw query string into decoded key/value pairs.
///
/// Unlike a serde form, repeated keys (`airline=A&airline=B`) are all kept.
#[must_use]
pub fn query_pairs(raw: &str) -> Vec<(String, String)> {
    let decode = |s: &str| {
        let spaced = s.replace('+', " ");
        urlencoding::decode(&spaced).map_or(spaced.clone(), std::borrow::Cow::into_owned)
    };
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_keeps_repeats_and_decodes() {
        let pairs = query_pairs("airline=Air+India&airline=British%20Airways&stops=0&&reset");
        assert_eq!(
            pairs,
            vec![
                ("airline".to_owned(), "Air India".to_owned()),
                ("airline".to_owned(), "British Airways".to_owned()),
                ("stops".to_owned(), "0".to_owned()),
                ("reset".to_owned(), String::new()),
            ]
        );
    }

    #[test]
    fn test_dates() {
        let date = parse_date(" 2025-08-15 ");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 8, 15));
        assert_eq!(date_value(date), "2025-08-15");
        assert_eq!(parse_date("15/08/2025"), None);
        assert_eq!(date_value(None), "");
    }

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        assert_eq!(long_date(date), "Fri, Aug 15, 2025");
    }
}
