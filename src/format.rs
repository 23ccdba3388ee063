//! Presentation formatting for currency amounts and dates.
//!
//! Display-only helpers used by report rendering. No business rule lives
//! here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// `"$X.XX"`, always two decimal places.
pub fn currency(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

/// `"Mon D, YYYY"`, e.g. `"Mar 5, 2024"`.
pub fn date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn currency_pads_to_two_decimals() {
        assert_eq!(currency(Decimal::new(15000, 2)), "$150.00");
        assert_eq!(currency(Decimal::new(5, 1)), "$0.50");
        assert_eq!(currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn date_has_no_zero_padding_on_the_day() {
        let d = Utc.with_ymd_and_hms(2024, 3, 5, 9, 30, 0).unwrap();
        assert_eq!(date(d), "Mar 5, 2024");
        let d = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(date(d), "Dec 25, 2024");
    }
}
