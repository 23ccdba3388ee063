//! Overdue fine computation.
//!
//! Fines are derived values: nothing here touches storage. A fine is
//! computed from a due date, the evaluation instant and the circulation
//! policy in force, and rounded to currency precision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// The parameters that govern fine assessment.
///
/// Sourced from the `circulation_settings` row, never from a constant:
/// the displayed projection and the amount charged at return time must
/// come from the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinePolicy {
    /// Amount charged per overdue day.
    pub daily_rate: Decimal,
    /// Cap on the number of days billed.
    pub max_chargeable_days: i64,
}

/// Number of overdue days at `evaluated_at`, rounded up.
///
/// Zero when the due date has not passed. Any partial day counts as a
/// whole day, so being one second late bills one day.
pub fn overdue_days(due: DateTime<Utc>, evaluated_at: DateTime<Utc>) -> i64 {
    let late_ms = evaluated_at.signed_duration_since(due).num_milliseconds();
    if late_ms <= 0 {
        return 0;
    }
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    (late_ms + DAY_MS - 1) / DAY_MS
}

/// Compute the fine owed at `evaluated_at` for a loan due at `due`.
///
/// `min(overdue_days, cap) * daily_rate`, rounded to 2 decimal places.
/// Returns zero when the loan is not overdue, including when
/// `evaluated_at == due` (day-of-return grace).
pub fn compute_fine(due: DateTime<Utc>, evaluated_at: DateTime<Utc>, policy: &FinePolicy) -> Decimal {
    let days = overdue_days(due, evaluated_at);
    if days == 0 {
        return Decimal::ZERO;
    }
    let chargeable = days.min(policy.max_chargeable_days.max(0));
    (Decimal::from(chargeable) * policy.daily_rate).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn policy() -> FinePolicy {
        FinePolicy {
            daily_rate: Decimal::new(500, 2), // 5.00
            max_chargeable_days: 30,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn due_date_itself_is_grace() {
        let due = at(2024, 3, 1);
        assert_eq!(compute_fine(due, due, &policy()), Decimal::ZERO);
    }

    #[test]
    fn before_due_date_is_zero() {
        let due = at(2024, 3, 10);
        let early = at(2024, 3, 1);
        assert_eq!(compute_fine(due, early, &policy()), Decimal::ZERO);
    }

    #[test]
    fn each_day_under_the_cap_bills_linearly() {
        let due = at(2024, 3, 1);
        for days in 1..=30i64 {
            let when = due + Duration::days(days);
            assert_eq!(
                compute_fine(due, when, &policy()),
                Decimal::from(days) * Decimal::new(500, 2),
                "at {} days",
                days
            );
        }
    }

    #[test]
    fn partial_day_rounds_up() {
        let due = at(2024, 3, 1);
        let slightly_late = due + Duration::minutes(90);
        assert_eq!(overdue_days(due, slightly_late), 1);
        assert_eq!(compute_fine(due, slightly_late, &policy()), Decimal::new(500, 2));
    }

    #[test]
    fn one_second_late_bills_one_day() {
        let due = at(2024, 3, 1);
        assert_eq!(overdue_days(due, due + Duration::seconds(1)), 1);
    }

    #[test]
    fn cap_is_never_exceeded() {
        let due = at(2024, 3, 1);
        let cap_amount = Decimal::from(30) * Decimal::new(500, 2);
        for days in [31i64, 45, 400] {
            let when = due + Duration::days(days);
            assert_eq!(compute_fine(due, when, &policy()), cap_amount, "at {} days", days);
        }
    }

    #[test]
    fn forty_five_days_at_five_per_day_is_150() {
        let due = at(2024, 1, 1);
        let when = due + Duration::days(45);
        assert_eq!(compute_fine(due, when, &policy()), Decimal::new(15000, 2));
    }

    #[test]
    fn exact_day_boundary_does_not_round_up_an_extra_day() {
        let due = at(2024, 3, 1);
        let when = due + Duration::days(3);
        assert_eq!(overdue_days(due, when), 3);
    }

    #[test]
    fn zero_cap_means_no_charge() {
        let due = at(2024, 3, 1);
        let p = FinePolicy {
            daily_rate: Decimal::new(500, 2),
            max_chargeable_days: 0,
        };
        assert_eq!(compute_fine(due, due + Duration::days(10), &p), Decimal::ZERO);
    }
}
