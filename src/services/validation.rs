use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::models::{AppointmentPayload, AppointmentRequest, RejectReason, ValidationOutcome};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

const NEXT_MONDAY: &str = "next monday";

/// Decide acceptance or rejection for a booking payload.
///
/// Pure function of the payload and `now`. The checks run in a fixed order
/// and the first failure wins: field presence, email shape, phone shape,
/// date resolution, past-date check. No I/O, no retries.
pub fn validate(payload: &AppointmentPayload, now: NaiveDateTime) -> ValidationOutcome {
    match run_checks(payload, now) {
        Ok(request) => ValidationOutcome::Accepted(request),
        Err(reason) => ValidationOutcome::Rejected(reason),
    }
}

fn run_checks(
    payload: &AppointmentPayload,
    now: NaiveDateTime,
) -> Result<AppointmentRequest, RejectReason> {
    let (name, phone, email, date_text) = require_fields(payload)?;
    check_email(email)?;
    check_phone(phone)?;
    let date = resolve_date(date_text, now.date())?;
    check_not_past(date, now)?;

    Ok(AppointmentRequest {
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        date,
    })
}

fn require_fields(payload: &AppointmentPayload) -> Result<(&str, &str, &str, &str), RejectReason> {
    match (&payload.name, &payload.phone, &payload.email, &payload.date) {
        (Some(name), Some(phone), Some(email), Some(date)) => {
            Ok((name.as_str(), phone.as_str(), email.as_str(), date.as_str()))
        }
        _ => Err(RejectReason::MissingField),
    }
}

fn check_email(email: &str) -> Result<(), RejectReason> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(RejectReason::InvalidEmail)
    }
}

fn check_phone(phone: &str) -> Result<(), RejectReason> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(RejectReason::InvalidPhone)
    }
}

/// "next monday" (any case) resolves relative to today; everything else
/// must be a strict `YYYY-MM-DD`.
fn resolve_date(text: &str, today: NaiveDate) -> Result<NaiveDate, RejectReason> {
    if text.eq_ignore_ascii_case(NEXT_MONDAY) {
        return Ok(next_monday(today));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| RejectReason::InvalidDate)
}

/// The next Monday strictly after `today`. When today is already Monday the
/// result is a full week out, never today itself.
fn next_monday(today: NaiveDate) -> NaiveDate {
    let mut days_ahead = (7 - today.weekday().num_days_from_monday() as i64) % 7;
    if days_ahead == 0 {
        days_ahead = 7;
    }
    today + Duration::days(days_ahead)
}

/// The booking day is compared at midnight, so today's date counts as past
/// once the clock has moved on from 00:00.
fn check_not_past(date: NaiveDate, now: NaiveDateTime) -> Result<(), RejectReason> {
    if date.and_time(NaiveTime::MIN) < now {
        return Err(RejectReason::PastDate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn payload(name: &str, phone: &str, email: &str, date: &str) -> AppointmentPayload {
        AppointmentPayload {
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
            email: Some(email.to_string()),
            date: Some(date.to_string()),
        }
    }

    fn reason(outcome: ValidationOutcome) -> RejectReason {
        match outcome {
            ValidationOutcome::Rejected(reason) => reason,
            ValidationOutcome::Accepted(request) => {
                panic!("expected rejection, got {request:?}")
            }
        }
    }

    #[test]
    fn test_valid_payload_accepted() {
        let outcome = validate(
            &payload("Alice", "1234567890", "alice@example.com", "2031-05-20"),
            dt("2025-06-16 12:00"),
        );

        match outcome {
            ValidationOutcome::Accepted(request) => {
                assert_eq!(request.name, "Alice");
                assert_eq!(request.date, NaiveDate::from_ymd_opt(2031, 5, 20).unwrap());
            }
            ValidationOutcome::Rejected(reason) => panic!("rejected with {reason:?}"),
        }
    }

    #[test]
    fn test_missing_fields() {
        let now = dt("2025-06-16 12:00");
        let full = payload("Alice", "1234567890", "alice@example.com", "2031-05-20");

        for strip in 0..4 {
            let mut p = full.clone();
            match strip {
                0 => p.name = None,
                1 => p.phone = None,
                2 => p.email = None,
                _ => p.date = None,
            }
            assert_eq!(reason(validate(&p, now)), RejectReason::MissingField);
        }
    }

    #[test]
    fn test_missing_field_checked_before_email() {
        let mut p = payload("Alice", "1234567890", "not-an-email", "2031-05-20");
        p.date = None;
        let outcome = validate(&p, dt("2025-06-16 12:00"));
        assert_eq!(reason(outcome), RejectReason::MissingField);
    }

    #[test]
    fn test_invalid_email() {
        let outcome = validate(
            &payload("Alice", "1234567890", "not-an-email", "2031-05-20"),
            dt("2025-06-16 12:00"),
        );
        assert_eq!(reason(outcome), RejectReason::InvalidEmail);
    }

    #[test]
    fn test_minimal_email_passes() {
        let outcome = validate(
            &payload("Alice", "1234567890", "a@b.co", "2031-05-20"),
            dt("2025-06-16 12:00"),
        );
        assert!(matches!(outcome, ValidationOutcome::Accepted(_)));
    }

    #[test]
    fn test_email_checked_before_phone() {
        let outcome = validate(
            &payload("Alice", "12345", "not-an-email", "2031-05-20"),
            dt("2025-06-16 12:00"),
        );
        assert_eq!(reason(outcome), RejectReason::InvalidEmail);
    }

    #[test]
    fn test_phone_too_short() {
        let outcome = validate(
            &payload("Alice", "12345", "alice@example.com", "2031-05-20"),
            dt("2025-06-16 12:00"),
        );
        assert_eq!(reason(outcome), RejectReason::InvalidPhone);
    }

    #[test]
    fn test_phone_with_plus_passes() {
        let outcome = validate(
            &payload("Alice", "+12345678901", "alice@example.com", "2031-05-20"),
            dt("2025-06-16 12:00"),
        );
        assert!(matches!(outcome, ValidationOutcome::Accepted(_)));
    }

    #[test]
    fn test_phone_rejects_letters_and_overlong() {
        let now = dt("2025-06-16 12:00");
        for phone in ["12345abc90", "+1 234 567 8901", "1234567890123456"] {
            let outcome = validate(&payload("Alice", phone, "alice@example.com", "2031-05-20"), now);
            assert_eq!(reason(outcome), RejectReason::InvalidPhone, "phone: {phone}");
        }
    }

    #[test]
    fn test_unparsable_date() {
        let now = dt("2025-06-16 12:00");
        for date in ["not-a-date", "2025-13-01", "05/20/2031", "2031-5-2 extra"] {
            let outcome = validate(&payload("Alice", "1234567890", "alice@example.com", date), now);
            assert_eq!(reason(outcome), RejectReason::InvalidDate, "date: {date}");
        }
    }

    #[test]
    fn test_past_date() {
        let outcome = validate(
            &payload("Alice", "1234567890", "alice@example.com", "2000-01-01"),
            dt("2025-06-16 12:00"),
        );
        assert_eq!(reason(outcome), RejectReason::PastDate);
    }

    #[test]
    fn test_today_counts_as_past_after_midnight() {
        // The resolved day is compared at 00:00, so by noon it is already past.
        let outcome = validate(
            &payload("Alice", "1234567890", "alice@example.com", "2025-06-16"),
            dt("2025-06-16 12:00"),
        );
        assert_eq!(reason(outcome), RejectReason::PastDate);
    }

    #[test]
    fn test_tomorrow_accepted() {
        let outcome = validate(
            &payload("Alice", "1234567890", "alice@example.com", "2025-06-17"),
            dt("2025-06-16 23:59"),
        );
        assert!(matches!(outcome, ValidationOutcome::Accepted(_)));
    }

    #[test]
    fn test_next_monday_from_every_weekday() {
        // 2025-06-16 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();

        for offset in 0..7 {
            let today = monday + Duration::days(offset);
            let resolved = next_monday(today);

            assert_eq!(resolved.weekday(), Weekday::Mon, "from {today}");
            assert!(resolved > today, "from {today}");
            assert!(resolved - today <= Duration::days(7), "from {today}");
        }

        // From Monday itself the jump is a full week, not zero days.
        assert_eq!(
            next_monday(monday),
            NaiveDate::from_ymd_opt(2025, 6, 23).unwrap()
        );
    }

    #[test]
    fn test_next_monday_keyword_case_insensitive() {
        let now = dt("2025-06-18 09:00"); // a Wednesday

        for date in ["next monday", "Next Monday", "NEXT MONDAY"] {
            let outcome = validate(&payload("Alice", "1234567890", "alice@example.com", date), now);
            match outcome {
                ValidationOutcome::Accepted(request) => {
                    assert_eq!(request.date, NaiveDate::from_ymd_opt(2025, 6, 23).unwrap());
                }
                ValidationOutcome::Rejected(reason) => panic!("rejected with {reason:?}"),
            }
        }
    }

    #[test]
    fn test_same_day_idempotence() {
        let p = payload("Alice", "1234567890", "alice@example.com", "next monday");
        let morning = validate(&p, dt("2025-06-18 08:00"));
        let evening = validate(&p, dt("2025-06-18 22:30"));
        assert_eq!(morning, evening);
    }
}
