use chrono::{NaiveDate, Utc};

/// Gregorian leap year rule: divisible by 4, except centuries, except
/// centuries divisible by 400
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the given month, or None if the month is out of range
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        },
        _ => return None,
    };
    Some(days)
}

/// Parses `input` as a `year-month-day` calendar date and returns the
/// canonical form. Returns None for malformed or non-numeric input, months
/// outside [1,12] and days outside the month's real length
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.trim().split('-').collect();
    if parts.len() != 3 {
        return None;
    }

    let year: i32 = numeric(parts[0])?.parse().ok()?;
    let month: u32 = numeric(parts[1])?.parse().ok()?;
    let day: u32 = numeric(parts[2])?.parse().ok()?;

    if !(1..=12).contains(&month) {
        return None;
    }
    if day < 1 || day > days_in_month(year, month)? {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

fn numeric(s: &str) -> Option<&str> {
    (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())).then_some(s)
}

/// True only if `input` denotes a real calendar date
pub fn is_valid_calendar_date(input: &str) -> bool {
    parse_date(input).is_some()
}

/// Date coercion used when storing an exercise: a missing or invalid date
/// falls back to the current UTC date
pub fn date_or_today(input: Option<&str>) -> NaiveDate {
    input.and_then(parse_date).unwrap_or_else(|| Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_real_dates() {
        for input in [
            "2023-01-05",
            "2023-1-5",
            "2024-02-29",
            "2000-02-29",
            "1996-02-29",
            "2023-10-31",
            "2023-12-31",
            "1900-02-28",
        ] {
            assert!(is_valid_calendar_date(input), "{input} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for input in [
            "",
            "not-a-date",
            "2023",
            "2023-01",
            "2023-01-05-06",
            "2023-01-",
            "-01-05",
            "2023--05",
            "20a3-01-05",
            "2023-1.0-05",
            "2023-01-+5",
        ] {
            assert!(!is_valid_calendar_date(input), "{input:?} should be invalid");
        }
        // Trimmed whitespace around an otherwise valid date is fine
        assert!(is_valid_calendar_date(" 2023-01-05 "));
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(!is_valid_calendar_date("2023-00-10"));
        assert!(!is_valid_calendar_date("2023-13-10"));
        assert!(!is_valid_calendar_date("2023-01-00"));
        assert!(!is_valid_calendar_date("2023-01-32"));
        assert!(!is_valid_calendar_date("2023-04-31"));
        assert!(!is_valid_calendar_date("2023-02-29"));
        // 1900 is a century year not divisible by 400
        assert!(!is_valid_calendar_date("1900-02-29"));
    }

    #[test]
    fn october_has_thirty_one_days() {
        // Every 31-day month, explicitly
        for month in [1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(days_in_month(2023, month), Some(31));
            assert!(is_valid_calendar_date(&format!("2023-{month:02}-31")));
        }
        for month in [4, 6, 9, 11] {
            assert_eq!(days_in_month(2023, month), Some(30));
            assert!(!is_valid_calendar_date(&format!("2023-{month:02}-31")));
        }
    }

    #[test]
    fn agrees_with_reference_calendar() {
        // Includes a leap year and a century-boundary non-leap year
        for year in [1900, 1996, 2000, 2023, 2024] {
            for month in 0..=13u32 {
                for day in 0..=32u32 {
                    let input = format!("{year}-{month:02}-{day:02}");
                    let reference = NaiveDate::from_ymd_opt(year, month, day);
                    assert_eq!(
                        is_valid_calendar_date(&input),
                        reference.is_some(),
                        "disagreement on {input}"
                    );
                    assert_eq!(parse_date(&input), reference);
                }
            }
        }
    }

    #[test]
    fn parse_normalizes_unpadded_input() {
        assert_eq!(
            parse_date("2023-1-5"),
            NaiveDate::from_ymd_opt(2023, 1, 5)
        );
    }

    #[test]
    fn fallback_to_today() {
        let today = Utc::now().date_naive();
        assert_eq!(date_or_today(None), today);
        assert_eq!(date_or_today(Some("not-a-date")), today);
        assert_eq!(
            date_or_today(Some("2023-01-05")),
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
        );
    }
}
