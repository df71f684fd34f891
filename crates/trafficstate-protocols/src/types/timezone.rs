//! Timezone in which recurrence schedules are evaluated.

use std::fmt;
use std::str::FromStr;

use chrono::FixedOffset;

/// `"UTC"`, `"Local"` or a fixed offset such as `"+01:00"`, `"-0530"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTimezone {
    Utc,
    Local,
    Fixed(FixedOffset),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTimezone(pub String);

impl fmt::Display for InvalidTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid timezone '{}': expected UTC, Local or an offset like +01:00",
            self.0
        )
    }
}

impl std::error::Error for InvalidTimezone {}

impl FromStr for ScheduleTimezone {
    type Err = InvalidTimezone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || InvalidTimezone(s.to_string());

        if raw.eq_ignore_ascii_case("utc") || raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("etc/utc") {
            return Ok(Self::Utc);
        }
        if raw.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }

        let (sign, rest) = match raw.chars().next() {
            Some('+') => (1, &raw[1..]),
            Some('-') => (-1, &raw[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::Fixed)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for ScheduleTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "UTC"),
            Self::Local => write!(f, "Local"),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_zones() {
        assert_eq!("UTC".parse::<ScheduleTimezone>().unwrap(), ScheduleTimezone::Utc);
        assert_eq!("utc".parse::<ScheduleTimezone>().unwrap(), ScheduleTimezone::Utc);
        assert_eq!("Local".parse::<ScheduleTimezone>().unwrap(), ScheduleTimezone::Local);
    }

    #[test]
    fn test_fixed_offsets() {
        let tz: ScheduleTimezone = "+01:00".parse().unwrap();
        assert_eq!(tz, ScheduleTimezone::Fixed(FixedOffset::east_opt(3600).unwrap()));

        let tz: ScheduleTimezone = "-0530".parse().unwrap();
        assert_eq!(tz, ScheduleTimezone::Fixed(FixedOffset::west_opt(5 * 3600 + 1800).unwrap()));
        assert_eq!(tz.to_string(), "-05:30");
    }

    #[test]
    fn test_invalid() {
        assert!("".parse::<ScheduleTimezone>().is_err());
        assert!("Europe/Berlin".parse::<ScheduleTimezone>().is_err());
        assert!("+25:00".parse::<ScheduleTimezone>().is_err());
        assert!("+1".parse::<ScheduleTimezone>().is_err());
    }
}
