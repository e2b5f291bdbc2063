//! Common utilities

use chrono::TimeDelta;

/// A signed duration given on the command line, e.g. `90`, `15m`, `2h`, `-1s`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxAge(pub TimeDelta);

impl std::str::FromStr for MaxAge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let split = body
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(body.len());
        let (digits, unit) = body.split_at(split);
        if digits.is_empty() {
            return Err(format!("Invalid duration: {}", s));
        }

        let value: i64 = digits
            .parse()
            .map_err(|_| format!("Invalid duration: {}", s))?;
        let value = if negative { -value } else { value };

        let delta = match unit.to_lowercase().as_str() {
            "" | "s" => TimeDelta::try_seconds(value),
            "m" => TimeDelta::try_minutes(value),
            "h" => TimeDelta::try_hours(value),
            "d" => TimeDelta::try_days(value),
            _ => return Err(format!("Unknown duration unit in: {}", s)),
        };

        delta
            .map(MaxAge)
            .ok_or_else(|| format!("Duration out of range: {}", s))
    }
}

/// Format a duration compactly, e.g. `1h5m3s`
pub fn format_age(age: TimeDelta) -> String {
    let total = age.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let mut rest = total.unsigned_abs();

    let mut out = String::from(sign);
    for (unit, secs) in [("d", 86_400), ("h", 3_600), ("m", 60)] {
        if rest >= secs {
            out.push_str(&format!("{}{}", rest / secs, unit));
            rest %= secs;
        }
    }
    if rest > 0 || out.len() == sign.len() {
        out.push_str(&format!("{}s", rest));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!("90".parse::<MaxAge>().unwrap().0, TimeDelta::seconds(90));
        assert_eq!("30s".parse::<MaxAge>().unwrap().0, TimeDelta::seconds(30));
        assert_eq!("15m".parse::<MaxAge>().unwrap().0, TimeDelta::minutes(15));
        assert_eq!("2H".parse::<MaxAge>().unwrap().0, TimeDelta::hours(2));
        assert_eq!("1d".parse::<MaxAge>().unwrap().0, TimeDelta::days(1));
    }

    #[test]
    fn test_parse_zero_and_negative() {
        assert_eq!("0".parse::<MaxAge>().unwrap().0, TimeDelta::zero());
        assert_eq!("-5m".parse::<MaxAge>().unwrap().0, TimeDelta::minutes(-5));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<MaxAge>().is_err());
        assert!("m".parse::<MaxAge>().is_err());
        assert!("10w".parse::<MaxAge>().unwrap_err().contains("Unknown duration unit"));
        assert!("1.5h".parse::<MaxAge>().is_err());
        assert!("99999999999999999999".parse::<MaxAge>().is_err());
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(TimeDelta::zero()), "0s");
        assert_eq!(format_age(TimeDelta::seconds(42)), "42s");
        assert_eq!(format_age(TimeDelta::seconds(3_903)), "1h5m3s");
        assert_eq!(format_age(TimeDelta::hours(2)), "2h");
        assert_eq!(format_age(TimeDelta::days(1) + TimeDelta::minutes(1)), "1d1m");
        assert_eq!(format_age(TimeDelta::seconds(-90)), "-1m30s");
    }
}
