use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::WaitError;

// <digits and dots, at least one digit><letters>, covering the whole segment
static DURATION_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^([0-9.]*[0-9][0-9.]*)([A-Za-z]+)$").expect("Invalid duration regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
  Milliseconds,
  Seconds,
  Minutes,
}

impl Unit {
  pub fn factor(&self) -> f64 {
    match self {
      Unit::Milliseconds => 1.0,
      Unit::Seconds => 1000.0,
      Unit::Minutes => 60_000.0,
    }
  }

  pub fn long_name(&self) -> &'static str {
    match self {
      Unit::Milliseconds => "millisecond(s)",
      Unit::Seconds => "second(s)",
      Unit::Minutes => "minute(s)",
    }
  }
}

impl FromStr for Unit {
  type Err = WaitError;

  // case sensitive: "S" is not seconds
  fn from_str(src: &str) -> Result<Self, Self::Err> {
    match src {
      "ms" => Ok(Unit::Milliseconds),
      "s" => Ok(Unit::Seconds),
      "m" => Ok(Unit::Minutes),
      other => Err(WaitError::UnrecognizedUnit { unit: other.to_string() }),
    }
  }
}

/// A wait parsed out of a request path such as `/3m` or `/1.5s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationRequest {
  pub magnitude: f64,
  pub unit: Unit,
}

impl DurationRequest {
  /// Parses a full request path. The leading `/` is optional; nothing may
  /// follow the unit.
  pub fn from_path(path: &str) -> Result<DurationRequest, WaitError> {
    let segment = path.strip_prefix('/').unwrap_or(path);
    let captures = DURATION_REGEX
      .captures(segment)
      .ok_or_else(|| WaitError::MalformedRequest { input: path.to_string() })?;

    let number = &captures[1];
    let magnitude = number
      .parse::<f64>()
      .map_err(|_| WaitError::UnparsableNumber { number: number.to_string() })?;
    let unit = captures[2].parse::<Unit>()?;

    Ok(DurationRequest { magnitude, unit })
  }

  pub fn milliseconds(&self) -> f64 {
    self.magnitude * self.unit.factor()
  }

  /// Whole milliseconds to sleep. Fractions are dropped and anything past
  /// `u64::MAX` saturates.
  pub fn sleep_duration(&self) -> Duration {
    Duration::from_millis(self.milliseconds() as u64)
  }

  pub fn confirmation(&self) -> String {
    format!(
      "OK\nWaited {} {} ({} ms)\n",
      self.magnitude,
      self.unit.long_name(),
      self.milliseconds()
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_each_unit() {
    let req = DurationRequest::from_path("/3m").unwrap();
    assert_eq!(req.unit, Unit::Minutes);
    assert_eq!(req.milliseconds(), 180_000.0);

    let req = DurationRequest::from_path("/10s").unwrap();
    assert_eq!(req.unit, Unit::Seconds);
    assert_eq!(req.sleep_duration(), Duration::from_secs(10));

    let req = DurationRequest::from_path("/50ms").unwrap();
    assert_eq!(req.unit, Unit::Milliseconds);
    assert_eq!(req.sleep_duration(), Duration::from_millis(50));
  }

  #[test]
  fn confirmation_matches_wire_format() {
    let req = DurationRequest::from_path("/3m").unwrap();
    assert_eq!(req.confirmation(), "OK\nWaited 3 minute(s) (180000 ms)\n");

    let req = DurationRequest::from_path("/50ms").unwrap();
    assert_eq!(req.confirmation(), "OK\nWaited 50 millisecond(s) (50 ms)\n");
  }

  #[test]
  fn accepts_decimal_magnitudes() {
    let req = DurationRequest::from_path("/1.5s").unwrap();
    assert_eq!(req.magnitude, 1.5);
    assert_eq!(req.sleep_duration(), Duration::from_millis(1500));
    assert_eq!(req.confirmation(), "OK\nWaited 1.5 second(s) (1500 ms)\n");
  }

  #[test]
  fn truncates_fractional_milliseconds() {
    let req = DurationRequest::from_path("/2.9ms").unwrap();
    assert_eq!(req.sleep_duration(), Duration::from_millis(2));
  }

  #[test]
  fn zero_is_a_valid_wait() {
    let req = DurationRequest::from_path("/0s").unwrap();
    assert_eq!(req.sleep_duration(), Duration::ZERO);
  }

  #[test]
  fn rejects_paths_outside_the_grammar() {
    for path in ["/abc", "/123", "/3s/extra", "/-3s", "/s3", "/3 s", "/.s", ""] {
      assert_eq!(
        DurationRequest::from_path(path),
        Err(WaitError::MalformedRequest { input: path.to_string() }),
        "path {:?}",
        path
      );
    }
  }

  #[test]
  fn reports_unparsable_number() {
    assert_eq!(
      DurationRequest::from_path("/..3s"),
      Err(WaitError::UnparsableNumber { number: "..3".to_string() })
    );
    assert_eq!(
      DurationRequest::from_path("/1.2.3ms"),
      Err(WaitError::UnparsableNumber { number: "1.2.3".to_string() })
    );
  }

  #[test]
  fn units_are_case_sensitive() {
    for (path, unit) in [("/5h", "h"), ("/5S", "S"), ("/5sec", "sec"), ("/5MS", "MS")] {
      assert_eq!(
        DurationRequest::from_path(path),
        Err(WaitError::UnrecognizedUnit { unit: unit.to_string() })
      );
    }
  }

  #[test]
  fn huge_magnitudes_saturate() {
    let digits = "9".repeat(400);
    let req = DurationRequest::from_path(&format!("/{}m", digits)).unwrap();
    assert_eq!(req.sleep_duration(), Duration::from_millis(u64::MAX));
  }
}
