// ── Check domain types ──

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Day of month on which the billing period rolls over (1–31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RolloverDay(u8);

impl RolloverDay {
    pub fn new(day: u8) -> Result<Self, CoreError> {
        if (1..=31).contains(&day) {
            Ok(Self(day))
        } else {
            Err(CoreError::ValidationFailed {
                message: format!("rollover day must be between 1 and 31, got {day}"),
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RolloverDay {
    type Error = CoreError;

    fn try_from(day: u8) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl fmt::Display for RolloverDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One counter direction, as seen from the monitored host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TrafficDirection {
    Up,
    Down,
}

impl TrafficDirection {
    /// RTG records from the router's side: the host's upload is the
    /// interface's outbound octets.
    pub fn counter_table(self) -> rtgquota_db::CounterTable {
        match self {
            Self::Up => rtgquota_db::CounterTable::OutOctets,
            Self::Down => rtgquota_db::CounterTable::InOctets,
        }
    }
}

/// Which directions count against the quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DirectionFilter {
    Up,
    Down,
    #[default]
    Both,
}

impl DirectionFilter {
    pub fn includes(self, direction: TrafficDirection) -> bool {
        matches!(
            (self, direction),
            (Self::Both, _)
                | (Self::Up, TrafficDirection::Up)
                | (Self::Down, TrafficDirection::Down)
        )
    }
}

/// Byte totals since the last rollover. Unrequested directions stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageTotals {
    pub up: u64,
    pub down: u64,
}

impl UsageTotals {
    pub fn total(self) -> u64 {
        self.up.saturating_add(self.down)
    }
}

/// Nagios plugin status. The discriminant is the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
            Self::Unknown => 3,
        }
    }
}

/// Buffer/play pair shaping a dynamic threshold curve.
///
/// The curve starts at `play` on the rollover day and ends at
/// `100 - buffer` on the last day of the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicParams {
    pub buffer: u8,
    pub play: u8,
}

impl DynamicParams {
    /// Default curve for the warning threshold: 5% → 75%.
    pub const WARN: Self = Self {
        buffer: 25,
        play: 5,
    };

    /// Default curve for the critical threshold: 10% → 90%.
    pub const CRIT: Self = Self {
        buffer: 10,
        play: 10,
    };

    pub fn new(buffer: u8, play: u8) -> Result<Self, CoreError> {
        for (name, value) in [("buffer", buffer), ("play", play)] {
            if !(1..=100).contains(&value) {
                return Err(CoreError::ValidationFailed {
                    message: format!("dynamic {name} must be between 1 and 100, got {value}"),
                });
            }
        }
        Ok(Self { buffer, play })
    }
}

/// How a warn or critical threshold is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMode {
    /// Fixed percentage of the quota (1–100).
    Fixed(u8),
    /// Computed from the position within the billing period.
    #[default]
    Dynamic,
}

impl FromStr for ThresholdMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "dyn" {
            return Ok(Self::Dynamic);
        }
        match s.parse::<u8>() {
            Ok(pct) if (1..=100).contains(&pct) => Ok(Self::Fixed(pct)),
            _ => Err(format!(
                "expected 'dyn' or an integer between 1 and 100, got '{s}'"
            )),
        }
    }
}

impl fmt::Display for ThresholdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(pct) => write!(f, "{pct}"),
            Self::Dynamic => f.write_str("dyn"),
        }
    }
}

/// Resolved warn/critical percentages.
///
/// Dynamic values are not clamped, so either may fall outside 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warn: i32,
    pub crit: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rollover_day_bounds() {
        assert!(RolloverDay::new(0).is_err());
        assert_eq!(RolloverDay::new(1).unwrap().get(), 1);
        assert_eq!(RolloverDay::new(31).unwrap().get(), 31);
        assert!(RolloverDay::try_from(32).is_err());
    }

    #[test]
    fn threshold_mode_parses_dyn_and_percentages() {
        assert_eq!("dyn".parse::<ThresholdMode>().unwrap(), ThresholdMode::Dynamic);
        assert_eq!("80".parse::<ThresholdMode>().unwrap(), ThresholdMode::Fixed(80));
        assert_eq!("100".parse::<ThresholdMode>().unwrap(), ThresholdMode::Fixed(100));
        assert!("0".parse::<ThresholdMode>().is_err());
        assert!("101".parse::<ThresholdMode>().is_err());
        assert!("DYN".parse::<ThresholdMode>().is_err());
        assert!("".parse::<ThresholdMode>().is_err());
    }

    #[test]
    fn direction_filter_includes() {
        assert!(DirectionFilter::Both.includes(TrafficDirection::Up));
        assert!(DirectionFilter::Both.includes(TrafficDirection::Down));
        assert!(DirectionFilter::Up.includes(TrafficDirection::Up));
        assert!(!DirectionFilter::Up.includes(TrafficDirection::Down));
        assert!(!DirectionFilter::Down.includes(TrafficDirection::Up));
    }

    #[test]
    fn direction_filter_from_str() {
        assert_eq!("up".parse::<DirectionFilter>().unwrap(), DirectionFilter::Up);
        assert_eq!("both".parse::<DirectionFilter>().unwrap(), DirectionFilter::Both);
        assert!("sideways".parse::<DirectionFilter>().is_err());
    }

    #[test]
    fn status_labels_and_exit_codes() {
        assert_eq!(Status::Ok.to_string(), "OK");
        assert_eq!(Status::Warning.to_string(), "WARNING");
        assert_eq!(Status::Critical.exit_code(), 2);
        assert_eq!(Status::Unknown.exit_code(), 3);
    }

    #[test]
    fn dynamic_params_reject_out_of_range() {
        assert!(DynamicParams::new(0, 5).is_err());
        assert!(DynamicParams::new(25, 101).is_err());
        assert_eq!(DynamicParams::new(25, 5).unwrap(), DynamicParams::WARN);
    }

    #[test]
    fn up_counts_outbound_octets() {
        assert_eq!(
            TrafficDirection::Up.counter_table(),
            rtgquota_db::CounterTable::OutOctets
        );
        assert_eq!(
            TrafficDirection::Down.counter_table(),
            rtgquota_db::CounterTable::InOctets
        );
    }
}
