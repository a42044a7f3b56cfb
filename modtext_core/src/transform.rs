//! Named numeric transforms ("index handlers") applied to stat bounds before display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value produced by the transform pipeline.
///
/// Most transforms yield a plain number. The `_Ndp` unit conversions yield a
/// fixed-decimal value that always prints with exactly `places` decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayValue {
    Number(f64),
    Fixed { value: f64, places: usize },
}

impl DisplayValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            DisplayValue::Number(v) => v,
            DisplayValue::Fixed { value, .. } => value,
        }
    }

    /// Whether a live value counts as present when prefixing a range.
    ///
    /// A plain zero (or NaN) is absent. A fixed-decimal value is text and
    /// therefore always present, even `"0.0"`.
    pub fn is_present(&self) -> bool {
        match *self {
            DisplayValue::Number(v) => v != 0.0 && !v.is_nan(),
            DisplayValue::Fixed { .. } => true,
        }
    }
}

impl From<f64> for DisplayValue {
    fn from(v: f64) -> Self {
        DisplayValue::Number(v)
    }
}

/// Plain numbers print positionally at every magnitude, so `1e21` prints
/// as `1000000000000000000000` where item text tools would show `1e+21`.
/// Authored stat ranges stay far inside that range.
impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            // -0 prints as 0
            DisplayValue::Number(v) if v == 0.0 => write!(f, "0"),
            DisplayValue::Number(v) => write!(f, "{}", v),
            DisplayValue::Fixed { value, places } => f.write_str(&to_fixed(value, places)),
        }
    }
}

/// Format with `places` decimals, rounding exact ties away from zero.
///
/// `format!` rounds ties to even (`2.5` -> `"2"`); item text expects `"3"`.
pub fn to_fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let digits = format!("{:.*}", places + 30, value.abs());
    let tail = digits
        .split_once('.')
        .map(|(_, frac)| &frac[places..])
        .unwrap_or("");
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let rounded = if is_tie {
        let nudge = 0.25 * 10f64.powi(-(places as i32));
        format!("{:.*}", places, value.abs() + nudge)
    } else {
        format!("{:.*}", places, value.abs())
    };

    let is_zero = rounded.bytes().all(|b| b == b'0' || b == b'.');
    if value < 0.0 && !is_zero {
        format!("-{}", rounded)
    } else {
        rounded
    }
}

/// A named numeric transform.
///
/// Names follow the stat translation data files. Any name not listed here
/// parses to [`Transform::Unknown`], which passes values through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Transform {
    ThirtyPercentOfValue,
    SixtyPercentOfValue,
    DecisecondsToSeconds,
    MillisecondsToSeconds,
    MillisecondsToSeconds0dp,
    MillisecondsToSeconds1dp,
    MillisecondsToSeconds2dp,
    PerMinuteToPerSecond,
    PerMinuteToPerSecond0dp,
    PerMinuteToPerSecond1dp,
    PerMinuteToPerSecond2dp,
    DivideByOneHundred,
    DivideByOneHundredAndNegate,
    DivideByOneHundred2dp,
    Negate,
    MultiplicativeDamageModifier,
    MultiplicativePermyriadDamageModifier,
    PermyriadToPercent,
    OldLeechPercent,
    OldLeechPermyriad,
    DivideByTwo0dp,
    DivideBySix,
    DivideByTen0dp,
    DivideByTwelve,
    DivideByFifteen0dp,
    DivideByTwentyThenDouble0dp,
    TimesTwenty,
    /// Unrecognised handler name, kept for diagnostics
    Unknown(String),
}

impl Transform {
    pub fn name(&self) -> &str {
        match self {
            Transform::ThirtyPercentOfValue => "30%_of_value",
            Transform::SixtyPercentOfValue => "60%_of_value",
            Transform::DecisecondsToSeconds => "deciseconds_to_seconds",
            Transform::MillisecondsToSeconds => "milliseconds_to_seconds",
            Transform::MillisecondsToSeconds0dp => "milliseconds_to_seconds_0dp",
            Transform::MillisecondsToSeconds1dp => "milliseconds_to_seconds_1dp",
            Transform::MillisecondsToSeconds2dp => "milliseconds_to_seconds_2dp",
            Transform::PerMinuteToPerSecond => "per_minute_to_per_second",
            Transform::PerMinuteToPerSecond0dp => "per_minute_to_per_second_0dp",
            Transform::PerMinuteToPerSecond1dp => "per_minute_to_per_second_1dp",
            Transform::PerMinuteToPerSecond2dp => "per_minute_to_per_second_2dp",
            Transform::DivideByOneHundred => "divide_by_one_hundred",
            Transform::DivideByOneHundredAndNegate => "divide_by_one_hundred_and_negate",
            Transform::DivideByOneHundred2dp => "divide_by_one_hundred_2dp",
            Transform::Negate => "negate",
            Transform::MultiplicativeDamageModifier => "multiplicative_damage_modifier",
            Transform::MultiplicativePermyriadDamageModifier => {
                "multiplicative_permyriad_damage_modifier"
            }
            Transform::PermyriadToPercent => "permyriad_to_percent",
            Transform::OldLeechPercent => "old_leech_percent",
            Transform::OldLeechPermyriad => "old_leech_permyriad",
            Transform::DivideByTwo0dp => "divide_by_two_0dp",
            Transform::DivideBySix => "divide_by_six",
            Transform::DivideByTen0dp => "divide_by_ten_0dp",
            Transform::DivideByTwelve => "divide_by_twelve",
            Transform::DivideByFifteen0dp => "divide_by_fifteen_0dp",
            Transform::DivideByTwentyThenDouble0dp => "divide_by_twenty_then_double_0dp",
            Transform::TimesTwenty => "times_twenty",
            Transform::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Transform::Unknown(_))
    }

    /// Apply this transform to a single value
    pub fn apply(&self, input: DisplayValue) -> DisplayValue {
        use DisplayValue::{Fixed, Number};

        let v = input.as_f64();
        match self {
            Transform::ThirtyPercentOfValue => Number(v * 0.3),
            Transform::SixtyPercentOfValue => Number(v * 0.6),
            Transform::DecisecondsToSeconds => Number(v / 10.0),
            Transform::MillisecondsToSeconds => Number(v / 1000.0),
            Transform::MillisecondsToSeconds0dp => Fixed {
                value: v / 1000.0,
                places: 0,
            },
            Transform::MillisecondsToSeconds1dp => Fixed {
                value: v / 1000.0,
                places: 1,
            },
            Transform::MillisecondsToSeconds2dp => Fixed {
                value: v / 1000.0,
                places: 2,
            },
            Transform::PerMinuteToPerSecond => Number(v / 60.0),
            Transform::PerMinuteToPerSecond0dp => Fixed {
                value: v / 60.0,
                places: 0,
            },
            Transform::PerMinuteToPerSecond1dp => Fixed {
                value: v / 60.0,
                places: 1,
            },
            Transform::PerMinuteToPerSecond2dp => Fixed {
                value: v / 60.0,
                places: 2,
            },
            Transform::DivideByOneHundred => Number(v / 100.0),
            Transform::DivideByOneHundredAndNegate => Number(-v / 100.0),
            Transform::DivideByOneHundred2dp => Fixed {
                value: v / 100.0,
                places: 2,
            },
            Transform::Negate => Number(-v),
            Transform::MultiplicativeDamageModifier => Number(v + 100.0),
            Transform::MultiplicativePermyriadDamageModifier => Number(v / 100.0 + 100.0),
            Transform::PermyriadToPercent => Number(v / 100.0),
            Transform::OldLeechPercent => Number(v / 5.0),
            Transform::OldLeechPermyriad => Number(v / 50.0),
            Transform::DivideByTwo0dp => Number((v / 2.0).floor()),
            Transform::DivideBySix => Number(v / 6.0),
            Transform::DivideByTen0dp => Number((v / 10.0).floor()),
            Transform::DivideByTwelve => Number(v / 12.0),
            Transform::DivideByFifteen0dp => Number((v / 15.0).floor()),
            Transform::DivideByTwentyThenDouble0dp => Number((v / 20.0).floor() * 2.0),
            Transform::TimesTwenty => Number(v * 20.0),
            Transform::Unknown(name) => {
                tracing::debug!(handler = %name, "unknown index handler, value passed through");
                input
            }
        }
    }
}

impl From<&str> for Transform {
    fn from(name: &str) -> Self {
        match name {
            "30%_of_value" => Transform::ThirtyPercentOfValue,
            "60%_of_value" => Transform::SixtyPercentOfValue,
            "deciseconds_to_seconds" => Transform::DecisecondsToSeconds,
            "milliseconds_to_seconds" => Transform::MillisecondsToSeconds,
            "milliseconds_to_seconds_0dp" => Transform::MillisecondsToSeconds0dp,
            "milliseconds_to_seconds_1dp" => Transform::MillisecondsToSeconds1dp,
            "milliseconds_to_seconds_2dp" => Transform::MillisecondsToSeconds2dp,
            "per_minute_to_per_second" => Transform::PerMinuteToPerSecond,
            "per_minute_to_per_second_0dp" => Transform::PerMinuteToPerSecond0dp,
            "per_minute_to_per_second_1dp" => Transform::PerMinuteToPerSecond1dp,
            "per_minute_to_per_second_2dp" => Transform::PerMinuteToPerSecond2dp,
            "divide_by_one_hundred" => Transform::DivideByOneHundred,
            "divide_by_one_hundred_and_negate" => Transform::DivideByOneHundredAndNegate,
            "divide_by_one_hundred_2dp" => Transform::DivideByOneHundred2dp,
            "negate" => Transform::Negate,
            "multiplicative_damage_modifier" => Transform::MultiplicativeDamageModifier,
            "multiplicative_permyriad_damage_modifier" => {
                Transform::MultiplicativePermyriadDamageModifier
            }
            "permyriad_to_percent" => Transform::PermyriadToPercent,
            "old_leech_percent" => Transform::OldLeechPercent,
            "old_leech_permyriad" => Transform::OldLeechPermyriad,
            "divide_by_two_0dp" => Transform::DivideByTwo0dp,
            "divide_by_six" => Transform::DivideBySix,
            "divide_by_ten_0dp" => Transform::DivideByTen0dp,
            "divide_by_twelve" => Transform::DivideByTwelve,
            "divide_by_fifteen_0dp" => Transform::DivideByFifteen0dp,
            "divide_by_twenty_then_double_0dp" => Transform::DivideByTwentyThenDouble0dp,
            "times_twenty" => Transform::TimesTwenty,
            other => Transform::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Transform {
    fn from(name: String) -> Self {
        Transform::from(name.as_str())
    }
}

impl From<Transform> for String {
    fn from(t: Transform) -> Self {
        t.name().to_string()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run `raw` through each transform in order, left to right
pub fn apply_all(transforms: &[Transform], raw: f64) -> DisplayValue {
    transforms
        .iter()
        .fold(DisplayValue::Number(raw), |acc, t| t.apply(acc))
}
