//! Unit and device-class inference for measurement keys
//!
//! Station keys encode the physical quantity in a short prefix
//! (`airtemp_01mnavg`, `rainfal_24hracc`, ...). [`classify`] walks an ordered
//! rule list and returns the display metadata of the first matching rule.
//! Order matters: gust times and directions must be caught before the
//! generic wind-speed prefixes.
//!
//! # Examples
//!
//! ```
//! use domain::classifier::{DeviceClass, StateClass, UnitOfMeasurement, classify};
//!
//! let props = classify("airtemp_01mnavg");
//! assert_eq!(props.device_class, Some(DeviceClass::Temperature));
//! assert_eq!(props.unit, Some(UnitOfMeasurement::Celsius));
//! assert_eq!(props.state_class, Some(StateClass::Measurement));
//!
//! assert!(classify("windgst_01hrtim").is_empty());
//! assert!(classify("unknown_sensor").is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical quantity a sensor reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Air or dew-point temperature
    Temperature,
    /// Atmospheric pressure
    Pressure,
    /// Relative humidity
    Humidity,
    /// Rainfall
    Precipitation,
    /// Wind speed, gust or lull
    WindSpeed,
    /// Wind bearing
    WindDirection,
    /// Wind run
    Distance,
    /// Solar radiation
    Irradiance,
    /// Station supply voltage
    Voltage,
}

impl DeviceClass {
    /// Get the snake_case identifier used by host platforms
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Humidity => "humidity",
            Self::Precipitation => "precipitation",
            Self::WindSpeed => "wind_speed",
            Self::WindDirection => "wind_direction",
            Self::Distance => "distance",
            Self::Irradiance => "irradiance",
            Self::Voltage => "voltage",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit a sensor value is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOfMeasurement {
    /// Degrees Celsius
    #[serde(rename = "°C")]
    Celsius,
    /// Hectopascal
    #[serde(rename = "hPa")]
    Hectopascal,
    /// Percent
    #[serde(rename = "%")]
    Percentage,
    /// Millimetres of rain
    #[serde(rename = "mm")]
    Millimeters,
    /// Knots
    #[serde(rename = "kn")]
    Knots,
    /// Angular degrees
    #[serde(rename = "°")]
    Degrees,
    /// Kilometres
    #[serde(rename = "km")]
    Kilometers,
    /// Watts per square metre
    #[serde(rename = "W/m²")]
    WattsPerSquareMeter,
    /// Volts
    #[serde(rename = "V")]
    Volt,
}

impl UnitOfMeasurement {
    /// Get the unit symbol
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Hectopascal => "hPa",
            Self::Percentage => "%",
            Self::Millimeters => "mm",
            Self::Knots => "kn",
            Self::Degrees => "°",
            Self::Kilometers => "km",
            Self::WattsPerSquareMeter => "W/m²",
            Self::Volt => "V",
        }
    }
}

impl fmt::Display for UnitOfMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How a value behaves over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    /// Instantaneous measurement
    Measurement,
    /// Monotonically increasing accumulation that may reset
    TotalIncreasing,
}

impl StateClass {
    /// Get the snake_case identifier used by host platforms
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Measurement => "measurement",
            Self::TotalIncreasing => "total_increasing",
        }
    }
}

impl fmt::Display for StateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata inferred for a measurement key
///
/// Every field is optional; an all-`None` value means the key is unknown or
/// deliberately left untyped (e.g. gust timestamps).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorProperties {
    /// Physical quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<DeviceClass>,
    /// Unit of the native value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<UnitOfMeasurement>,
    /// Aggregation behaviour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_class: Option<StateClass>,
}

impl SensorProperties {
    /// Properties carrying no metadata at all
    pub const EMPTY: Self = Self {
        device_class: None,
        unit: None,
        state_class: None,
    };

    /// Properties for a plain measurement
    #[must_use]
    pub const fn measurement(device_class: DeviceClass, unit: UnitOfMeasurement) -> Self {
        Self {
            device_class: Some(device_class),
            unit: Some(unit),
            state_class: Some(StateClass::Measurement),
        }
    }

    /// Properties for an accumulating total
    #[must_use]
    pub const fn total_increasing(device_class: DeviceClass, unit: UnitOfMeasurement) -> Self {
        Self {
            device_class: Some(device_class),
            unit: Some(unit),
            state_class: Some(StateClass::TotalIncreasing),
        }
    }

    /// Properties without a state class (bearings cannot be averaged linearly)
    #[must_use]
    pub const fn unclassed(device_class: DeviceClass, unit: UnitOfMeasurement) -> Self {
        Self {
            device_class: Some(device_class),
            unit: Some(unit),
            state_class: None,
        }
    }

    /// Check whether no metadata is present
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.device_class.is_none() && self.unit.is_none() && self.state_class.is_none()
    }
}

/// Key pattern: any of `prefixes` and, when set, the `suffix`
#[derive(Debug, Clone, Copy)]
struct KeyMatcher {
    prefixes: &'static [&'static str],
    suffix: Option<&'static str>,
}

impl KeyMatcher {
    const fn prefix(prefixes: &'static [&'static str]) -> Self {
        Self {
            prefixes,
            suffix: None,
        }
    }

    const fn prefix_and_suffix(prefixes: &'static [&'static str], suffix: &'static str) -> Self {
        Self {
            prefixes,
            suffix: Some(suffix),
        }
    }

    fn matches(&self, key: &str) -> bool {
        self.prefixes.iter().any(|p| key.starts_with(p))
            && self.suffix.is_none_or(|s| key.ends_with(s))
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    matcher: KeyMatcher,
    properties: SensorProperties,
}

const GUST_PREFIXES: &[&str] = &["windgst", "wndgstm"];

const WIND_SPEED_PREFIXES: &[&str] = &[
    "windspd", "windgst", "windlul", "windcw", "windccw", "wndcwm", "wndccwm",
];

/// First match wins
const RULES: &[Rule] = &[
    Rule {
        matcher: KeyMatcher::prefix_and_suffix(GUST_PREFIXES, "tim"),
        properties: SensorProperties::EMPTY,
    },
    Rule {
        matcher: KeyMatcher::prefix(&["winddir", "wnddirm"]),
        properties: SensorProperties::unclassed(
            DeviceClass::WindDirection,
            UnitOfMeasurement::Degrees,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix_and_suffix(&["wind", "wnd"], "dir"),
        properties: SensorProperties::unclassed(
            DeviceClass::WindDirection,
            UnitOfMeasurement::Degrees,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix(&["pres"]),
        properties: SensorProperties::measurement(
            DeviceClass::Pressure,
            UnitOfMeasurement::Hectopascal,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix(&["airtemp", "dewtemp"]),
        properties: SensorProperties::measurement(
            DeviceClass::Temperature,
            UnitOfMeasurement::Celsius,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix(&["relhumd"]),
        properties: SensorProperties::measurement(
            DeviceClass::Humidity,
            UnitOfMeasurement::Percentage,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix_and_suffix(&["rainfal"], "acc"),
        properties: SensorProperties::total_increasing(
            DeviceClass::Precipitation,
            UnitOfMeasurement::Millimeters,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix(&["rainfal"]),
        properties: SensorProperties::measurement(
            DeviceClass::Precipitation,
            UnitOfMeasurement::Millimeters,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix(WIND_SPEED_PREFIXES),
        properties: SensorProperties::measurement(
            DeviceClass::WindSpeed,
            UnitOfMeasurement::Knots,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix(&["windrun"]),
        properties: SensorProperties::total_increasing(
            DeviceClass::Distance,
            UnitOfMeasurement::Kilometers,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix(&["solradn"]),
        properties: SensorProperties::measurement(
            DeviceClass::Irradiance,
            UnitOfMeasurement::WattsPerSquareMeter,
        ),
    },
    Rule {
        matcher: KeyMatcher::prefix(&["power_v"]),
        properties: SensorProperties::measurement(DeviceClass::Voltage, UnitOfMeasurement::Volt),
    },
];

/// Infer device class, unit and state class for a measurement key
///
/// Total and side-effect free: unknown keys yield [`SensorProperties::EMPTY`].
#[must_use]
pub fn classify(key: &str) -> SensorProperties {
    RULES
        .iter()
        .find(|rule| rule.matcher.matches(key))
        .map_or(SensorProperties::EMPTY, |rule| rule.properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_props(
        key: &str,
        device_class: DeviceClass,
        unit: UnitOfMeasurement,
        state_class: Option<StateClass>,
    ) {
        let props = classify(key);
        assert_eq!(props.device_class, Some(device_class), "device class of {key}");
        assert_eq!(props.unit, Some(unit), "unit of {key}");
        assert_eq!(props.state_class, state_class, "state class of {key}");
    }

    #[test]
    fn air_temperature() {
        assert_props(
            "airtemp_01mnavg",
            DeviceClass::Temperature,
            UnitOfMeasurement::Celsius,
            Some(StateClass::Measurement),
        );
    }

    #[test]
    fn dew_point_is_a_temperature() {
        assert_props(
            "dewtemp_01mnavg",
            DeviceClass::Temperature,
            UnitOfMeasurement::Celsius,
            Some(StateClass::Measurement),
        );
    }

    #[test]
    fn pressure_variants() {
        for key in [
            "presqfe_01hrmax",
            "presqnh_01hrmin",
            "pressen_01hrchg",
            "presmsl_01mnavg",
        ] {
            assert_props(
                key,
                DeviceClass::Pressure,
                UnitOfMeasurement::Hectopascal,
                Some(StateClass::Measurement),
            );
        }
    }

    #[test]
    fn relative_humidity() {
        assert_props(
            "relhumd_01hrmax",
            DeviceClass::Humidity,
            UnitOfMeasurement::Percentage,
            Some(StateClass::Measurement),
        );
    }

    #[test]
    fn accumulated_rainfall_is_total_increasing() {
        assert_props(
            "rainfal_01mnacc",
            DeviceClass::Precipitation,
            UnitOfMeasurement::Millimeters,
            Some(StateClass::TotalIncreasing),
        );
        assert_props(
            "rainfal_07dyacc",
            DeviceClass::Precipitation,
            UnitOfMeasurement::Millimeters,
            Some(StateClass::TotalIncreasing),
        );
    }

    #[test]
    fn averaged_rainfall_is_measurement() {
        assert_props(
            "rainfal_01mnavg",
            DeviceClass::Precipitation,
            UnitOfMeasurement::Millimeters,
            Some(StateClass::Measurement),
        );
        assert_props(
            "rainfal_10mnmax",
            DeviceClass::Precipitation,
            UnitOfMeasurement::Millimeters,
            Some(StateClass::Measurement),
        );
    }

    #[test]
    fn wind_speed_family() {
        for key in [
            "windspd_01mnavg",
            "windgst_10mnmax",
            "windlul_01mnmin",
            "windcw__10mnmax",
            "windccw_01hrmax",
            "wndcwm__01hrmax",
            "wndccwm_01hrmax",
        ] {
            assert_props(
                key,
                DeviceClass::WindSpeed,
                UnitOfMeasurement::Knots,
                Some(StateClass::Measurement),
            );
        }
    }

    #[test]
    fn wind_direction_has_no_state_class() {
        for key in [
            "winddir_01mnavg",
            "winddir_10mnavg",
            "wnddirm_01mnavg",
            "windgst_01hrdir",
            "wndgstm_01hrdir",
        ] {
            assert_props(
                key,
                DeviceClass::WindDirection,
                UnitOfMeasurement::Degrees,
                None,
            );
        }
    }

    #[test]
    fn gust_time_is_untyped() {
        assert!(classify("windgst_01hrtim").is_empty());
        assert!(classify("wndgstm_01hrtim").is_empty());
    }

    #[test]
    fn wind_run_is_distance() {
        assert_props(
            "windrun_01hracc",
            DeviceClass::Distance,
            UnitOfMeasurement::Kilometers,
            Some(StateClass::TotalIncreasing),
        );
    }

    #[test]
    fn solar_radiation() {
        assert_props(
            "solradn_01mnavg",
            DeviceClass::Irradiance,
            UnitOfMeasurement::WattsPerSquareMeter,
            Some(StateClass::Measurement),
        );
    }

    #[test]
    fn supply_voltage() {
        assert_props(
            "power_v_01mnavg",
            DeviceClass::Voltage,
            UnitOfMeasurement::Volt,
            Some(StateClass::Measurement),
        );
    }

    #[test]
    fn unknown_keys_are_empty() {
        assert_eq!(classify("unknown_sensor"), SensorProperties::EMPTY);
        assert!(classify("id").is_empty());
        assert!(classify("record_time").is_empty());
        assert!(classify("wvpk2ht_xxmnavg").is_empty());
        assert!(classify("").is_empty());
    }

    #[test]
    fn symbols_match_host_conventions() {
        assert_eq!(UnitOfMeasurement::Celsius.symbol(), "°C");
        assert_eq!(UnitOfMeasurement::WattsPerSquareMeter.to_string(), "W/m²");
        assert_eq!(DeviceClass::WindDirection.to_string(), "wind_direction");
        assert_eq!(StateClass::TotalIncreasing.as_str(), "total_increasing");
    }

    #[test]
    fn properties_serialize_without_empty_fields() {
        let json = serde_json::to_value(classify("winddir_01mnavg")).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"device_class": "wind_direction", "unit": "°"})
        );

        let json = serde_json::to_value(SensorProperties::EMPTY).expect("serialize");
        assert_eq!(json, serde_json::json!({}));
    }
}
