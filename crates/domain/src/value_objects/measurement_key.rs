//! Measurement key value object
//!
//! Station keys follow a fixed-width layout: a 7-character quantity code,
//! an underscore, a 4-character window and a 3-character aggregation code.
//! Short quantity codes are padded with underscores.
//!
//! ```text
//! airtemp_01mnavg    quantity "airtemp", window "01mn", aggregation "avg"
//! windcw__10mnmax    quantity "windcw",  window "10mn", aggregation "max"
//! ```
//!
//! Keys are never rejected. Accessors return `None` for keys that do not
//! follow the layout (`id`, `record_time`, ...).
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::MeasurementKey;
//!
//! let key = MeasurementKey::new("rainfal_24hracc");
//! assert_eq!(key.quantity(), Some("rainfal"));
//! assert_eq!(key.window(), Some("24hr"));
//! assert_eq!(key.aggregation(), Some("acc"));
//!
//! assert_eq!(MeasurementKey::new("record_time").quantity(), None);
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

const KEY_LEN: usize = 15;
const QUANTITY_LEN: usize = 7;
const WINDOW_END: usize = 12;

/// Identifier of one weather quantity and its aggregation window
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementKey(String);

impl MeasurementKey {
    /// Wrap a raw key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the raw key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the key follows the `<quantity>_<window><aggregation>` layout
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let bytes = self.0.as_bytes();
        bytes.len() == KEY_LEN && self.0.is_ascii() && bytes[QUANTITY_LEN] == b'_'
    }

    /// Quantity code without padding (e.g. `airtemp`, `windcw`)
    #[must_use]
    pub fn quantity(&self) -> Option<&str> {
        self.is_well_formed()
            .then(|| self.0[..QUANTITY_LEN].trim_end_matches('_'))
    }

    /// Aggregation window (e.g. `01mn`, `24hr`, `07dy`)
    #[must_use]
    pub fn window(&self) -> Option<&str> {
        self.is_well_formed()
            .then(|| &self.0[QUANTITY_LEN + 1..WINDOW_END])
    }

    /// Aggregation code (e.g. `avg`, `max`, `acc`, `tim`)
    #[must_use]
    pub fn aggregation(&self) -> Option<&str> {
        self.is_well_formed().then(|| &self.0[WINDOW_END..])
    }
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MeasurementKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MeasurementKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MeasurementKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for MeasurementKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
