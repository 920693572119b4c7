//! Config flow and options flow
//!
//! Two-step form handling: a flow first returns a form pre-filled with
//! defaults, then validates the submitted input and either returns the form
//! again with per-field error codes or creates the entry.

use std::collections::BTreeMap;

use domain::StationSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Title of every entry created by the config flow
pub const ENTRY_TITLE: &str = "WSWR Weather Station API";

/// Step id of the initial setup form
pub const STEP_USER: &str = "user";

/// Step id of the options form
pub const STEP_INIT: &str = "init";

/// Values submitted through a form; absent fields keep the form's defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsInput {
    /// Submitted endpoint URL
    #[serde(default)]
    pub api_url: Option<String>,
    /// Submitted polling interval in minutes
    #[serde(default)]
    pub interval_minutes: Option<u32>,
}

impl SettingsInput {
    /// Merge the submission over `defaults`
    #[must_use]
    pub fn resolve(&self, defaults: &StationSettings) -> StationSettings {
        StationSettings {
            api_url: self
                .api_url
                .clone()
                .unwrap_or_else(|| defaults.api_url.clone()),
            interval_minutes: self.interval_minutes.unwrap_or(defaults.interval_minutes),
        }
    }
}

impl From<StationSettings> for SettingsInput {
    fn from(settings: StationSettings) -> Self {
        Self {
            api_url: Some(settings.api_url),
            interval_minutes: Some(settings.interval_minutes),
        }
    }
}

/// A form to show to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowForm {
    /// Step the form belongs to
    pub step_id: &'static str,
    /// Pre-filled values
    pub defaults: StationSettings,
    /// Error code per field, empty on first display
    pub errors: BTreeMap<String, String>,
}

/// Outcome of one flow step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowResult {
    /// Show (or re-show) a form
    Form(FlowForm),
    /// Input accepted
    CreateEntry {
        /// Entry title
        title: String,
        /// Accepted settings
        data: StationSettings,
    },
}

impl FlowResult {
    /// Accepted settings, if the step created an entry
    #[must_use]
    pub const fn data(&self) -> Option<&StationSettings> {
        match self {
            Self::CreateEntry { data, .. } => Some(data),
            Self::Form(_) => None,
        }
    }

    /// Per-field errors, if the step returned a form
    #[must_use]
    pub const fn errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Form(form) => Some(&form.errors),
            Self::CreateEntry { .. } => None,
        }
    }

    /// Turn a created entry into a [`ConfigEntry`] with the given id
    #[must_use]
    pub fn into_entry(self, entry_id: impl Into<String>) -> Option<ConfigEntry> {
        match self {
            Self::CreateEntry { title, data } => Some(ConfigEntry {
                entry_id: entry_id.into(),
                title,
                data,
                options: None,
            }),
            Self::Form(_) => None,
        }
    }
}

/// A configured station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Identifier used as unique-id prefix of every sensor
    pub entry_id: String,
    /// Display title
    pub title: String,
    /// Settings from the config flow
    pub data: StationSettings,
    /// Revised settings from the options flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<StationSettings>,
}

impl ConfigEntry {
    /// Create an entry without options
    #[must_use]
    pub fn new(entry_id: impl Into<String>, data: StationSettings) -> Self {
        Self {
            entry_id: entry_id.into(),
            title: ENTRY_TITLE.to_string(),
            data,
            options: None,
        }
    }

    /// Attach revised settings
    #[must_use]
    pub fn with_options(mut self, options: StationSettings) -> Self {
        self.options = Some(options);
        self
    }

    /// Options when present, otherwise the original data
    #[must_use]
    pub fn effective_settings(&self) -> &StationSettings {
        self.options.as_ref().unwrap_or(&self.data)
    }
}

fn validate_or_form(
    step_id: &'static str,
    submitted: StationSettings,
    title: &str,
) -> FlowResult {
    let errors = submitted.field_errors();
    if errors.is_empty() {
        FlowResult::CreateEntry {
            title: title.to_string(),
            data: submitted,
        }
    } else {
        debug!(step = step_id, ?errors, "Rejected flow input");
        FlowResult::Form(FlowForm {
            step_id,
            defaults: submitted,
            errors,
        })
    }
}

/// Initial setup of a station entry
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigFlow;

impl ConfigFlow {
    /// Form with the default URL and interval
    #[must_use]
    pub fn user_form() -> FlowResult {
        FlowResult::Form(FlowForm {
            step_id: STEP_USER,
            defaults: StationSettings::default(),
            errors: BTreeMap::new(),
        })
    }

    /// Validate the setup form
    #[must_use]
    pub fn submit_user(input: &SettingsInput) -> FlowResult {
        let submitted = input.resolve(&StationSettings::default());
        let result = validate_or_form(STEP_USER, submitted, ENTRY_TITLE);
        if let Some(data) = result.data() {
            info!(api_url = %data.api_url, interval_minutes = data.interval_minutes, "Station entry created");
        }
        result
    }
}

/// Revision of an existing entry's settings
#[derive(Debug, Clone)]
pub struct OptionsFlow {
    current: StationSettings,
}

impl OptionsFlow {
    /// Start the options flow for `entry`
    #[must_use]
    pub fn new(entry: &ConfigEntry) -> Self {
        Self {
            current: entry.effective_settings().clone(),
        }
    }

    /// Form pre-filled with the entry's effective settings
    #[must_use]
    pub fn init(&self) -> FlowResult {
        FlowResult::Form(FlowForm {
            step_id: STEP_INIT,
            defaults: self.current.clone(),
            errors: BTreeMap::new(),
        })
    }

    /// Validate the options form; accepted data become the entry's options
    #[must_use]
    pub fn submit(&self, input: &SettingsInput) -> FlowResult {
        let submitted = input.resolve(&self.current);
        validate_or_form(STEP_INIT, submitted, "")
    }
}
