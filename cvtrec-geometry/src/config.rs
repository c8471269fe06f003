//! Geometry configuration.
//!
//! The options only change numeric constants (solenoid scale, azimuthal
//! rotation convention); the module layout and mesh topology never depend
//! on them.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Magnetic field configuration.
///
/// Nominal is torus -1 / solenoid +1, reverse is torus +1 / solenoid +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldConfiguration {
    /// Nominal polarity.
    #[default]
    Nominal,
    /// Reversed torus polarity.
    Reverse,
}

impl FieldConfiguration {
    /// Parses a configuration name, case-insensitively.
    ///
    /// Unrecognized names fall back to [`FieldConfiguration::Nominal`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("reverse") {
            Self::Reverse
        } else {
            if !name.eq_ignore_ascii_case("nominal") {
                log::debug!("unknown field configuration '{name}', using nominal");
            }
            Self::Nominal
        }
    }

    /// Configuration name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::Reverse => "reverse",
        }
    }

    /// Solenoid scale for this configuration. The solenoid polarity is the
    /// same in both settings.
    #[must_use]
    pub fn solenoid_scale(self) -> f64 {
        match self {
            Self::Nominal | Self::Reverse => 1.0,
        }
    }
}

impl From<String> for FieldConfiguration {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<FieldConfiguration> for String {
    fn from(field: FieldConfiguration) -> Self {
        field.as_str().to_string()
    }
}

impl fmt::Display for FieldConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options recognized when building the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Magnetic field configuration.
    #[serde(rename = "field_configuration")]
    pub field: FieldConfiguration,
    /// Use the simulation azimuthal convention instead of the as-built one.
    pub simulation: bool,
    /// Cosmic-ray data, taken with the solenoid off.
    pub cosmics: bool,
}

#[derive(Deserialize)]
struct JsonConfig {
    #[serde(default)]
    geometry: GeometryConfig,
}

impl GeometryConfig {
    /// Creates the default configuration (nominal field, hardware geometry).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field configuration.
    #[must_use]
    pub fn with_field(mut self, field: FieldConfiguration) -> Self {
        self.field = field;
        self
    }

    /// Selects the simulation geometry convention.
    #[must_use]
    pub fn with_simulation(mut self, simulation: bool) -> Self {
        self.simulation = simulation;
        self
    }

    /// Marks the data as cosmics.
    #[must_use]
    pub fn with_cosmics(mut self, cosmics: bool) -> Self {
        self.cosmics = cosmics;
        self
    }

    /// Solenoid scale: zero for cosmics, otherwise set by the field configuration.
    #[must_use]
    pub fn solenoid_scale(&self) -> f64 {
        if self.cosmics {
            0.0
        } else {
            self.field.solenoid_scale()
        }
    }

    /// Loads configuration from a JSON string.
    ///
    /// Expected schema: `{"geometry": {"field_configuration": "...", "simulation": bool, "cosmics": bool}}`.
    /// Every key is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: JsonConfig = serde_json::from_str(json)?;
        Ok(config.geometry)
    }

    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the JSON is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: JsonConfig = serde_json::from_reader(reader)?;
        Ok(config.geometry)
    }
}
