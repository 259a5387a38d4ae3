use crate::errors::Error;
use core::fmt::Display;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::LOG_TARGET;

/// A setting is either an unsigned integer or a string. These are the only types that
/// settings.json declares.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Setting {
    UInt(usize),
    String(String),
}

impl Setting {
    /// Returns the setting as an unsigned integer. Strings that do not hold a number give 0.
    #[must_use]
    pub fn to_uint(&self) -> usize {
        match self {
            Self::UInt(value) => *value,
            Self::String(value) => {
                warn!(target: LOG_TARGET, "setting is not an unsigned integer");
                value.trim().parse().unwrap_or_default()
            }
        }
    }

    /// Returns the raw value of the setting, without its type prefix
    #[allow(clippy::inherent_to_string_shadow_display)]
    #[must_use]
    pub fn to_string(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            Self::UInt(value) => {
                warn!(target: LOG_TARGET, "setting is not a string");
                value.to_string()
            }
        }
    }

    fn type_prefix(&self) -> &'static str {
        match self {
            Self::UInt(_) => "u",
            Self::String(_) => "s",
        }
    }
}

impl Serialize for Setting {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Setting {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(&value)
            .map_err(|err| serde::de::Error::custom(format!("cannot deserialize: {err}")))
    }
}

/// Displays the setting in its encoded form, which can be parsed back with `from_str`
impl Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UInt(value) => write!(f, "{}:{value}", self.type_prefix()),
            Self::String(value) => write!(f, "{}:{value}", self.type_prefix()),
        }
    }
}

impl FromStr for Setting {
    type Err = Error;

    // first element is the type:
    //   u:234
    //   s:hello world
    fn from_str(key: &str) -> Result<Self, Error> {
        let Some((key_type, key_value)) = key.split_once(':') else {
            return Err(Error::Config(format!("missing type prefix: {key}")));
        };

        let setting = match key_type {
            "u" => Self::UInt(
                key_value
                    .parse::<usize>()
                    .map_err(|err| Error::Config(format!("error parsing {key_value}: {err}")))?,
            ),
            "s" => Self::String(key_value.to_string()),
            _ => return Err(Error::Config(format!("unknown setting type: {key_type}"))),
        };

        Ok(setting)
    }
}

/// `SettingInfo` returns information about a given setting
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SettingInfo {
    /// Name of the key in dot notation (ie: canvas.width)
    pub key: String,
    /// Description of the setting
    pub description: String,
    /// Default setting if none has been specified
    pub default: Setting,
}
