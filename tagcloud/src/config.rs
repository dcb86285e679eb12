use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::color::{ColorOptions, Hue};
use crate::error::CloudError;
use crate::seed::RandomSeed;
use crate::shuffle::RandomNumberGenerator;

pub const CONFIG_PATH_ENV: &str = "TAGCLOUD_CONFIG";

/// Host-specific attributes forwarded untouched to the cloud container.
pub type HostAttributes = BTreeMap<String, String>;

fn default_shuffle() -> bool {
    true
}

fn default_class_name() -> String {
    "tag-cloud".to_string()
}

fn default_container() -> String {
    "div".to_string()
}

/// Whether `name` can stand as an element name: an ASCII letter followed by
/// letters, digits or dashes.
pub fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CloudConfig {
    pub min_size: u32,
    pub max_size: u32,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default)]
    pub color_options: ColorOptions,
    #[serde(default)]
    pub disable_random_color: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<RandomSeed>,
    #[serde(skip)]
    pub random_number_generator: Option<RandomNumberGenerator>,
    /// Element wrapping the tags, `div` unless the host asks for another.
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: HostAttributes,
}

impl CloudConfig {
    pub fn new(min_size: u32, max_size: u32) -> Self {
        Self {
            min_size,
            max_size,
            shuffle: default_shuffle(),
            color_options: ColorOptions::default(),
            disable_random_color: false,
            random_seed: None,
            random_number_generator: None,
            container: default_container(),
            class_name: default_class_name(),
            attributes: HostAttributes::new(),
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_seed(mut self, seed: impl Into<RandomSeed>) -> Self {
        self.random_seed = Some(seed.into());
        self
    }

    pub fn with_color_options(mut self, options: ColorOptions) -> Self {
        self.color_options = options;
        self
    }

    pub fn without_random_color(mut self) -> Self {
        self.disable_random_color = true;
        self
    }

    pub fn with_random_number_generator(mut self, generator: RandomNumberGenerator) -> Self {
        self.random_number_generator = Some(generator);
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// The configured seed, unless it is empty or zero.
    pub fn active_seed(&self) -> Option<&RandomSeed> {
        self.random_seed.as_ref().filter(|seed| seed.is_set())
    }

    pub fn validate(&self) -> Result<(), CloudError> {
        if self.min_size == 0 {
            return Err(CloudError::InvalidSize {
                field: "min_size",
                value: self.min_size,
            });
        }
        if self.min_size > self.max_size {
            return Err(CloudError::InvertedSizeRange {
                min_size: self.min_size,
                max_size: self.max_size,
            });
        }
        if let Some(Hue::Degrees(degrees)) = self.color_options.hue {
            if !degrees.is_finite() {
                return Err(CloudError::InvalidColorOption {
                    field: "hue",
                    value: degrees,
                });
            }
        }
        if let Some(alpha) = self.color_options.alpha {
            if !alpha.is_finite() {
                return Err(CloudError::InvalidColorOption {
                    field: "alpha",
                    value: alpha,
                });
            }
        }
        if !is_element_name(&self.container) {
            return Err(CloudError::InvalidContainer {
                name: self.container.clone(),
            });
        }
        Ok(())
    }

    /// Reads and validates a JSON config file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded cloud config");
        Ok(config)
    }

    /// Loads the config at [`config_path`], or `None` when no file exists there.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = config_path()?;
        match Self::load_from_path(&path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config directory unavailable")]
    MissingConfigDir,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] CloudError),
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(custom) = env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(custom));
    }
    let base = config_dir().ok_or(ConfigError::MissingConfigDir)?;
    Ok(base.join("tagcloud").join("config.json"))
}
