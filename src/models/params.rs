//! Install parameter model.
//!
//! Parameters come from a YAML file with a top-level `parameters` mapping:
//!
//! ```yaml
//! parameters:
//!   db_host: localhost
//!   db_name: magento
//!   url: http://magento.local/
//! ```

use crate::{Error, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Arguments always passed to the installer unless the parameter file overrides them.
const DEFAULT_ARGUMENTS: &[(&str, &str)] = &[
    ("license_agreement_accepted", "1"),
    ("skip_url_validation", "1"),
    ("use_rewrites", "1"),
    ("use_secure", "0"),
    ("use_secure_admin", "0"),
];

/// Ordered install parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallParameters {
    entries: Vec<(String, String)>,
}

impl InstallParameters {
    /// Build parameters from key/value pairs, keeping their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse parameters from YAML content.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content)?;

        let parameters = document
            .get("parameters")
            .and_then(Value::as_mapping)
            .ok_or_else(|| Error::InvalidParameters("missing 'parameters' mapping".to_string()))?;

        Self::from_mapping(parameters)
    }

    fn from_mapping(mapping: &Mapping) -> Result<Self> {
        let mut entries = Vec::with_capacity(mapping.len());

        for (key, value) in mapping {
            let key = scalar_to_string(key)
                .ok_or_else(|| Error::InvalidParameters(format!("invalid key: {:?}", key)))?;
            let value = scalar_to_string(value).ok_or_else(|| {
                Error::InvalidParameters(format!("value of '{}' is not a scalar", key))
            })?;
            entries.push((key, value));
        }

        Ok(Self { entries })
    }

    /// Load parameters from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::PathNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let params = Self::from_yaml_str(&content)?;
        tracing::debug!("Loaded {} parameters from {}", params.len(), path.display());

        Ok(params)
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over parameters in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Name of the database to install into.
    pub fn db_name(&self) -> Result<&str> {
        self.get("db_name")
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::InvalidParameters("'db_name' is required".to_string()))
    }

    /// Whether sample data should be installed.
    ///
    /// Any value is true except an empty string, `0`, or one of the YAML 1.1
    /// false words (`false`, `no`, `off`, any case).
    pub fn install_sample(&self) -> bool {
        match self.get("install_sample") {
            Some(value) => !matches!(
                value.to_lowercase().as_str(),
                "" | "0" | "false" | "no" | "off"
            ),
            None => false,
        }
    }

    /// Arguments for the installer, in the order they are passed.
    ///
    /// Defaults come first, then the file parameters, then `secure_base_url`
    /// copied from `url`. A file parameter that shadows a default replaces its
    /// value in place.
    pub fn installer_arguments(&self) -> Result<Vec<(String, String)>> {
        let url = self
            .get("url")
            .ok_or_else(|| Error::InvalidParameters("'url' is required".to_string()))?
            .to_string();

        let mut arguments: Vec<(String, String)> = DEFAULT_ARGUMENTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let overrides = self
            .entries
            .iter()
            .cloned()
            .chain(std::iter::once(("secure_base_url".to_string(), url)));

        for (key, value) in overrides {
            match arguments.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => arguments.push((key, value)),
            }
        }

        Ok(arguments)
    }
}

/// Render a YAML scalar as a string.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}
