use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

/// A remote desktop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub name: String,
    pub kind: String,
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct RawHost {
    #[serde(rename = "Name", alias = "name")]
    pub name: Option<String>,
    #[serde(rename = "Type", alias = "type")]
    pub kind: Option<String>,
    #[serde(rename = "Address", alias = "address")]
    pub address: Option<String>,
}

/// Validate the `host` list; order is preserved because it drives display order.
pub fn parse_host_section(
    raw: Option<Vec<RawHost>>,
    path: &Path,
) -> Result<Vec<Host>, ConfigError> {
    let raw_hosts = raw.ok_or_else(|| ConfigError::missing(path, "host"))?;
    if raw_hosts.is_empty() {
        return Err(ConfigError::invalid(
            path,
            "host",
            "at least one host is required",
        ));
    }

    raw_hosts
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            Ok(Host {
                name: required_field(raw.name, path, index, "Name")?,
                kind: required_field(raw.kind, path, index, "Type")?,
                address: required_field(raw.address, path, index, "Address")?,
            })
        })
        .collect()
}

fn required_field(
    value: Option<String>,
    path: &Path,
    index: usize,
    field: &str,
) -> Result<String, ConfigError> {
    let field_path = format!("host[{index}].{field}");
    let value = value.ok_or_else(|| ConfigError::missing(path, field_path.clone()))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::invalid(path, field_path, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
