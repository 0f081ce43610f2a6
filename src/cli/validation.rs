//! Value parsers for CLI arguments that clap cannot check on its own.

use std::net::IpAddr;
use std::path::PathBuf;

pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            value
        )),
    }
}

/// The file must exist and be a regular file; readability is checked when
/// the configuration loads.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", value));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", value));
    }
    Ok(path)
}

pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value.parse().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            value
        )
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        1..=100 => Ok(steps),
        _ => Err("Rollback steps cannot exceed 100".to_string()),
    }
}

/// Accepts IP literals and RFC 1123 hostnames.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    let host = value.trim();
    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    // dotted digits that failed to parse as an IP
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address format: '{}'", value));
    }
    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if host.split('.').all(valid_label) {
        Ok(host.to_string())
    } else {
        Err(format!("Invalid host name: '{}'", value))
    }
}
