//! Configuration constants and profile loading for recordboard
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! server = http://localhost:5000
//! page_size = 10
//! resource_kind = ambulance
//! ```

use crate::dashboard::models::DEFAULT_PAGE_SIZE;
use anyhow::Result;
use ini::Ini;
use std::path::Path;

/// Default profile file path for recordboard
pub const DEFAULT_PROFILE_PATH: &str = "~/.recordboard/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "RECORDBOARD_PROFILE_PATH";

/// Environment variable holding the log filter, e.g. `debug`
pub const LOG_LEVEL_ENV_VAR: &str = "RECORDBOARD_LOG_LEVEL";

pub const DEFAULT_SERVER: &str = "http://localhost:5000";

pub const DEFAULT_RESOURCE_KIND: &str = "ambulance";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Connection and display settings for one dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardProfile {
    pub server: String,
    pub page_size: usize,
    pub resource_kind: String,
}

impl Default for DashboardProfile {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            resource_kind: DEFAULT_RESOURCE_KIND.to_string(),
        }
    }
}

/// Load a profile by name. A missing file or section yields the defaults;
/// keys absent from the section keep their default values.
pub fn load_profile(profile_name: &str, profile_path: &str) -> Result<DashboardProfile> {
    let expanded = shellexpand::tilde(profile_path).to_string();
    tracing::debug!("Loading profile '{}' from '{}'", profile_name, expanded);

    if !Path::new(&expanded).exists() {
        tracing::debug!("Profile file '{}' not found, using defaults", expanded);
        return Ok(DashboardProfile::default());
    }

    let ini = Ini::load_from_file(&expanded)
        .map_err(|e| anyhow::anyhow!("Failed to read profile file '{expanded}': {e}"))?;

    let Some(section) = ini.section(Some(profile_name)) else {
        tracing::debug!("Profile '{}' not found, using defaults", profile_name);
        return Ok(DashboardProfile::default());
    };

    let mut profile = DashboardProfile::default();
    if let Some(server) = section.get("server") {
        profile.server = server.trim().to_string();
    }
    if let Some(page_size) = section.get("page_size") {
        profile.page_size = page_size.trim().parse().map_err(|_| {
            anyhow::anyhow!("Invalid page_size '{page_size}' in profile '{profile_name}'")
        })?;
        if profile.page_size == 0 {
            anyhow::bail!("page_size must be at least 1 in profile '{profile_name}'");
        }
    }
    if let Some(resource_kind) = section.get("resource_kind") {
        profile.resource_kind = resource_kind.trim().to_string();
    }

    tracing::debug!("Profile loaded: {:?}", profile);
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn profile_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.recordboard/profile");
    }

    #[test]
    fn test_get_profile_path_env_override() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        // Restore original state
        if let Some(val) = original {
            std::env::set_var(PROFILE_PATH_ENV_VAR, val);
        }
    }

    #[test]
    fn missing_file_should_yield_defaults() {
        let profile = load_profile("default", "/nonexistent/recordboard/profile").unwrap();
        assert_eq!(profile, DashboardProfile::default());
        assert_eq!(profile.page_size, 10);
        assert_eq!(profile.resource_kind, "ambulance");
    }

    #[test]
    fn named_section_should_override_defaults() {
        let file = profile_file(
            "[default]\nserver = http://localhost:5000\n\n[staging]\nserver = https://staging.example.com\npage_size = 25\nresource_kind = doctor\n",
        );
        let path = file.path().to_str().unwrap();

        let profile = load_profile("staging", path).unwrap();

        assert_eq!(profile.server, "https://staging.example.com");
        assert_eq!(profile.page_size, 25);
        assert_eq!(profile.resource_kind, "doctor");
    }

    #[test]
    fn missing_keys_should_keep_defaults() {
        let file = profile_file("[default]\nserver = http://records.internal:8080\n");
        let profile = load_profile("default", file.path().to_str().unwrap()).unwrap();

        assert_eq!(profile.server, "http://records.internal:8080");
        assert_eq!(profile.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn unknown_section_should_yield_defaults() {
        let file = profile_file("[default]\npage_size = 5\n");
        let profile = load_profile("prod", file.path().to_str().unwrap()).unwrap();
        assert_eq!(profile, DashboardProfile::default());
    }

    #[test]
    fn invalid_page_size_should_fail() {
        let file = profile_file("[default]\npage_size = ten\n");
        let error = load_profile("default", file.path().to_str().unwrap()).unwrap_err();
        assert!(error.to_string().contains("Invalid page_size 'ten'"));

        let file = profile_file("[default]\npage_size = 0\n");
        assert!(load_profile("default", file.path().to_str().unwrap()).is_err());
    }
}
