use log::Level;
use web_sys::window;

/// Prefix of every localStorage key the dashboard reads or writes.
pub const STORAGE_PREFIX: &str = "sales_analytics_";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "api.example.com")
    pub api_host: String,

    /// Backend API port (e.g., 5000)
    pub api_port: u16,

    /// API path prefix (e.g., "/api")
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Reporting year used until the user picks one
    pub default_year: i32,

    /// Earliest year offered in the year selector
    pub first_year: i32,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 5000,
            api_path: "/api".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
            default_year: compute::DEFAULT_YEAR,
            first_year: 2022,
            toast_duration_ms: 5000,
        }
    }
}

/// Full localStorage key for a setting name.
pub fn storage_key(name: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, name)
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            if let Ok(Some(storage)) = window.local_storage() {
                let read = |name: &str| storage.get_item(&storage_key(name)).ok().flatten();

                if let Some(api_host) = read("api_host") {
                    settings.api_host = api_host;
                }

                if let Some(port_val) = read("api_port").and_then(|p| p.parse::<u16>().ok()) {
                    settings.api_port = port_val;
                }

                if let Some(api_path) = read("api_path") {
                    settings.api_path = api_path;
                }

                if let Some(use_https) = read("api_use_https") {
                    settings.api_use_https = use_https.to_lowercase() == "true";
                }

                if let Some(log_level) = read("log_level") {
                    settings.log_level = match log_level.to_lowercase().as_str() {
                        "error" => Level::Error,
                        "warn" => Level::Warn,
                        "info" => Level::Info,
                        "debug" => Level::Debug,
                        "trace" => Level::Trace,
                        _ => settings.log_level,
                    };
                }

                if let Some(duration) = read("toast_duration_ms").and_then(|d| d.parse::<u32>().ok()) {
                    settings.toast_duration_ms = duration;
                }
            }
        }

        settings
    }

    /// Get the base API URL (protocol + host + port)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }

    /// URL of a path served outside the API prefix
    pub fn server_url(&self, path: &str) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, path)
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }

    /// Years offered in the navbar, newest first.
    pub fn selectable_years(&self, current_year: i32) -> Vec<i32> {
        let last = current_year.max(self.default_year);
        (self.first_year..=last).rev().collect()
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_base_url() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_base_url(), "http://localhost:5000/api");
        assert_eq!(
            settings.api_url("/pipeline/opportunities"),
            "http://localhost:5000/api/pipeline/opportunities"
        );
        assert_eq!(settings.server_url("/ai-insight"), "http://localhost:5000/ai-insight");
    }

    #[test]
    fn test_selectable_years() {
        let settings = AppSettings::default();
        assert_eq!(settings.selectable_years(2025), vec![2025, 2024, 2023, 2022]);
        assert_eq!(settings.selectable_years(2020), vec![2024, 2023, 2022]);
        assert_eq!(storage_key("token"), "sales_analytics_token");
    }
}
