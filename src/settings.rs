use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub upload: UploadSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the MediScribe backend, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds. 0 disables the client-side timeout and
    /// leaves failures to the transport layer, matching the web client.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSettings {
    /// Upper bound on uploaded file size in bytes. 0 disables the cap.
    pub max_file_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub data_dir: String,
}

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_MAX_FILE_BYTES: u64 = 25 * 1024 * 1024;

fn default_data_dir_path() -> PathBuf {
    if cfg!(target_os = "windows") {
        if let Some(base) = std::env::var_os("LOCALAPPDATA")
            .or_else(|| std::env::var_os("APPDATA"))
            .or_else(|| std::env::var_os("USERPROFILE"))
        {
            return PathBuf::from(base).join("mediscribe");
        }
    }

    if cfg!(target_os = "macos") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mediscribe");
        }
    }

    if cfg!(target_os = "linux") {
        if let Some(dir) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(dir).join("mediscribe");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("mediscribe");
        }
    }

    std::env::temp_dir().join("mediscribe")
}

fn default_data_dir() -> String {
    default_data_dir_path().to_string_lossy().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 0,
            },
            upload: UploadSettings {
                max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            },
            storage: StorageSettings {
                data_dir: default_data_dir(),
            },
        }
    }
}

impl ApiSettings {
    /// Base URL with any trailing slash removed, so endpoint paths can be
    /// appended without doubling separators.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_have_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8000");
        assert_eq!(settings.api.timeout_secs, 0);
        assert_eq!(settings.upload.max_file_bytes, 25 * 1024 * 1024);
        assert!(!settings.storage.data_dir.is_empty());
    }

    #[test]
    fn api_base_strips_trailing_slash() {
        let mut settings = Settings::default();
        settings.api.base_url = "http://example.test:8000/".to_string();
        assert_eq!(settings.api.base(), "http://example.test:8000");
    }
}
