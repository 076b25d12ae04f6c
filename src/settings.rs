//! Settings module - handles application settings storage
//! - Windows: uses registry
//! - macOS/Linux: uses config file (JSON)

#[cfg(all(windows, feature = "winreg"))]
use winreg::enums::*;
#[cfg(all(windows, feature = "winreg"))]
use winreg::RegKey;

#[cfg(all(not(windows), feature = "dirs"))]
use std::fs;
#[cfg(all(not(windows), feature = "dirs"))]
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use dopesheet::i18n::Language;

// Re-export SelectionStyle from library
pub use dopesheet::SelectionStyle;

#[cfg(all(windows, feature = "winreg"))]
const REGISTRY_KEY: &str = r"Software\Dopesheet";

#[cfg(all(not(windows), feature = "dirs"))]
const CONFIG_FILE_NAME: &str = "settings.json";
#[cfg(all(not(windows), feature = "dirs"))]
const APP_NAME: &str = "dopesheet";

/// Theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeMode::Light,
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::System,
        }
    }
}

// Persisted through the string codec so unknown values fall back instead
// of failing the whole settings load.
impl From<String> for ThemeMode {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<ThemeMode> for String {
    fn from(mode: ThemeMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Application settings (combines all settings)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme_mode: ThemeMode,
    pub selection_style: SelectionStyle,
    pub language: Language,
}

impl AppSettings {
    // ========== Windows: Registry-based storage ==========

    /// Load settings from Windows registry
    #[cfg(all(windows, feature = "winreg"))]
    pub fn load_from_registry() -> Self {
        let mut settings = Self::default();

        if let Ok(hkcu) = RegKey::predef(HKEY_CURRENT_USER).open_subkey(REGISTRY_KEY) {
            if let Ok(theme) = hkcu.get_value::<String, _>("ThemeMode") {
                settings.theme_mode = ThemeMode::from_str(&theme);
            }
            if let Ok(style) = hkcu.get_value::<String, _>("SelectionStyle") {
                settings.selection_style = SelectionStyle::from_str(&style);
            }
            if let Ok(language) = hkcu.get_value::<String, _>("Language") {
                settings.language = Language::from_str(&language);
            }
        }

        settings
    }

    /// Save settings to Windows registry
    #[cfg(all(windows, feature = "winreg"))]
    pub fn save_to_registry(&self) -> Result<(), String> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (key, _) = hkcu.create_subkey(REGISTRY_KEY)
            .map_err(|e| format!("Failed to create registry key: {}", e))?;

        key.set_value("ThemeMode", &self.theme_mode.as_str())
            .map_err(|e| format!("Failed to save ThemeMode: {}", e))?;

        key.set_value("SelectionStyle", &self.selection_style.as_str())
            .map_err(|e| format!("Failed to save SelectionStyle: {}", e))?;

        key.set_value("Language", &self.language.as_str())
            .map_err(|e| format!("Failed to save Language: {}", e))?;

        Ok(())
    }

    // ========== macOS/Linux: File-based storage ==========

    /// Get config file path for non-Windows platforms
    #[cfg(all(not(windows), feature = "dirs"))]
    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings from config file (macOS/Linux)
    #[cfg(all(not(windows), feature = "dirs"))]
    pub fn load_from_registry() -> Self {
        if let Some(config_path) = Self::config_file_path() {
            if let Ok(content) = fs::read_to_string(&config_path) {
                return serde_json::from_str(&content).unwrap_or_default();
            }
        }

        Self::default()
    }

    /// Save settings to config file (macOS/Linux)
    #[cfg(all(not(windows), feature = "dirs"))]
    pub fn save_to_registry(&self) -> Result<(), String> {
        let config_path = Self::config_file_path()
            .ok_or_else(|| "Failed to get config directory".to_string())?;

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        fs::write(&config_path, content)
            .map_err(|e| format!("Failed to write config file: {}", e))?;

        Ok(())
    }

    // ========== Fallback: No persistent storage ==========

    /// Load settings (fallback when no storage feature is enabled)
    #[cfg(not(any(all(windows, feature = "winreg"), all(not(windows), feature = "dirs"))))]
    pub fn load_from_registry() -> Self {
        Self::default()
    }

    /// Save settings (fallback when no storage feature is enabled)
    #[cfg(not(any(all(windows, feature = "winreg"), all(not(windows), feature = "dirs"))))]
    pub fn save_to_registry(&self) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_codec() {
        for mode in [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_str(mode.as_str()), mode);
        }
        assert_eq!(ThemeMode::from_str("DARK"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_str("solarized"), ThemeMode::System);
    }

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme_mode, ThemeMode::System);
        assert_eq!(settings.selection_style, SelectionStyle::Classic);
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn test_settings_json_round_trip() {
        let settings = AppSettings {
            theme_mode: ThemeMode::Dark,
            selection_style: SelectionStyle::Aqua,
            language: Language::Ja,
        };

        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("\"theme_mode\": \"dark\""));
        assert!(json.contains("\"selection_style\": \"aqua\""));
        assert!(json.contains("\"language\": \"ja\""));

        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_unknown_setting_values_fall_back() {
        let loaded: AppSettings =
            serde_json::from_str(r#"{"theme_mode": "solarized", "language": "ja"}"#).unwrap();
        assert_eq!(loaded.theme_mode, ThemeMode::System);
        assert_eq!(loaded.selection_style, SelectionStyle::Classic);
        assert_eq!(loaded.language, Language::Ja);
    }
}
