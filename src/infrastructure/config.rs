use crate::domain::{
    config::ShadeComConfig,
    error::{ShadeComError, ShadeComResult},
};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration manager
///
/// Configuration is layered: built-in defaults, then the global file under
/// the user config directory, then an optional project-local
/// `.shadecom/config.toml` found by walking up from the current directory.
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> ShadeComResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Load configuration from files
    pub fn load_config(&self) -> ShadeComResult<ShadeComConfig> {
        let mut config = ShadeComConfig::default();

        if self.global_config_path.exists() {
            config = self.load_config_from_path(&self.global_config_path)?;
        }

        // Project configuration wins over the global file
        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                config = self.load_config_from_path(project_path)?;
            }
        }

        Ok(config)
    }

    /// Get global configuration path
    fn get_global_config_path() -> ShadeComResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| ShadeComError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("shadecom").join("config.toml"))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".shadecom").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> ShadeComResult<ShadeComConfig> {
        let content = fs::read_to_string(path).map_err(|e| ShadeComError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| ShadeComError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &ShadeComConfig) -> ShadeComResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| ShadeComError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| ShadeComError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Create default project configuration
    pub fn init_project_config(&self, path: &Path, host: Option<&str>) -> ShadeComResult<()> {
        let config_dir = path.join(".shadecom");
        let config_file = config_dir.join("config.toml");

        if config_file.exists() {
            return Err(ShadeComError::Config {
                message: "Project configuration already exists".to_string(),
            });
        }

        fs::create_dir_all(&config_dir).map_err(|e| ShadeComError::Config {
            message: format!("Failed to create .shadecom directory: {}", e),
        })?;

        let mut default_config = ShadeComConfig::default();
        if let Some(host) = host {
            default_config.device.host = host.to_string();
        }

        self.save_config_to_path(&config_file, &default_config)?;

        Ok(())
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_manager_creation() {
        let _manager = ConfigManager::new().unwrap();
    }

    #[test]
    fn test_init_project_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();

        manager
            .init_project_config(temp_dir.path(), Some("shade.local"))
            .unwrap();

        let config_file = temp_dir.path().join(".shadecom").join("config.toml");
        assert!(config_file.exists());

        let content = fs::read_to_string(&config_file).unwrap();
        let config: ShadeComConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.device.host, "shade.local");
        assert_eq!(config.global.reconnect_delay_ms, 2000);
    }

    #[test]
    fn test_init_project_config_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();

        manager.init_project_config(temp_dir.path(), None).unwrap();
        assert!(manager.init_project_config(temp_dir.path(), None).is_err());
    }

    #[test]
    fn test_load_config_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        fs::write(&path, "[device]\nhost = \"10.0.0.5\"\nport = 8080\n").unwrap();

        let config = manager.load_config_from_path(&path).unwrap();
        assert_eq!(config.device.host, "10.0.0.5");
        assert_eq!(config.device.port, 8080);
        assert_eq!(config.device.path, "/ws");
    }
}
