use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

/// Заполнение пустых коллекций демо-данными при старте
#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    #[serde(default = "default_on_empty")]
    pub on_empty: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            on_empty: default_on_empty(),
        }
    }
}

fn default_on_empty() -> bool {
    true
}

/// Конфигурация по умолчанию, встроенная в бинарник
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
port = 3000

[seed]
on_empty = true
"#;

/// Загрузить config.toml
///
/// Порядок поиска:
/// 1. Рядом с исполняемым файлом
/// 2. Встроенная конфигурация по умолчанию
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Путь к файлу БД; относительный путь считается от каталога исполняемого файла
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.server.port, 3000);
        assert!(config.seed.on_empty);
    }

    #[test]
    fn test_sections_are_optional() {
        let config = parse_config("[database]\npath = \"/tmp/app.db\"\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.seed.on_empty);
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/tmp/app.db")
        );
    }

    #[test]
    fn test_seed_can_be_disabled() {
        let config =
            parse_config("[database]\npath = \"a.db\"\n[server]\nport = 8080\n[seed]\non_empty = false\n")
                .unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(!config.seed.on_empty);
    }
}
