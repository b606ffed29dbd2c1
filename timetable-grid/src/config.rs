use std::env;
use std::path::PathBuf;

use log::warn;

use crate::grid::config::{DEFAULT_DAYS, DEFAULT_FIRST_SLOT, DEFAULT_SLOT_HEIGHT_PX, DEFAULT_SLOT_MINUTES, DEFAULT_WINDOW_END};
use crate::grid::{GridConfig, GridConfigError};
use crate::session::DayOfWeek;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Runtime settings for the web server
///
/// - `PORT`: listen port (default 8080, a CLI argument takes precedence)
/// - `ADMIN_PASSWORD`: required in `X-Admin-Password` for mutations
/// - `SESSIONS_PATH`: JSON file loaded at startup
/// - `GRID_DAYS`: comma-separated visible days, e.g. `monday,tuesday`
/// - `GRID_START`, `GRID_END`, `GRID_SLOT_MINUTES`, `GRID_SLOT_HEIGHT`: grid geometry
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub admin_password: String,
    pub sessions_path: Option<PathBuf>,
    pub grid: GridConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, GridConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, GridConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let admin_password = lookup("ADMIN_PASSWORD").unwrap_or_else(|| {
            warn!("ADMIN_PASSWORD is not set, using the default password");
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

        let grid = grid_from_lookup(&lookup)?;

        Ok(Self {
            port,
            admin_password,
            sessions_path: lookup("SESSIONS_PATH").map(PathBuf::from),
            grid,
        })
    }
}

/// Grid geometry from the `GRID_*` variables only, for the CLI
pub fn grid_from_env() -> Result<GridConfig, GridConfigError> {
    grid_from_lookup(|key| env::var(key).ok())
}

fn grid_from_lookup<F>(lookup: F) -> Result<GridConfig, GridConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let number = |key: &str, default: u32| {
        lookup(key).and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(default)
    };
    let days = match lookup("GRID_DAYS") {
        Some(list) => parse_days(&list),
        None => DEFAULT_DAYS.to_vec(),
    };
    GridConfig::new(
        days,
        &lookup("GRID_START").unwrap_or_else(|| DEFAULT_FIRST_SLOT.to_string()),
        &lookup("GRID_END").unwrap_or_else(|| DEFAULT_WINDOW_END.to_string()),
        number("GRID_SLOT_MINUTES", DEFAULT_SLOT_MINUTES),
        number("GRID_SLOT_HEIGHT", DEFAULT_SLOT_HEIGHT_PX),
    )
}

/// Unknown names are skipped with a warning
fn parse_days(list: &str) -> Vec<DayOfWeek> {
    list.split(',')
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let day = DayOfWeek::ALL.into_iter().find(|d| d.as_str() == name);
            if day.is_none() {
                warn!("Ignoring unknown day '{}' in GRID_DAYS", name);
            }
            day
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.admin_password, "admin123");
        assert_eq!(config.sessions_path, None);
        assert_eq!(config.grid, GridConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("ADMIN_PASSWORD", "s3cret"),
            ("SESSIONS_PATH", "data/week.json"),
            ("GRID_START", "07:30"),
            ("GRID_END", "20:00"),
            ("GRID_SLOT_MINUTES", "15"),
            ("GRID_SLOT_HEIGHT", "24"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.admin_password, "s3cret");
        assert_eq!(config.sessions_path, Some(PathBuf::from("data/week.json")));
        assert_eq!(config.grid.first_slot(), "07:30");
        assert_eq!(config.grid.slot_count(), 50);
        assert_eq!(config.grid.slot_height_px(), 24);
    }

    #[test]
    fn sunday_can_be_enabled() {
        let config = AppConfig::from_lookup(lookup_from(&[("GRID_DAYS", "Monday, sunday,funday")])).unwrap();
        assert_eq!(config.grid.days(), &[DayOfWeek::Monday, DayOfWeek::Sunday]);
    }

    #[test]
    fn grid_reads_only_grid_variables() {
        let lookup = |key: &str| {
            assert!(key.starts_with("GRID_"), "grid config read {}", key);
            match key {
                "GRID_DAYS" => Some("monday,tuesday".to_string()),
                "GRID_END" => Some("12:00".to_string()),
                _ => None,
            }
        };
        let grid = grid_from_lookup(lookup).unwrap();
        assert_eq!(grid.days(), &[DayOfWeek::Monday, DayOfWeek::Tuesday]);
        assert_eq!(grid.slot_count(), 8);
    }

    #[test]
    fn invalid_grid_is_an_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("GRID_SLOT_MINUTES", "7")]));
        assert!(matches!(result, Err(GridConfigError::Granularity(7))));

        let result = AppConfig::from_lookup(lookup_from(&[("GRID_DAYS", "funday")]));
        assert!(matches!(result, Err(GridConfigError::NoDays)));
    }
}
