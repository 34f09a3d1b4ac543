//! Runtime environment injected into the record store

use crate::adapters::{fixture_staff, ApiClient, FixtureSource, MeterSource};
use crate::config::{FairwattConfig, RunMode};
use crate::domain::{Employee, Result};
use std::sync::Arc;

/// Mode plus the data source and staff roster that go with it
#[derive(Clone)]
pub struct Environment {
    pub mode: RunMode,
    pub source: Arc<dyn MeterSource>,
    pub staff: Vec<Employee>,
}

impl Environment {
    /// Fixture data, no network, built-in staff roster
    pub fn debug() -> Self {
        Self {
            mode: RunMode::Debug,
            source: Arc::new(FixtureSource::new()),
            staff: fixture_staff(),
        }
    }

    /// Production mode against an arbitrary source
    pub fn production(source: Arc<dyn MeterSource>, staff: Vec<Employee>) -> Self {
        Self {
            mode: RunMode::Production,
            source,
            staff,
        }
    }

    /// Builds the environment the configuration asks for
    ///
    /// In debug mode a configured `[[staff]]` roster replaces the built-in one.
    pub fn from_config(config: &FairwattConfig) -> Result<Self> {
        let env = match config.mode {
            RunMode::Debug => {
                let mut env = Self::debug();
                if !config.staff.is_empty() {
                    env.staff = config.roster();
                }
                env
            }
            RunMode::Production => {
                let client = ApiClient::new(&config.api)?;
                Self::production(Arc::new(client), config.roster())
            }
        };

        tracing::info!(
            mode = %env.mode,
            source = %env.source.describe(),
            staff = env.staff.len(),
            "Environment ready"
        );

        Ok(env)
    }

    pub fn is_debug(&self) -> bool {
        self.mode == RunMode::Debug
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("mode", &self.mode)
            .field("source", &self.source.describe())
            .field("staff", &self.staff.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaffConfig;

    #[test]
    fn test_debug_environment() {
        let env = Environment::debug();
        assert!(env.is_debug());
        assert_eq!(env.staff.len(), 4);
    }

    #[test]
    fn test_from_config_debug_uses_configured_staff() {
        let mut config = FairwattConfig {
            mode: RunMode::Debug,
            ..FairwattConfig::default()
        };
        config.staff.push(StaffConfig {
            id: 10,
            name: "Field crew".to_string(),
        });

        let env = Environment::from_config(&config).unwrap();
        assert_eq!(env.staff.len(), 1);
        assert_eq!(env.staff[0].name, "Field crew");
    }

    #[test]
    fn test_from_config_production() {
        let env = Environment::from_config(&FairwattConfig::default()).unwrap();
        assert!(!env.is_debug());
        assert!(env.source.describe().contains("localhost:1252"));
    }
}
