// src/config/validate.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PipexecError, Result};

static ENV_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid env name regex"));

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::PipexecError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.exec, raw.packager))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_env_names(cfg)?;
    validate_home(cfg)?;
    validate_working_dir(cfg)?;
    Ok(())
}

fn validate_env_names(cfg: &RawConfigFile) -> Result<()> {
    for name in cfg.exec.env.keys() {
        if !ENV_NAME.is_match(name) {
            return Err(PipexecError::ConfigError(format!(
                "[exec.env] has invalid variable name '{}'",
                name
            )));
        }
    }
    Ok(())
}

fn validate_home(cfg: &RawConfigFile) -> Result<()> {
    if let Some(home) = &cfg.exec.home {
        if home.as_os_str().is_empty() {
            return Err(PipexecError::ConfigError(
                "[exec].home must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_working_dir(cfg: &RawConfigFile) -> Result<()> {
    if let Some(dir) = &cfg.exec.working_dir {
        if !dir.is_dir() {
            return Err(PipexecError::ConfigError(format!(
                "[exec].working_dir '{}' is not a directory",
                dir.display()
            )));
        }
    }
    Ok(())
}
