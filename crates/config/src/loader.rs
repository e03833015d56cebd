use std::path::Path;

use crate::{Config, Result, error::Error};

pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse(&content)
}

pub(crate) fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;

    for warning in validate(&config)? {
        log::warn!("{warning}");
    }

    Ok(config)
}

/// Rejects settings the converter cannot act on and returns warnings for ones that
/// are merely pointless.
pub(crate) fn validate(config: &Config) -> Result<Vec<String>> {
    let mut warnings = Vec::new();
    let cache_control = &config.conversion.cache_control;

    if cache_control.model_patterns.iter().any(|pattern| pattern.trim().is_empty()) {
        return Err(Error::Validation(
            "conversion.cache_control.model_patterns must not contain empty patterns, they would match every model"
                .to_string(),
        ));
    }

    if cache_control.enabled && cache_control.model_patterns.is_empty() {
        warnings.push(
            "Cache control is enabled but conversion.cache_control.model_patterns is empty, no system block will be annotated"
                .to_string(),
        );
    }

    for (from, to) in config.conversion.models.iter() {
        if from.trim().is_empty() {
            return Err(Error::Validation(
                "conversion.models must not contain an empty model name".to_string(),
            ));
        }

        if to.trim().is_empty() {
            return Err(Error::Validation(format!(
                "conversion.models.\"{from}\" must map to a non-empty model name"
            )));
        }

        if from.contains('/') {
            warnings.push(format!(
                "Model alias \"{from}\" contains a namespace separator and will never be used, namespaced names are forwarded unchanged"
            ));
        }
    }

    Ok(warnings)
}
