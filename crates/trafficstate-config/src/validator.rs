//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_routing(config, &mut result);
        Self::validate_sink(config, &mut result);
        Self::validate_scheduler(config, &mut result);

        // Entities
        let waypoint_ids = Self::validate_waypoints(config, &mut result);
        let route_ids = Self::validate_routes(config, &waypoint_ids, &mut result);
        Self::validate_jobs(config, &route_ids, &mut result);

        Ok(result)
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_routing(config: &Config, result: &mut ValidationResult) {
        if config.routing.api_key.trim().is_empty() {
            result.add_error(ValidationError::new(
                "routing.api_key",
                "API key cannot be empty",
            ));
        }

        Self::validate_http_url("routing.base_url", &config.routing.base_url, result);

        if config.routing.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "routing.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_sink(config: &Config, result: &mut ValidationResult) {
        if config.sink.base_url.trim().is_empty() {
            result.add_error(ValidationError::new(
                "sink.base_url",
                "Sink base_url cannot be empty",
            ));
        } else {
            Self::validate_http_url("sink.base_url", &config.sink.base_url, result);
        }

        if config.sink.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "sink.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_scheduler(config: &Config, result: &mut ValidationResult) {
        if config.scheduler.timezone.trim().is_empty() {
            result.add_error(ValidationError::new(
                "scheduler.timezone",
                "Timezone cannot be empty",
            ));
        } else if let Err(e) = config.scheduler.parsed_timezone() {
            result.add_error(ValidationError::new("scheduler.timezone", e.to_string()));
        }
    }

    fn validate_http_url(path: &str, value: &str, result: &mut ValidationResult) {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            result.add_error(ValidationError::new(
                path,
                "URL must start with http:// or https://",
            ));
            return;
        }
        if let Err(e) = url::Url::parse(value) {
            result.add_error(ValidationError::new(path, format!("Invalid URL: {}", e)));
            return;
        }
        if !value.ends_with('/') {
            result.add_warning(ValidationWarning::new(
                path,
                "URL has no trailing '/', one will be appended",
            ));
        }
    }

    fn validate_waypoints(config: &Config, result: &mut ValidationResult) -> HashSet<String> {
        let mut ids = HashSet::new();
        for (i, entry) in config.waypoints.iter().enumerate() {
            let path = format!("waypoints[{}]", i);
            if let Err(e) = entry.to_waypoint() {
                result.add_error(ValidationError::new(&path, e.to_string()));
            }
            if !ids.insert(entry.id.clone()) {
                result.add_error(ValidationError::new(
                    &path,
                    format!("Duplicate waypoint id '{}'", entry.id),
                ));
            }
        }
        ids
    }

    fn validate_routes(
        config: &Config,
        waypoint_ids: &HashSet<String>,
        result: &mut ValidationResult,
    ) -> HashSet<String> {
        let mut ids = HashSet::new();
        for (i, entry) in config.routes.iter().enumerate() {
            let path = format!("routes[{}]", i);
            if let Err(e) = entry.to_route() {
                result.add_error(ValidationError::new(&path, e.to_string()));
            }
            if !ids.insert(entry.id.clone()) {
                result.add_error(ValidationError::new(
                    &path,
                    format!("Duplicate route id '{}'", entry.id),
                ));
            }

            // Resolution is lazy, so dangling references only warn.
            let referenced = [&entry.start, &entry.finish]
                .into_iter()
                .chain(entry.via.iter());
            for waypoint_id in referenced {
                if !waypoint_id.is_empty() && !waypoint_ids.contains(waypoint_id) {
                    result.add_warning(ValidationWarning::new(
                        &path,
                        format!(
                            "Route '{}' references unknown waypoint '{}'",
                            entry.id, waypoint_id
                        ),
                    ));
                }
            }
        }
        ids
    }

    fn validate_jobs(config: &Config, route_ids: &HashSet<String>, result: &mut ValidationResult) {
        let mut ids = HashSet::new();
        for (i, entry) in config.jobs.iter().enumerate() {
            let path = format!("jobs[{}]", i);
            if entry.id.trim().is_empty() {
                result.add_error(ValidationError::new(&path, "Job id cannot be empty"));
            } else if !ids.insert(entry.id.clone()) {
                result.add_error(ValidationError::new(
                    &path,
                    format!("Duplicate job id '{}'", entry.id),
                ));
            }
            if entry.schedule.trim().is_empty() {
                result.add_error(ValidationError::new(&path, "Job schedule cannot be empty"));
            }
            if entry.routes.is_empty() {
                result.add_error(ValidationError::new(&path, "Job must name at least one route"));
            }
            for route_id in &entry.routes {
                if !route_ids.contains(route_id) {
                    result.add_warning(ValidationWarning::new(
                        &path,
                        format!("Job '{}' references unknown route '{}'", entry.id, route_id),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
