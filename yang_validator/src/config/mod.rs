//! Configuration module for the YANG validator
//! Automatically uses generated constants from TOML configuration

// Generated at compile time by build.rs from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{FileProcessorPreferences, LogLevel, LoggingPreferences, RuntimeConfig};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("YANG_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("YANG_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;
    use super::*;

    #[test]
    fn test_generated_limits_are_consistent() {
        assert!(file_processing::MAX_FILE_SIZE > 0);
        assert!(file_processing::LARGE_FILE_THRESHOLD <= file_processing::MAX_FILE_SIZE);
        assert!(batch_processing::MAX_WORKER_THREADS >= 1);
        assert!(logging::LOG_BUFFER_SIZE >= 100);
    }

    #[test]
    fn test_source_info_names_profile() {
        let info = build_info::source_info();
        assert!(info.contains(build_info::profile()));
        assert!(info.ends_with(".toml"));
    }
}
