//! Configuration module for the sort expression compiler
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SORT_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("SORT_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::*;

    #[test]
    fn test_generated_limits_match_platform_constraints() {
        assert!(codec::MAX_COMPRESSED_LENGTH <= 100);
        assert!(lexical::MIN_LITERAL > 0.0);
        assert!(lexical::MIN_LITERAL < lexical::MAX_LITERAL);
        assert!(expression::MACRO_OPERATOR_COST <= expression::MAX_OPERATOR_COUNT);
        assert!(codec::DEFAULT_MIN_LEVEL <= codec::DEFAULT_MAX_LEVEL);
    }

    #[test]
    fn test_source_info() {
        assert!(super::build_info::source_info().ends_with(".toml"));
    }
}
