// build.rs - TOML-driven constant generation for expression limits
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    expression: ExpressionLimits,
    lexical: LexicalLimits,
    codec: CodecLimits,
    errors: ErrorLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct ExpressionLimits {
    max_expression_length: usize,
    max_operator_count: usize,
    macro_operator_cost: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_operand_length: usize,
    min_literal: f64,
    max_literal: f64,
}

#[derive(serde::Deserialize)]
struct CodecLimits {
    max_compressed_length: usize,
    default_max_level: u32,
    default_min_level: u32,
}

#[derive(serde::Deserialize)]
struct ErrorLimits {
    max_echo_length: usize,
    min_echo_length: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SORT_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=SORT_CONFIG_DIR");

    let profile = env::var("SORT_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("SORT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of sort_compiler directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig) {
    // Interaction identifiers are capped at 100 characters by the host platform
    const ABSOLUTE_MAX_COMPRESSED_LENGTH: usize = 100;

    if config.codec.max_compressed_length > ABSOLUTE_MAX_COMPRESSED_LENGTH {
        panic!("codec.max_compressed_length exceeds the interaction identifier limit");
    }

    if config.lexical.min_literal <= 0.0 {
        panic!("lexical.min_literal must be strictly positive");
    }

    if config.lexical.min_literal >= config.lexical.max_literal {
        panic!("lexical.min_literal must be below lexical.max_literal");
    }

    if config.expression.macro_operator_cost > config.expression.max_operator_count {
        panic!("expression.macro_operator_cost exceeds expression.max_operator_count");
    }

    if config.codec.default_min_level > config.codec.default_max_level {
        panic!("codec.default_min_level must not exceed codec.default_max_level");
    }

    if config.errors.min_echo_length > config.errors.max_echo_length {
        panic!("errors.min_echo_length must not exceed errors.max_echo_length");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    // f64 values use Debug formatting so integral values keep their decimal point
    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod expression {{
        pub const MAX_EXPRESSION_LENGTH: usize = {};
        pub const MAX_OPERATOR_COUNT: usize = {};
        pub const MACRO_OPERATOR_COST: usize = {};
    }}

    pub mod lexical {{
        pub const MAX_OPERAND_LENGTH: usize = {};
        pub const MIN_LITERAL: f64 = {:?};
        pub const MAX_LITERAL: f64 = {:?};
    }}

    pub mod codec {{
        pub const MAX_COMPRESSED_LENGTH: usize = {};
        pub const DEFAULT_MAX_LEVEL: u32 = {};
        pub const DEFAULT_MIN_LEVEL: u32 = {};
    }}

    pub mod errors {{
        pub const MAX_ECHO_LENGTH: usize = {};
        pub const MIN_ECHO_LENGTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.expression.max_expression_length,
        config.expression.max_operator_count,
        config.expression.macro_operator_cost,
        config.lexical.max_operand_length,
        config.lexical.min_literal,
        config.lexical.max_literal,
        config.codec.max_compressed_length,
        config.codec.default_max_level,
        config.codec.default_min_level,
        config.errors.max_echo_length,
        config.errors.min_echo_length,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
