// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use bistro_config::{BistroConfig, ConfigLoader, StoreBackend};

use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command.
///
/// Unlike `run`, a missing file is an error here.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = &cli.config;

    if !config_path.exists() {
        return Err(BinError::config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = ConfigLoader::new()
        .load(config_path)
        .map_err(|e| BinError::config(format!("Configuration validation failed: {}", e)))?;
    let warnings = validation_warnings(&config);

    match args.format {
        OutputFormat::Text => {
            println!("✓ Configuration is valid: {}", config_path.display());
            println!();
            println!("Summary:");
            println!("  Listen:   {}:{}", config.server.host, config.server.port);
            println!("  Store:    {}", config.store.backend);
            println!("  Database: {}", config.store.database);
            println!("  Logging:  {}", config.logging.level.as_str());

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  ⚠ {}", warning);
                }
            }

            if args.show_config {
                println!();
                println!("Parsed configuration:");
                println!("{}", to_pretty_json(&config)?);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "config_path": config_path.display().to_string(),
                "summary": {
                    "host": config.server.host.to_string(),
                    "port": config.server.port,
                    "store_backend": config.store.backend.as_str(),
                    "database": config.store.database,
                },
                "warnings": warnings,
                "config": if args.show_config { Some(&config) } else { None },
            });
            println!("{}", to_pretty_json(&output)?);
        }
    }

    if args.strict && !warnings.is_empty() {
        return Err(BinError::config(format!(
            "Strict mode: {} warning(s) found",
            warnings.len()
        )));
    }

    Ok(())
}

/// Returns non-fatal problems in an otherwise valid configuration.
pub fn validation_warnings(config: &BistroConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.store.backend == StoreBackend::Memory {
        warnings.push("In-memory store: data is lost on restart".to_string());
    }

    let cors = &config.server.cors;
    if cors.allow_credentials && cors.allowed_origins.iter().any(|o| o == "*") {
        warnings.push(
            "CORS credentials are ignored while allowed_origins contains '*'".to_string(),
        );
    }

    if config.auth.secret.expose().len() < 32 {
        warnings.push("Token secret is shorter than 32 bytes".to_string());
    }

    warnings
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> BinResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| BinError::runtime(format!("failed to render output: {}", e)))
}
