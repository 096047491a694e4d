// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::cli::Cli;
use crate::error::BinResult;

/// Prints version, build and feature information.
pub fn version(_cli: &Cli) -> BinResult<()> {
    println!("Bistro - restaurant ordering backend");
    println!();
    println!("Version Information:");
    println!("  bistro-bin:    {}", crate::VERSION);
    println!("  bistro-api:    {}", bistro_api::VERSION);
    println!("  bistro-store:  {}", bistro_store::VERSION);
    println!("  bistro-config: {}", bistro_config::VERSION);
    println!();
    println!("Build Information:");
    println!("  Rust Edition: 2024");
    println!("  Target:       {}", std::env::consts::ARCH);
    println!("  OS:           {}", std::env::consts::OS);
    println!();
    println!("Features:");
    println!(
        "  MongoDB:      {}",
        if cfg!(feature = "mongodb-backend") { "enabled" } else { "disabled" }
    );
    println!();
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");

    Ok(())
}
