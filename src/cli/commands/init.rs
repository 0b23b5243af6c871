//! Init command implementation
//!
//! This module implements the `init` command for generating a sample sweep
//! configuration and, optionally, a tool settings file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the sweep configuration
    #[arg(short, long, default_value = "sweep.json")]
    pub output: String,

    /// Also write a settings file (parametric-export.toml) next to it
    #[arg(long)]
    pub with_settings: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing sweep configuration");

        println!("📝 Initializing sweep configuration");
        println!();

        let output = Path::new(&self.output);
        let settings_path = output
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("parametric-export.toml");

        let mut targets = vec![(output.to_path_buf(), Self::generate_sweep_config())];
        if self.with_settings {
            targets.push((settings_path, Self::generate_settings()));
        }

        for (path, _) in &targets {
            if path.exists() && !self.force {
                println!("❌ File already exists: {}", path.display());
                println!("   Use --force to overwrite");
                return Ok(2); // Configuration error exit code
            }
        }

        for (path, contents) in &targets {
            if let Err(e) = fs::write(path, contents) {
                println!("❌ Failed to write {}", path.display());
                println!("   Error: {}", e);
                return Ok(5); // Fatal error exit code
            }
            println!("✅ Created: {}", path.display());
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your bodies and parameters", self.output);
        println!("  2. Check it: parametric-export validate {}", self.output);
        println!("  3. Preview paths: parametric-export plan {}", self.output);
        println!("  4. Run: parametric-export export {}", self.output);
        println!();
        Ok(0)
    }

    /// Generate a sample sweep configuration
    fn generate_sweep_config() -> String {
        r#"{
  "outputDirectory": "output",
  "bodiesToExport": ["Drawer", "Front"],
  "exportOptions": {
    "fileType": "STL",
    "stlQuality": "Medium",
    "forceRecompute": true
  },
  "parametersToIterate": {
    "COLUMNS": { "outputName": "c", "variants": [1, 2, 3], "grouping": true },
    "ROWS": { "outputName": "r", "variants": [1, 2] },
    "Depth": { "outputName": "d", "variants": [120.0, 150.5] }
  }
}
"#
        .to_string()
    }

    /// Generate a sample settings file
    fn generate_settings() -> String {
        r#"# Parametric Export settings
#
# Every value can be overridden with PARAMETRIC_EXPORT_<SECTION>_<KEY>,
# and ${VAR_NAME} placeholders are substituted from the environment.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"
# Never write files, log every model call instead
dry_run = false

[backend]
# CAD backend: "dry-run" or "openscad"
kind = "dry-run"

# [backend.openscad]
# binary = "openscad"
# model = "drawer.scad"
# body_variable = "body"
# extra_args = []

[logging]
local_enabled = false
local_path = "logs"
# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
