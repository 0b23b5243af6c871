//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables are serialized through
//! `ENV_MUTEX` to avoid interference between tests.

use parametric_export::config::{
    load_settings, load_settings_or_default, load_sweep_config, BackendKind, FileType,
    GroupingStyle, StlQuality,
};
use parametric_export::domain::{ParameterValue, SweepError};
use std::fs;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("PARAMETRIC_EXPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("PARAMETRIC_EXPORT_APPLICATION_DRY_RUN");
    std::env::remove_var("PARAMETRIC_EXPORT_BACKEND_KIND");
    std::env::remove_var("PARAMETRIC_EXPORT_OPENSCAD_BINARY");
    std::env::remove_var("PARAMETRIC_EXPORT_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("TEST_OPENSCAD_BIN");
}

#[test]
fn test_load_complete_sweep() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawer.json");
    fs::write(
        &path,
        r#"{
            "outputDirectory": "exports/drawers",
            "bodiesToExport": ["Drawer", "Front", "Handle"],
            "exportOptions": {
                "fileType": "STEP",
                "stlQuality": "Low",
                "fileNameTemplate": "{bodyName}-{COLUMNS}x{ROWS}",
                "forceRecompute": false,
                "groupingStyle": "joined"
            },
            "parametersToIterate": {
                "COLUMNS": { "outputName": "c", "variants": [1, 2, 3], "grouping": true },
                "ROWS": { "outputToken": "r", "variants": [1, 2] },
                "Finish": { "variants": ["oak", "walnut"] },
                "Depth": { "variants": [120.5, 150] }
            }
        }"#,
    )
    .unwrap();

    let config = load_sweep_config(&path).unwrap();

    assert_eq!(config.output_directory, dir.path().join("exports/drawers"));
    assert_eq!(config.bodies_to_export.len(), 3);
    assert_eq!(config.export_options.file_type, FileType::Step);
    assert_eq!(config.export_options.stl_quality, StlQuality::Low);
    assert!(!config.export_options.force_recompute);
    assert_eq!(config.export_options.grouping_style, GroupingStyle::Joined);
    assert_eq!(config.total_jobs(), 3 * 2 * 2 * 2 * 3);

    let (_, finish) = config.parameters_to_iterate.get_full("Finish").unwrap();
    assert_eq!(finish.token(), "Finish");
    assert_eq!(
        finish.variants,
        vec![
            ParameterValue::Text("oak".to_string()),
            ParameterValue::Text("walnut".to_string())
        ]
    );

    let (_, depth) = config.parameters_to_iterate.get_full("Depth").unwrap();
    assert_eq!(
        depth.variants,
        vec![ParameterValue::Float(120.5), ParameterValue::Integer(150)]
    );
}

#[test]
fn test_sweep_without_parameters() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "bodiesToExport": ["Lid"], "parametersToIterate": {} }"#)
        .unwrap();
    file.flush().unwrap();

    let config = load_sweep_config(file.path()).unwrap();
    assert_eq!(config.total_jobs(), 1);
}

#[test]
fn test_sweep_rejects_object_variant() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"{ "bodiesToExport": ["Lid"],
              "parametersToIterate": { "Size": { "variants": [{ "value": 2 }] } } }"#,
    )
    .unwrap();
    file.flush().unwrap();

    let result = load_sweep_config(file.path());
    assert!(matches!(result, Err(SweepError::Configuration(_))));
}

#[test]
fn test_load_settings_with_env_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_OPENSCAD_BIN", "/opt/openscad/bin/openscad");

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[application]
log_level = "warn"

[backend]
kind = "openscad"

[backend.openscad]
binary = "${TEST_OPENSCAD_BIN}"
model = "/models/drawer.scad"
extra_args = ["--hardwarnings"]

[logging]
local_enabled = true
local_path = "/tmp/parametric-export-logs"
local_rotation = "hourly"
"#,
    )
    .unwrap();
    file.flush().unwrap();

    let settings = load_settings(file.path()).unwrap();
    assert_eq!(settings.application.log_level, "warn");
    assert_eq!(settings.backend.kind, BackendKind::Openscad);
    let openscad = settings.backend.openscad.unwrap();
    assert_eq!(openscad.binary, "/opt/openscad/bin/openscad");
    assert_eq!(openscad.extra_args, vec!["--hardwarnings".to_string()]);
    assert!(settings.logging.local_enabled);
    assert_eq!(settings.logging.local_rotation, "hourly");

    cleanup_env_vars();
}

#[test]
fn test_env_overrides_settings() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("PARAMETRIC_EXPORT_APPLICATION_LOG_LEVEL", "debug");
    std::env::set_var("PARAMETRIC_EXPORT_APPLICATION_DRY_RUN", "true");

    let settings = load_settings_or_default(None).unwrap();
    assert_eq!(settings.application.log_level, "debug");
    assert!(settings.application.dry_run);

    cleanup_env_vars();
}

#[test]
fn test_invalid_backend_override_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("PARAMETRIC_EXPORT_BACKEND_KIND", "blender");

    let result = load_settings_or_default(None);
    assert!(matches!(result, Err(SweepError::Configuration(_))));

    cleanup_env_vars();
}

#[test]
fn test_invalid_log_level_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[application]\nlog_level = \"loud\"\n").unwrap();
    file.flush().unwrap();

    let result = load_settings(file.path());
    assert!(result.unwrap_err().to_string().contains("log_level"));
}
