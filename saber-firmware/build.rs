//! Build script for saber-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates launcher.toml at compile time
//! - Generates the calibration constant from launcher.toml

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use saber_core::config::{Calibration, ConfigError};
use serde::Deserialize;

/// Layout of launcher.toml
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LauncherFile {
    calibration: Calibration,
}

fn main() {
    setup_linker();
    let calibration = validate_config();
    generate_calibration(&calibration);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate launcher.toml and return the calibration it describes
fn validate_config() -> Calibration {
    // Re-run if launcher.toml changes
    println!("cargo:rerun-if-changed=launcher.toml");

    let config_path = Path::new("launcher.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: launcher.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a launcher.toml calibration file.         ║\n\
            ║  Please create one in the saber-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read launcher.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax, missing keys, unknown keys and out-of-range integers
    let file: LauncherFile = match toml::from_str(&content) {
        Ok(file) => file,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid launcher.toml                                    ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    // Consistency between the values
    if let Err(e) = file.calibration.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Inconsistent calibration in launcher.toml                ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(describe(e))
        );
    }

    println!("cargo:warning=launcher.toml validated successfully");
    file.calibration
}

/// Human-readable explanation of a calibration error
fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::EmptyAimRange => "aim_down_us must be below aim_up_us",
        ConfigError::TooFewSteps => "step_max must be at least 2",
        ConfigError::TriggerPositionsEqual => {
            "trigger_closed_us and trigger_open_us must differ"
        }
        ConfigError::ZeroLoadTime => "load_time_ms must be greater than zero",
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the calibration constant included by src/config.rs
fn generate_calibration(cal: &Calibration) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("calibration.rs")).unwrap();

    writeln!(f, "/// Calibration generated from launcher.toml").unwrap();
    writeln!(f, "pub const CALIBRATION: Calibration = Calibration {{").unwrap();
    writeln!(f, "    trigger_closed_us: {},", cal.trigger_closed_us).unwrap();
    writeln!(f, "    trigger_open_us: {},", cal.trigger_open_us).unwrap();
    writeln!(f, "    aim_up_us: {},", cal.aim_up_us).unwrap();
    writeln!(f, "    aim_down_us: {},", cal.aim_down_us).unwrap();
    writeln!(f, "    step_max: {},", cal.step_max).unwrap();
    writeln!(f, "    load_time_ms: {},", cal.load_time_ms).unwrap();
    writeln!(f, "}};").unwrap();
}
