//! Host check helper for the qce-bam crate.
//!
//! Runs the host test suite and clippy across the crate's feature
//! combinations, so every `cfg(feature = ...)` path is compiled at least once.
//!
//! # Overview
//!
//! - Reads the `[features]` table of the root `Cargo.toml`
//! - Builds a matrix: no features, each feature alone, all features
//! - Runs `cargo test` and/or `cargo clippy` once per matrix entry
//!
//! # Usage
//!
//! ```ignore
//! cargo xtask test
//! cargo xtask clippy
//! cargo xtask ci
//! cargo xtask test --features defmt,async
//! cargo xtask matrix
//! ```
//!
//! # Notes
//!
//! - If no command is supplied, `ci` is assumed.
//! - `--features a,b` runs a single entry instead of the matrix.
//! - The `defmt` feature needs a global logger to link test binaries, so it
//!   is only checked by clippy, never tested.
//! - `CARGO_TARGET_DIR` is defaulted to `<repo>/target` if not set.

use std::{
    env,
    error::Error,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

const XTASK_MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Features that cannot link a host test binary.
const CLIPPY_ONLY_FEATURES: &[&str] = &["defmt"];

/// Operational mode for the xtask invocation.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Test,
    Clippy,
    Ci,
    Matrix,
}

/// One feature selection of the check matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
struct FeatureSet {
    features: Vec<String>,
}

impl FeatureSet {
    fn label(&self) -> String {
        if self.features.is_empty() {
            "(no features)".to_string()
        } else {
            self.features.join(",")
        }
    }

    fn testable(&self) -> bool {
        !self
            .features
            .iter()
            .any(|f| CLIPPY_ONLY_FEATURES.contains(&f.as_str()))
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("xtask: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args
        .first()
        .is_some_and(|a| matches!(a.as_str(), "-h" | "--help" | "help"))
    {
        print_usage();
        return Ok(());
    }

    let mut mode: Option<Mode> = None;
    let mut explicit: Option<FeatureSet> = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "test" => mode = Some(Mode::Test),
            "clippy" => mode = Some(Mode::Clippy),
            "ci" => mode = Some(Mode::Ci),
            "matrix" => mode = Some(Mode::Matrix),
            "--features" => {
                let list = iter.next().ok_or("--features needs a value")?;
                explicit = Some(parse_feature_list(&list));
            }
            _ => return Err(format!("unexpected argument: {arg}").into()),
        }
    }

    let mode = mode.unwrap_or(Mode::Ci);
    let repo_root = repo_root()?;
    let manifest_path = repo_root.join("Cargo.toml");

    let matrix = match explicit {
        Some(set) => vec![set],
        None => feature_matrix(&read_features(&manifest_path)?),
    };

    if mode == Mode::Matrix {
        for set in &matrix {
            println!("{}", set.label());
        }
        return Ok(());
    }

    for set in &matrix {
        if matches!(mode, Mode::Test | Mode::Ci) && set.testable() {
            run_cargo("test", &manifest_path, &repo_root, set, &[])?;
        }
        if matches!(mode, Mode::Clippy | Mode::Ci) {
            run_cargo(
                "clippy",
                &manifest_path,
                &repo_root,
                set,
                &["--all-targets"],
            )?;
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage:\n  cargo xtask [test|clippy|ci|matrix] [--features a,b]\n\nCommands:\n  test    run host tests for each feature set\n  clippy  run clippy for each feature set\n  ci      test + clippy (default)\n  matrix  print the feature sets and exit\n",
    );
}

fn repo_root() -> Result<PathBuf, Box<dyn Error>> {
    Path::new(XTASK_MANIFEST_DIR)
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| "xtask manifest directory has no parent".into())
}

fn parse_feature_list(list: &str) -> FeatureSet {
    FeatureSet {
        features: list
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Feature names declared by the manifest, excluding `default`.
fn read_features(manifest_path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let manifest_str = fs::read_to_string(manifest_path)
        .map_err(|_| format!("unable to read {}", manifest_path.display()))?;
    let manifest: toml::Value = manifest_str.parse()?;

    let mut features: Vec<String> = manifest
        .get("features")
        .and_then(|f| f.as_table())
        .map(|table| {
            table
                .keys()
                .filter(|name| name.as_str() != "default")
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    features.sort();

    Ok(features)
}

fn feature_matrix(features: &[String]) -> Vec<FeatureSet> {
    let mut matrix = vec![FeatureSet {
        features: Vec::new(),
    }];

    for feature in features {
        matrix.push(FeatureSet {
            features: vec![feature.clone()],
        });
    }

    // `defmt` and `log` select the same logging macros, defmt wins
    if features.len() > 1 {
        matrix.push(FeatureSet {
            features: features.to_vec(),
        });
    }

    matrix
}

fn run_cargo(
    subcommand: &str,
    manifest_path: &Path,
    repo_root: &Path,
    set: &FeatureSet,
    extra: &[&str],
) -> Result<(), Box<dyn Error>> {
    let mut cargo_args = vec![
        subcommand.to_string(),
        "--manifest-path".to_string(),
        manifest_path.display().to_string(),
        "-p".to_string(),
        "qce-bam".to_string(),
        "--no-default-features".to_string(),
    ];

    if !set.features.is_empty() {
        cargo_args.push("--features".to_string());
        cargo_args.push(set.features.join(","));
    }

    cargo_args.extend(extra.iter().map(|s| s.to_string()));

    let mut command = Command::new("cargo");
    command.args(&cargo_args);

    if env::var_os("CARGO_TARGET_DIR").is_none() {
        command.env("CARGO_TARGET_DIR", repo_root.join("target"));
    }

    println!("xtask: [{}] cargo {}", set.label(), cargo_args.join(" "));

    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("cargo {subcommand} failed for {} (status: {status:?})", set.label()).into())
    }
}
