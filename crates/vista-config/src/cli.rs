//! Command-line argument parsing for the LOD demo.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use vista_lod::{GracePolicy, ThresholdValidation};

use crate::Config;

/// How derived thresholds that shrink with level index are handled.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationArg {
    Off,
    Reject,
    Clamp,
}

impl From<ValidationArg> for ThresholdValidation {
    fn from(arg: ValidationArg) -> Self {
        match arg {
            ValidationArg::Off => ThresholdValidation::Off,
            ValidationArg::Reject => ThresholdValidation::Reject,
            ValidationArg::Clamp => ThresholdValidation::Clamp,
        }
    }
}

/// Vista command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "vista", about = "Discrete LOD selection demo")]
pub struct CliArgs {
    /// Vertical field of view in degrees.
    #[arg(long)]
    pub fov: Option<f32>,

    /// Maximum levels kept per object.
    #[arg(long)]
    pub max_levels: Option<usize>,

    /// Hold the last level out to this multiple of its threshold (0 disables).
    #[arg(long)]
    pub grace_multiplier: Option<f32>,

    /// Threshold monotonicity handling.
    #[arg(long, value_enum)]
    pub validation: Option<ValidationArg>,

    /// Number of demo objects.
    #[arg(long)]
    pub objects: Option<u32>,

    /// Number of frames to simulate.
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Hide LOD distance spheres.
    #[arg(long)]
    pub no_gizmos: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(fov) = args.fov {
            self.lod.model.fov_degrees = fov;
        }
        if let Some(max) = args.max_levels {
            self.lod.max_levels = max;
        }
        if let Some(factor) = args.grace_multiplier {
            self.lod.grace = if factor > 0.0 {
                GracePolicy::Multiplier(factor)
            } else {
                GracePolicy::None
            };
        }
        if let Some(validation) = args.validation {
            self.lod.validation = validation.into();
        }
        if let Some(count) = args.objects {
            self.demo.object_count = count;
        }
        if let Some(ticks) = args.ticks {
            self.demo.ticks = ticks;
        }
        if args.no_gizmos {
            self.debug.show_gizmos = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            fov: Some(90.0),
            grace_multiplier: Some(1.5),
            validation: Some(ValidationArg::Reject),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.lod.model.fov_degrees, 90.0);
        assert_eq!(config.lod.grace, GracePolicy::Multiplier(1.5));
        assert_eq!(config.lod.validation, ThresholdValidation::Reject);
        // Non-overridden fields retain defaults
        assert_eq!(config.lod.max_levels, 5);
        assert!(config.debug.show_gizmos);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_zero_grace_disables_policy() {
        let mut config = Config::default();
        config.lod.grace = GracePolicy::Multiplier(2.0);
        let args = CliArgs {
            grace_multiplier: Some(0.0),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.lod.grace, GracePolicy::None);
    }

    #[test]
    fn test_parse_from_args() {
        let args = CliArgs::parse_from([
            "vista",
            "--objects",
            "4",
            "--validation",
            "off",
            "--no-gizmos",
        ]);
        assert_eq!(args.objects, Some(4));
        assert_eq!(args.validation, Some(ValidationArg::Off));
        assert!(args.no_gizmos);
        assert!(args.fov.is_none());
    }
}
