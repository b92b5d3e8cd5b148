//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::Cli;
use crate::{
    config::{EnhanceFactors, ProcessingConfig},
    models::ModelType,
};
use anyhow::{Context, Result};

/// Convert CLI arguments to a validated [`ProcessingConfig`]
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    pub(crate) fn from_cli(cli: &Cli) -> Result<ProcessingConfig> {
        let model_type = Self::resolve_model_type(cli)?;

        ProcessingConfig::builder()
            .enhance_factors(EnhanceFactors::default())
            .model_path(cli.model.clone())
            .model_type(model_type)
            .intra_threads(cli.threads)
            .strict(cli.strict)
            .build()
            .context("Failed to build configuration")
    }

    /// Explicit `--model-type` wins, then detection from the model file name
    fn resolve_model_type(cli: &Cli) -> Result<ModelType> {
        if let Some(name) = &cli.model_type {
            return ModelType::from_name(name).with_context(|| {
                format!(
                    "Unknown model type '{name}'. Valid types: {}",
                    ModelType::all_names().join(", ")
                )
            });
        }

        Ok(cli
            .model
            .as_deref()
            .and_then(ModelType::from_path)
            .unwrap_or(ModelType::U2Net))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["hoverloon-images"]);
        let config = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(config.segmenter.model_type, ModelType::U2Net);
        assert_eq!(config.enhance, EnhanceFactors::default());
        assert!(!config.strict);
    }

    #[test]
    fn test_model_type_detected_from_path() {
        let cli = Cli::parse_from([
            "hoverloon-images",
            "--model",
            "/models/isnet-general-use.onnx",
            "--strict",
        ]);
        let config = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(config.segmenter.model_type, ModelType::ISNet);
        assert!(config.strict);
    }

    #[test]
    fn test_explicit_model_type_wins() {
        let cli = Cli::parse_from([
            "hoverloon-images",
            "--model",
            "/models/isnet-general-use.onnx",
            "--model-type",
            "u2net",
            "-t",
            "2",
        ]);
        let config = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(config.segmenter.model_type, ModelType::U2Net);
        assert_eq!(config.segmenter.intra_threads, 2);
    }

    #[test]
    fn test_unknown_model_type() {
        let cli = Cli::parse_from(["hoverloon-images", "--model-type", "birefnet"]);
        let err = CliConfigBuilder::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("birefnet"));
    }

    #[test]
    fn test_project_root_help_mentions_cargo_run() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("--project-root"));
        assert!(help.contains("cargo run"));
        assert!(help.contains("target/"));
    }
}
