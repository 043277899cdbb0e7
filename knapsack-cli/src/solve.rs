//! Solve command implementation for the knapsack CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use knapsack_core::{Algorithm, Instance, Solution, Solver};
use knapsack_solver::{
    AutoSolver, DEFAULT_MAX_CAPACITY_FOR_TABLE, DEFAULT_MAX_ITEMS_FOR_SEARCH, SearchLimits,
    SelectorConfig, solver_for,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ALGORITHM, ARG_INSTANCE, AUTO_ALGORITHM, CliError, ENV_INSTANCE, OutputFormat,
    format_solution, fs, parse_instance,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a 0/1 knapsack instance read from a text file. The \
                 first line holds the item count and capacity, and each \
                 following line one item's value and weight. Options can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Solve a knapsack instance"
)]
#[ortho_config(prefix = "KNAPSACK")]
pub(crate) struct SolveArgs {
    /// Path to the instance text file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) instance_path: Option<Utf8PathBuf>,
    /// Algorithm to run: auto, depth-first, best-first, dynamic-programming,
    /// greedy-input or greedy-density.
    #[arg(long = ARG_ALGORITHM, value_name = "name")]
    #[serde(default)]
    pub(crate) algorithm: Option<String>,
    /// Catalogs up to this size use tree search under `auto`.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) max_items_for_search: Option<usize>,
    /// Larger catalogs are tabulated under `auto` up to this capacity.
    #[arg(long, value_name = "capacity")]
    #[serde(default)]
    pub(crate) max_capacity_for_table: Option<u64>,
    /// Abort branch-and-bound after creating this many nodes.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) max_nodes: Option<usize>,
    /// Output format.
    #[arg(long, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    pub(crate) instance_path: Utf8PathBuf,
    /// `None` lets the size-based selector choose.
    pub(crate) algorithm: Option<Algorithm>,
    pub(crate) selector: SelectorConfig,
    pub(crate) limits: SearchLimits,
    pub(crate) format: OutputFormat,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.instance_path;
        match fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_INSTANCE,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_INSTANCE,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_INSTANCE,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let instance_path = args.instance_path.ok_or(CliError::MissingArgument {
            field: ARG_INSTANCE,
            env: ENV_INSTANCE,
        })?;
        let algorithm = args
            .algorithm
            .as_deref()
            .map(parse_algorithm)
            .transpose()?
            .flatten();
        let selector = SelectorConfig {
            max_items_for_search: args
                .max_items_for_search
                .unwrap_or(DEFAULT_MAX_ITEMS_FOR_SEARCH),
            max_capacity_for_table: args
                .max_capacity_for_table
                .unwrap_or(DEFAULT_MAX_CAPACITY_FOR_TABLE),
        };
        Ok(Self {
            instance_path,
            algorithm,
            selector,
            limits: SearchLimits {
                max_nodes: args.max_nodes,
            },
            format: args.format.unwrap_or_default(),
        })
    }
}

/// `Ok(None)` selects automatic dispatch.
fn parse_algorithm(name: &str) -> Result<Option<Algorithm>, CliError> {
    if name.trim().eq_ignore_ascii_case(AUTO_ALGORITHM) {
        return Ok(None);
    }
    name.parse()
        .map(Some)
        .map_err(|source| CliError::UnknownAlgorithm {
            source,
            expected: Algorithm::ALL.map(|algorithm| algorithm.as_str()).join(", "),
        })
}

/// Builds a solver for the current solve invocation.
pub(crate) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Box<dyn Solver>;
}

pub(crate) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Box<dyn Solver> {
        match config.algorithm {
            Some(algorithm) => solver_for(algorithm, config.limits),
            None => Box::new(AutoSolver::new(config.selector, config.limits)),
        }
    }
}

pub(crate) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &DefaultSolveSolverBuilder, &mut stdout)
}

pub(crate) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let instance = load_instance(&config.instance_path)?;
    log::debug!(
        "loaded {} items with capacity {} from {}",
        instance.len(),
        instance.capacity(),
        config.instance_path
    );
    let solution = builder
        .build(&config)
        .solve(&instance)
        .map_err(|source| CliError::Solve { source })?;
    write_solution(writer, &solution, config.format)
}

/// Read and parse an instance file.
pub(crate) fn load_instance(path: &Utf8Path) -> Result<Instance, CliError> {
    let text = fs::read_utf8_file(path).map_err(|source| CliError::ReadInstance {
        path: path.to_path_buf(),
        source,
    })?;
    parse_instance(&text).map_err(|source| CliError::ParseInstance {
        path: path.to_path_buf(),
        source,
    })
}

fn write_solution(
    writer: &mut dyn Write,
    solution: &Solution,
    format: OutputFormat,
) -> Result<(), CliError> {
    let payload = match format {
        OutputFormat::Text => format_solution(solution),
        OutputFormat::Json => {
            serde_json::to_string_pretty(solution).map_err(CliError::SerialiseSolution)?
        }
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
