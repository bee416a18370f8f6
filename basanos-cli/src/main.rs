//! Basanos CLI - ACVP conformance driver for ML-DSA implementations.

use anyhow::{Context, Result};
use basanos_core::{
    Harness, HarnessConfig, KeyGenSuite, Operation, SigGenSuite, SigVerSuite, SuiteSummary,
    VectorSet, KEY_GEN_FILE, SIG_GEN_FILE, SIG_VER_FILE,
};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// ACVP conformance driver for ML-DSA implementations
#[derive(Parser)]
#[command(name = "basanos")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run ACVP vectors against the implementation binaries
    Run {
        /// Directory containing the internalProjection vector documents
        #[arg(long, default_value = "test/acvp_data")]
        vectors: PathBuf,

        /// Root directory of the per-level implementation builds
        #[arg(long, default_value = "test/build")]
        builds: PathBuf,

        /// Command prepended to every invocation, e.g. an emulator
        /// (falls back to the EXEC_WRAPPER environment variable)
        #[arg(long)]
        exec_wrapper: Option<String>,

        /// Run a single suite instead of all three
        #[arg(short, long, value_enum)]
        suite: Option<Suite>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Suite {
    /// Key generation vectors
    #[value(name = "keyGen")]
    KeyGen,
    /// Signature generation vectors
    #[value(name = "sigGen")]
    SigGen,
    /// Signature verification vectors
    #[value(name = "sigVer")]
    SigVer,
}

/// Resolve the execution wrapper: an explicit flag wins over the
/// EXEC_WRAPPER environment variable; empty values count as unset.
fn resolve_exec_wrapper(flag: Option<String>) -> Option<String> {
    flag.or_else(|| env::var("EXEC_WRAPPER").ok())
        .map(|raw| raw.trim().to_string())
        .filter(|wrapper| !wrapper.is_empty())
}

/// Run vector suites against the implementation binaries
fn cmd_run(
    vectors: &Path,
    builds: PathBuf,
    exec_wrapper: Option<String>,
    suite: Option<Suite>,
    verbose: bool,
) -> Result<()> {
    let mut config = HarnessConfig::new(builds);
    config.exec_wrapper = resolve_exec_wrapper(exec_wrapper);
    config.verbose = verbose;
    if verbose {
        if let Some(wrapper) = &config.exec_wrapper {
            eprintln!("Using execution wrapper: {wrapper}");
        }
    }
    let harness = Harness::new(config);

    match suite {
        None => {
            let set = VectorSet::load_dir(vectors).context("Failed to load vector documents")?;
            let summary = harness.run_all(&set)?;
            report(Operation::KeyGen, summary.key_gen, verbose);
            report(Operation::SigGen, summary.sig_gen, verbose);
            report(Operation::SigVer, summary.sig_ver, verbose);
        }
        Some(Suite::KeyGen) => {
            let suite = KeyGenSuite::load(&vectors.join(KEY_GEN_FILE))
                .context("Failed to load keyGen vector document")?;
            let summary = harness.run_key_gen(&suite)?;
            report(Operation::KeyGen, summary, verbose);
        }
        Some(Suite::SigGen) => {
            let suite = SigGenSuite::load(&vectors.join(SIG_GEN_FILE))
                .context("Failed to load sigGen vector document")?;
            let summary = harness.run_sig_gen(&suite)?;
            report(Operation::SigGen, summary, verbose);
        }
        Some(Suite::SigVer) => {
            let suite = SigVerSuite::load(&vectors.join(SIG_VER_FILE))
                .context("Failed to load sigVer vector document")?;
            let summary = harness.run_sig_ver(&suite)?;
            report(Operation::SigVer, summary, verbose);
        }
    }

    Ok(())
}

fn report(operation: Operation, summary: SuiteSummary, verbose: bool) {
    if verbose {
        eprintln!(
            "{}: {} executed, {} skipped",
            operation, summary.executed, summary.skipped
        );
    }
}

/// Generate shell completions
fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "basanos", &mut io::stdout());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            vectors,
            builds,
            exec_wrapper,
            suite,
        } => cmd_run(&vectors, builds, exec_wrapper, suite, cli.verbose),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
