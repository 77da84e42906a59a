//! halpack CLI — build and package orchestrator for libhal driver packages.

mod commands;
mod profile;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use profile::{HalpackProfile, ProfileOverrides};

#[derive(Parser)]
#[command(name = "halpack", version, about = "Build and package embedded driver libraries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new driver-package project
    Init {
        /// Package name
        name: String,
    },
    /// Validate the toolchain and run the configure/build/test pipeline
    Build {
        /// Platform identifier (e.g. stm32f103c8)
        #[arg(long)]
        platform: Option<String>,
        /// Target operating system (baremetal, linux, windows, macos)
        #[arg(long)]
        target_os: Option<String>,
        /// Skip the test stage
        #[arg(long)]
        skip_tests: bool,
    },
    /// Run the pipeline and assemble the distributable package
    Package {
        /// Destination directory (default: <project>/package)
        #[arg(long)]
        dest: Option<String>,
        /// Platform identifier (e.g. stm32f103c8)
        #[arg(long)]
        platform: Option<String>,
        /// Target operating system (baremetal, linux, windows, macos)
        #[arg(long)]
        target_os: Option<String>,
        /// Skip the test stage
        #[arg(long)]
        skip_tests: bool,
    },
    /// Show the component graph and upstream requirements
    Graph {
        /// Output format (text, json)
        #[arg(long)]
        export: Option<String>,
    },
    /// Check toolchain and project status
    Doctor {
        /// Resolve against a specific target OS
        #[arg(long)]
        target_os: Option<String>,
        /// Resolve a specific platform identifier
        #[arg(long)]
        platform: Option<String>,
    },
    /// Remove the build output directory
    Clean,
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Build {
            platform,
            target_os,
            skip_tests,
        } => {
            let (profile, project_dir) = load_profile_required(&cwd)?;
            let overrides = ProfileOverrides {
                platform,
                target_os,
                skip_tests,
            };
            commands::build::run(&project_dir, &profile, &overrides)
        }

        Commands::Package {
            dest,
            platform,
            target_os,
            skip_tests,
        } => {
            let (profile, project_dir) = load_profile_required(&cwd)?;
            let overrides = ProfileOverrides {
                platform,
                target_os,
                skip_tests,
            };
            commands::package::run(&project_dir, &profile, dest.as_deref(), &overrides)
        }

        Commands::Graph { export } => commands::graph::run(export.as_deref()),

        Commands::Doctor {
            target_os,
            platform,
        } => {
            let (profile, project_dir) = load_profile_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            commands::doctor::run(
                &project_dir,
                profile.as_ref(),
                target_os.as_deref(),
                platform.as_deref(),
            )
        }

        Commands::Clean => {
            let (profile, project_dir) = load_profile_required(&cwd)?;
            commands::clean::run(&project_dir, &profile)
        }
    }
}

fn load_profile_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<HalpackProfile>, Option<PathBuf>)> {
    match HalpackProfile::find_and_load(cwd)? {
        Some((profile, dir)) => Ok((Some(profile), Some(dir))),
        None => Ok((None, None)),
    }
}

fn load_profile_required(cwd: &Path) -> anyhow::Result<(HalpackProfile, PathBuf)> {
    match HalpackProfile::find_and_load(cwd)? {
        Some(found) => Ok(found),
        None => anyhow::bail!("no halpack.toml found. Run 'halpack init' to create a project."),
    }
}
