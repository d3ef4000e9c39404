use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use delorean_profile::{WorkerParams, WorkerProfile};
use delorean_synth::{plan, render_logrotate, render_mock_config, render_projects_ini};

/// deloreanctl - synthesizes provisioning graphs for Delorean build workers
#[derive(Parser)]
#[command(name = "deloreanctl")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Synthesize the full resource graph for a worker
  Graph {
    /// Path to the worker parameter file (JSON)
    params_file: PathBuf,
  },

  /// Render a single templated artifact for a worker
  Render {
    /// Path to the worker parameter file (JSON)
    params_file: PathBuf,

    /// Which artifact to render
    #[arg(long, value_enum)]
    artifact: Artifact,
  },
}

#[derive(Clone, Copy, ValueEnum)]
enum Artifact {
  ProjectsIni,
  MockConfig,
  Logrotate,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Graph { params_file } => {
      let profile = load_profile(&params_file)?;
      let graph = plan(&profile).context("failed to synthesize resource graph")?;
      eprintln!(
        "Synthesized {} resources with {} ordering edges for {}",
        graph.nodes.len(),
        graph.edges.len(),
        profile.name
      );
      println!("{}", serde_json::to_string_pretty(&graph)?);
    }
    Commands::Render {
      params_file,
      artifact,
    } => {
      let profile = load_profile(&params_file)?;
      let body = match artifact {
        Artifact::ProjectsIni => render_projects_ini(&profile)?,
        Artifact::MockConfig => match render_mock_config(&profile)? {
          Some(body) => body,
          None => bail!("worker '{}' has no rendered mock config", profile.name),
        },
        Artifact::Logrotate => render_logrotate(&profile)?,
      };
      print!("{body}");
    }
  }

  Ok(())
}

fn load_profile(params_file: &PathBuf) -> Result<WorkerProfile> {
  let content = std::fs::read_to_string(params_file)
    .with_context(|| format!("failed to read parameter file: {}", params_file.display()))?;

  let params: WorkerParams = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse parameter file: {}", params_file.display()))?;

  let profile = params.resolve().context("failed to resolve worker profile")?;
  eprintln!("Resolved profile for {}", profile.name);
  Ok(profile)
}
