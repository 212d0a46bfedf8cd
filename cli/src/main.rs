use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use streamlink_cli::commands::{self, HostSession, Repl};
use streamlink_cli::logging::init_logging;
use streamlink_cli::readline;
use streamlink_core::UserRole;

#[derive(Parser)]
#[command(version, about = "WvW kill streak and squad status tracker")]
struct Cli {
    /// Config file; defaults to the per-user streamlink config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Write daily-rolling log files into this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Replay a JSON-lines event recording
    Replay {
        #[arg(short, long)]
        file: PathBuf,
        /// Record writes in memory instead of touching the output files
        #[arg(long)]
        dry_run: bool,
    },
    /// Feed hand-typed events
    Repl {
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_dir.as_deref());
    let config = commands::resolve_config(cli.config.as_deref())?;

    match cli.command {
        Mode::Replay { file, dry_run } => commands::replay(&file, &config, dry_run),
        Mode::Repl { dry_run } => run_repl(HostSession::load(&config, dry_run)),
    }
}

fn run_repl(host: HostSession) -> Result<(), String> {
    let mut repl = Repl::new(host);

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut repl) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(disable_version_flag = true)]
struct Prompt {
    #[command(subcommand)]
    command: Option<PromptCommand>,
}

#[derive(Subcommand)]
enum PromptCommand {
    /// Killing blow by the local player on a foe
    Kill {
        #[arg(short, long)]
        target: Option<u64>,
    },
    /// Local player died
    Death,
    /// Announce the local player on a team
    #[command(name = "self")]
    Identify { team: u16 },
    /// Map id state change
    Map { id: u32 },
    Join { account: String },
    Leave { account: String },
    /// Heartbeat for polling detectors
    Tick,
    Status,
    /// Write the settings file back
    Save,
    Exit,
}

fn respond(line: &str, repl: &mut Repl) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "streamlink".to_string());
    let prompt = Prompt::try_parse_from(args).map_err(|e| e.to_string())?;

    match prompt.command {
        Some(PromptCommand::Kill { target }) => repl.kill(target),
        Some(PromptCommand::Death) => repl.death(),
        Some(PromptCommand::Identify { team }) => repl.identify(team),
        Some(PromptCommand::Map { id }) => repl.map(id),
        Some(PromptCommand::Join { account }) => repl.roster(&account, UserRole::Member),
        Some(PromptCommand::Leave { account }) => repl.roster(&account, UserRole::None),
        Some(PromptCommand::Tick) => repl.tick(),
        Some(PromptCommand::Status) => repl.status(),
        Some(PromptCommand::Save) => repl.save()?,
        Some(PromptCommand::Exit) => {
            repl.exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
