//! Entry point for the **xwinctl** command-line tool.
//!
//! Parses one subcommand, connects to the X server named by `$DISPLAY`,
//! executes the command against the active window and exits.  Any error is
//! logged and turns into exit status 1.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::{Path, PathBuf};
use xwinctl::command::{self, Command};
use xwinctl::config::Config;
use xwinctl::placement::MoveResize;
use xwinctl::runner::{self, RunError, Runner};
use xwinctl::traits::WindowState;
use xwinctl::x11::wm::X11Wm;

const EXPRESSION_HELP: &str = "\
Each PARAM is NAME=EXPR with NAME one of x, y, w, h, or preset=NAME to
start from a preset in the config file.  Dimensions not given keep their
current value.

EXPR is a number, an atom or a prefix call:
  atoms      x y w h     the window's frame, relative to its head
             sw sh       usable width and height of the head
  functions  (+ a b) (- a b) (* a b) (/ a b) (min a b ...) (max a b ...)

Examples:
  xwinctl moveresize x=0 y=0 'w=(/ sw 2)' h=sh
  xwinctl moveresize 'x=(/ (- sw w) 2)' 'y=(/ (- sh h) 2)'";

#[derive(Parser)]
#[command(
    name = "xwinctl",
    version,
    about = "Move, resize and focus X11 windows using geometry expressions"
)]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/xwinctl/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move and/or resize the active window
    #[command(after_help = EXPRESSION_HELP)]
    Moveresize {
        #[arg(value_name = "PARAM")]
        params: Vec<String>,
    },
    /// Activate the topmost window whose title matches (match=REGEX)
    Focus {
        #[arg(value_name = "match=REGEX")]
        param: String,
    },
    /// Toggle the maximized state of the active window
    Maximize,
    /// Toggle maximized or fullscreen on the active window
    Toggle {
        #[arg(value_name = "maximized|fullscreen")]
        state: String,
    },
    /// Move the active window to another head (head=N or dir=left|right)
    Switch {
        #[arg(value_name = "head=N|dir=DIR")]
        param: String,
    },
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/xwinctl`).
fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("xwinctl")
}

/// Load the config.  An explicit path must load; the default location
/// falls back to compiled-in defaults.
fn load_config(explicit: Option<&Path>) -> Result<Config, RunError> {
    if let Some(path) = explicit {
        let cfg = Config::load(path)?;
        info!("loaded config from {}", path.display());
        return Ok(cfg);
    }

    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            Ok(cfg)
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Ok(Config::default())
        }
    }
}

fn build_command(cmd: Commands, config: &Config) -> Result<Command, RunError> {
    Ok(match cmd {
        Commands::Moveresize { params } => {
            Command::MoveResize(MoveResize::from_params(params.as_slice(), &config.presets)?)
        }
        Commands::Focus { param } => Command::Focus(command::parse_focus(&param)?),
        Commands::Maximize => Command::Toggle(WindowState::Maximized),
        Commands::Toggle { state } => Command::Toggle(command::parse_toggle(&state)?),
        Commands::Switch { param } => Command::Switch(command::parse_switch(&param)?),
    })
}

fn run(cli: Cli) -> Result<(), RunError> {
    let config = load_config(cli.config.as_deref())?;
    // Arguments are validated before touching the display.
    let cmd = build_command(cli.command, &config)?;
    let wm = X11Wm::connect().map_err(runner::wm_err)?;
    Runner::new(wm, &config).handle(cmd)
}

//  Main

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}
