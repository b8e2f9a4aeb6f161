//! Commands and the argument vocabulary shared by the CLI and the runner.
//!
//! Every command argument uses the `name=value` form (`x=(/ sw 2)`,
//! `match=firefox`, `dir=left`).  This module turns those raw tokens into a
//! [`Command`]; [`Runner`](crate::runner::Runner) executes it.

use crate::placement::MoveResize;
use crate::traits::WindowState;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Horizontal direction for switching heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Where `switch` should send the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchTarget {
    /// Absolute, 0-indexed head.
    Head(usize),
    /// Neighbouring head in list order, wrapping around.
    Dir(Direction),
}

/// Every action the tool can perform on the active window.
#[derive(Debug, Clone)]
pub enum Command {
    /// Evaluate placement expressions and move/resize the active window.
    MoveResize(MoveResize),
    /// Activate the topmost window whose title matches.
    Focus(Regex),
    /// Toggle a state (maximized, fullscreen) on the active window.
    Toggle(WindowState),
    /// Move the active window to another head.
    Switch(SwitchTarget),
}

/// Malformed command arguments.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("bad parameter: {0}")]
    BadParameter(String),
    #[error("{command}: unrecognized parameter {name:?}")]
    UnrecognizedParameter { command: &'static str, name: String },
    #[error("invalid match regexp: {0}")]
    BadRegex(#[from] regex::Error),
    #[error("cannot parse head number: {0}")]
    BadHeadNumber(String),
    #[error("bad direction: {0}")]
    BadDirection(String),
    #[error("toggle: unrecognized argument {0:?}")]
    BadToggle(String),
}

/// Split a `name=value` token.  The name is trimmed; the value is returned
/// as written.
pub fn split_param(arg: &str) -> Result<(&str, &str), CommandError> {
    arg.split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .ok_or_else(|| CommandError::BadParameter(arg.to_string()))
}

/// Parse a direction string (case-insensitive).
pub fn parse_direction(s: &str) -> Option<Direction> {
    match s.trim().to_lowercase().as_str() {
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

/// Parse the argument of `focus`: `match=REGEX`, matched case-insensitively.
pub fn parse_focus(arg: &str) -> Result<Regex, CommandError> {
    let (name, value) = split_param(arg)?;
    if name != "match" {
        return Err(CommandError::UnrecognizedParameter {
            command: "focus",
            name: name.to_string(),
        });
    }
    Ok(RegexBuilder::new(value).case_insensitive(true).build()?)
}

/// Parse the argument of `switch`: `head=N` or `dir=left|right`.
pub fn parse_switch(arg: &str) -> Result<SwitchTarget, CommandError> {
    let (name, value) = split_param(arg)?;
    match name {
        "head" => value
            .trim()
            .parse::<usize>()
            .map(SwitchTarget::Head)
            .map_err(|_| CommandError::BadHeadNumber(value.to_string())),
        "dir" => parse_direction(value)
            .map(SwitchTarget::Dir)
            .ok_or_else(|| CommandError::BadDirection(value.to_string())),
        _ => Err(CommandError::UnrecognizedParameter {
            command: "switch",
            name: name.to_string(),
        }),
    }
}

/// Parse the argument of `toggle`: `maximized` or `fullscreen`.
pub fn parse_toggle(arg: &str) -> Result<WindowState, CommandError> {
    match arg.trim() {
        "maximized" => Ok(WindowState::Maximized),
        "fullscreen" => Ok(WindowState::Fullscreen),
        other => Err(CommandError::BadToggle(other.to_string())),
    }
}
