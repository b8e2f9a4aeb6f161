//! Executes [`Command`]s against a [`WindowManager`].
//!
//! [`Runner`] is generic over the backend, so the whole pipeline (resolve
//! the head, subtract struts, evaluate, emit) runs unchanged against the
//! recording mocks in the tests.

use crate::arith::EvalError;
use crate::command::{Command, CommandError, Direction, SwitchTarget};
use crate::config::{Config, ConfigError};
use crate::geometry::{self, Rect, ResolveError, Strut};
use crate::placement::{MoveResize, PlacementError};
use crate::traits::{WindowManager, WindowState};
use log::{debug, info};
use regex::Regex;

/// Possible errors while building or executing a command.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("focus: no window matched {0:?}")]
    NoMatch(String),
    #[error("bad head index {index} (have {count})")]
    BadHeadIndex { index: usize, count: usize },
}

/// Runs commands against a window manager.
pub struct Runner<W: WindowManager> {
    wm: W,
    honor_struts: bool,
}

impl<W: WindowManager> Runner<W> {
    pub fn new(wm: W, config: &Config) -> Self {
        Self {
            wm,
            honor_struts: config.placement.honor_struts,
        }
    }

    /// Return a shared reference to the underlying window manager.
    pub fn wm(&self) -> &W {
        &self.wm
    }

    /// Execute a single [`Command`].
    ///
    /// Every query happens before the one request that changes the window,
    /// so a failing command leaves the window untouched.
    pub fn handle(&self, cmd: Command) -> Result<(), RunError> {
        match cmd {
            Command::MoveResize(m) => self.move_resize(&m),
            Command::Focus(re) => self.focus(&re),
            Command::Toggle(state) => self.toggle(state),
            Command::Switch(target) => self.switch(target),
        }
    }

    fn move_resize(&self, m: &MoveResize) -> Result<(), RunError> {
        info!("moveresize {}", m);
        let window = self.wm.active_window().map_err(wm_err)?;
        let rect = self.wm.window_rect(window).map_err(wm_err)?;
        debug!("window {:#x} frame {}", window, rect);

        let head = self.owning_head(&rect)?;
        let extents = self.wm.frame_extents(window).map_err(wm_err)?;
        debug!("usable head {}, frame extents {:?}", head, extents);

        let target = m.target(&rect, &head, &extents)?;
        info!("moving {:#x} to {}", window, target);
        self.wm.move_resize(window, target).map_err(wm_err)
    }

    /// The usable rectangle of the head that owns `window`.
    ///
    /// The owner is decided on the physical heads; struts are subtracted
    /// afterwards.
    fn owning_head(&self, window: &Rect) -> Result<Rect, RunError> {
        let mut heads = self.wm.heads().map_err(wm_err)?;
        debug!("heads: {:?}", heads);
        let index = geometry::resolve_head(window, &heads)?;

        if self.honor_struts {
            let root = self.wm.root().map_err(wm_err)?;
            let struts = self.struts()?;
            geometry::apply_struts(&mut heads, &root, &struts);
        }
        Ok(heads[index])
    }

    /// Struts of every managed window.  Windows whose strut cannot be read
    /// are treated as declaring none.
    fn struts(&self) -> Result<Vec<Strut>, RunError> {
        let clients = self.wm.client_list().map_err(wm_err)?;
        let mut struts = Vec::new();
        for client in clients {
            match self.wm.strut(client) {
                Ok(Some(strut)) => {
                    debug!("window {:#x} reserves {:?}", client, strut);
                    struts.push(strut);
                }
                Ok(None) => {}
                Err(e) => debug!("skipping strut of {:#x}: {}", client, e),
            }
        }
        Ok(struts)
    }

    fn focus(&self, re: &Regex) -> Result<(), RunError> {
        let clients = self.wm.client_list_stacking().map_err(wm_err)?;
        // Stacking order is bottom to top; the topmost match wins.
        for &client in clients.iter().rev() {
            let title = match self.wm.window_title(client) {
                Ok(Some(title)) if !title.is_empty() => title,
                Ok(_) => continue,
                Err(e) => {
                    debug!("cannot read title of {:#x}: {}", client, e);
                    continue;
                }
            };
            if re.is_match(&title) {
                info!("focus: found match {:?}", title);
                return self.wm.activate(client).map_err(wm_err);
            }
        }
        Err(RunError::NoMatch(re.as_str().to_string()))
    }

    fn toggle(&self, state: WindowState) -> Result<(), RunError> {
        let window = self.wm.active_window().map_err(wm_err)?;
        info!("toggle {} on {:#x}", state, window);
        self.wm.toggle_state(window, state).map_err(wm_err)
    }

    fn switch(&self, target: SwitchTarget) -> Result<(), RunError> {
        let heads = self.wm.heads().map_err(wm_err)?;
        if heads.len() < 2 {
            debug!("switch: only {} head(s), nothing to do", heads.len());
            return Ok(());
        }

        let window = self.wm.active_window().map_err(wm_err)?;
        let rect = self.wm.window_rect(window).map_err(wm_err)?;
        let current = geometry::resolve_head(&rect, &heads)?;

        let index = match target {
            SwitchTarget::Head(index) => {
                if index >= heads.len() {
                    return Err(RunError::BadHeadIndex {
                        index,
                        count: heads.len(),
                    });
                }
                index
            }
            SwitchTarget::Dir(dir) => neighbour(current, heads.len(), dir),
        };
        if index == current {
            debug!("switch: window already on head {}", index);
            return Ok(());
        }

        let extents = self.wm.frame_extents(window).map_err(wm_err)?;
        let head = heads[index];
        let target = Rect::new(
            head.x + head.width / 2 - rect.width / 2,
            head.y + head.height / 2 - rect.height / 2,
            rect.width - extents.horizontal(),
            rect.height - extents.vertical(),
        );
        info!("switch {:#x} from head {} to head {}", window, current, index);
        self.wm.move_resize(window, target).map_err(wm_err)
    }
}

/// The head next to `current` in `dir`, wrapping around.
fn neighbour(current: usize, count: usize, dir: Direction) -> usize {
    match dir {
        Direction::Left => (current + count - 1) % count,
        Direction::Right => (current + 1) % count,
    }
}

/// Fold a backend error into [`RunError::WindowManager`].
pub fn wm_err<E: std::error::Error>(e: E) -> RunError {
    RunError::WindowManager(e.to_string())
}

//  Tests
