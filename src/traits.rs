//! The seam between the placement logic and the windowing system.
//!
//! Everything in [`runner`](crate::runner) talks to a [`WindowManager`];
//! the X11 backend in [`x11`](crate::x11) is one implementation, the
//! recording mocks in the tests are others.

use crate::geometry::{FrameExtents, Rect, Strut};
use std::fmt;

/// Opaque window handle, as understood by the backend.
pub type WindowId = u32;

/// Window states that can be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowState {
    /// Maximized both vertically and horizontally.
    Maximized,
    Fullscreen,
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowState::Maximized => write!(f, "maximized"),
            WindowState::Fullscreen => write!(f, "fullscreen"),
        }
    }
}

/// Queries and requests a windowing environment must support.
///
/// Every call is synchronous and either returns a result or fails; callers
/// do not retry.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Geometry of the root window.  Strut insets are measured from its
    /// edges.
    fn root(&self) -> Result<Rect, Self::Error>;

    /// Display heads in the backend's order.
    fn heads(&self) -> Result<Vec<Rect>, Self::Error>;

    /// The currently focused window.
    fn active_window(&self) -> Result<WindowId, Self::Error>;

    /// Frame (decorated) rectangle of `window` in root coordinates.
    fn window_rect(&self, window: WindowId) -> Result<Rect, Self::Error>;

    /// Decoration insets around the client area of `window`.
    fn frame_extents(&self, window: WindowId) -> Result<FrameExtents, Self::Error>;

    /// Managed windows, in no particular order.
    fn client_list(&self) -> Result<Vec<WindowId>, Self::Error>;

    /// Managed windows in stacking order, bottom to top.
    fn client_list_stacking(&self) -> Result<Vec<WindowId>, Self::Error>;

    /// Title of `window`, or `None` if it has none.
    fn window_title(&self, window: WindowId) -> Result<Option<String>, Self::Error>;

    /// Space reserved by `window`, or `None` if it declares no strut.
    fn strut(&self, window: WindowId) -> Result<Option<Strut>, Self::Error>;

    /// Move the frame's top-left corner to `(rect.x, rect.y)` and resize the
    /// client area to `rect.width × rect.height`.
    fn move_resize(&self, window: WindowId, rect: Rect) -> Result<(), Self::Error>;

    /// Ask the window manager to focus and raise `window`.
    fn activate(&self, window: WindowId) -> Result<(), Self::Error>;

    /// Toggle `state` on `window`.
    fn toggle_state(&self, window: WindowId, state: WindowState) -> Result<(), Self::Error>;
}
