//! X11-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`WindowManager`](crate::traits::WindowManager) trait, speaking EWMH to
//! the running window manager through `x11rb`.
//!
//! Nothing outside this module should reference X11 directly.

pub mod wm;
