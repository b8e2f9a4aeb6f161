//! Placement of the active window from user expressions.
//!
//! A [`MoveResize`] holds up to four parsed expressions, one per dimension.
//! At execution time the runner supplies the window's frame rectangle, the
//! usable rectangle of the head that owns it and the frame extents, and
//! [`MoveResize::target`] turns the expressions into an absolute request.
//!
//! Expressions see coordinates relative to the usable area's top-left
//! corner.  Results for `x`/`y` are translated back to root coordinates;
//! results for `w`/`h` describe the frame and have the decorations
//! subtracted, because the move/resize request sizes the client area.

use crate::arith::{self, EvalError, Expr, GeometryContext, ParseError};
use crate::command::{split_param, CommandError};
use crate::config::Preset;
use crate::geometry::{FrameExtents, Rect};
use log::warn;
use std::collections::HashMap;
use std::fmt;

/// Errors while collecting `moveresize` parameters.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error(transparent)]
    Param(#[from] CommandError),
    #[error("moveresize: unrecognized parameter {0:?}")]
    UnrecognizedParameter(String),
    #[error("duplicate param {0}")]
    Duplicate(String),
    #[error("error parsing {name}={text:?}: {source}")]
    Parse {
        name: &'static str,
        text: String,
        source: ParseError,
    },
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
    #[error("preset {preset:?}: error parsing {name}={text:?}: {source}")]
    PresetParse {
        preset: String,
        name: &'static str,
        text: String,
        source: ParseError,
    },
    #[error("moveresize: nothing to do")]
    NothingToDo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dim {
    X,
    Y,
    W,
    H,
}

impl Dim {
    const ALL: [Dim; 4] = [Dim::X, Dim::Y, Dim::W, Dim::H];

    fn name(self) -> &'static str {
        match self {
            Dim::X => "x",
            Dim::Y => "y",
            Dim::W => "w",
            Dim::H => "h",
        }
    }

    fn from_name(name: &str) -> Option<Dim> {
        Dim::ALL.into_iter().find(|d| d.name() == name)
    }
}

/// Expressions for the dimensions the user asked to change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveResize {
    pub x: Option<Expr>,
    pub y: Option<Expr>,
    pub w: Option<Expr>,
    pub h: Option<Expr>,
}

impl MoveResize {
    /// Collect `name=expression` parameters.
    ///
    /// `preset=<name>` fills every dimension the other parameters leave
    /// unset from the named entry of `presets`.  Giving a dimension (or
    /// `preset`) twice is an error, and so is ending up with no dimension
    /// at all.
    pub fn from_params<S: AsRef<str>>(
        params: &[S],
        presets: &HashMap<String, Preset>,
    ) -> Result<Self, PlacementError> {
        let mut m = MoveResize::default();
        let mut preset = None;

        for arg in params {
            let (name, text) = split_param(arg.as_ref())?;
            if name == "preset" {
                if preset.is_some() {
                    return Err(PlacementError::Duplicate("preset".into()));
                }
                preset = Some(text.trim());
                continue;
            }
            let dim = Dim::from_name(name)
                .ok_or_else(|| PlacementError::UnrecognizedParameter(name.to_string()))?;
            let slot = m.slot_mut(dim);
            if slot.is_some() {
                return Err(PlacementError::Duplicate(dim.name().into()));
            }
            let expr = arith::parse(text).map_err(|source| PlacementError::Parse {
                name: dim.name(),
                text: text.to_string(),
                source,
            })?;
            *slot = Some(expr);
        }

        if let Some(preset_name) = preset {
            let p = presets
                .get(preset_name)
                .ok_or_else(|| PlacementError::UnknownPreset(preset_name.to_string()))?;
            m.fill_from_preset(preset_name, p)?;
        }

        if m.is_empty() {
            return Err(PlacementError::NothingToDo);
        }
        Ok(m)
    }

    fn fill_from_preset(&mut self, preset_name: &str, p: &Preset) -> Result<(), PlacementError> {
        for (dim, text) in [(Dim::X, &p.x), (Dim::Y, &p.y), (Dim::W, &p.w), (Dim::H, &p.h)] {
            let Some(text) = text else { continue };
            let slot = self.slot_mut(dim);
            if slot.is_some() {
                continue;
            }
            let expr = arith::parse(text).map_err(|source| PlacementError::PresetParse {
                preset: preset_name.to_string(),
                name: dim.name(),
                text: text.clone(),
                source,
            })?;
            *slot = Some(expr);
        }
        Ok(())
    }

    fn slot_mut(&mut self, dim: Dim) -> &mut Option<Expr> {
        match dim {
            Dim::X => &mut self.x,
            Dim::Y => &mut self.y,
            Dim::W => &mut self.w,
            Dim::H => &mut self.h,
        }
    }

    /// Whether no dimension is set.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.w.is_none() && self.h.is_none()
    }

    /// The snapshot expressions are evaluated against: `window` translated
    /// into `head`'s local coordinates, and `head`'s size as the screen.
    pub fn context(window: &Rect, head: &Rect) -> GeometryContext {
        GeometryContext {
            x: window.x - head.x,
            y: window.y - head.y,
            width: window.width,
            height: window.height,
            screen_width: head.width,
            screen_height: head.height,
        }
    }

    /// Evaluate the expressions and produce the move/resize request.
    ///
    /// Unset dimensions keep the window's current value.  The returned
    /// rectangle has `x`/`y` in root coordinates (frame top-left) and
    /// `width`/`height` of the client area.
    pub fn target(
        &self,
        window: &Rect,
        head: &Rect,
        extents: &FrameExtents,
    ) -> Result<Rect, EvalError> {
        let ctx = Self::context(window, head);
        let x = resolve(&self.x, &ctx, ctx.x)?.saturating_add(head.x);
        let y = resolve(&self.y, &ctx, ctx.y)?.saturating_add(head.y);
        let w = resolve(&self.w, &ctx, ctx.width)?.saturating_sub(extents.horizontal());
        let h = resolve(&self.h, &ctx, ctx.height)?.saturating_sub(extents.vertical());
        Ok(Rect::new(x, y, w, h))
    }
}

/// Evaluate `expr`, or fall back to `current` when it is unset.  Results
/// are truncated toward zero; infinities saturate.
fn resolve(expr: &Option<Expr>, ctx: &GeometryContext, current: i32) -> Result<i32, EvalError> {
    match expr {
        None => Ok(current),
        Some(e) => {
            let v = e.eval(ctx)?;
            if !v.is_finite() {
                warn!("{} evaluated to {}", e, v);
            }
            Ok(v as i32)
        }
    }
}

impl fmt::Display for MoveResize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (dim, expr) in [
            (Dim::X, &self.x),
            (Dim::Y, &self.y),
            (Dim::W, &self.w),
            (Dim::H, &self.h),
        ] {
            if let Some(e) = expr {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}={}", dim.name(), e)?;
                first = false;
            }
        }
        Ok(())
    }
}
