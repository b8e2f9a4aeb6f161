//! **xwinctl**: move, resize and focus X11 windows from the command line.
//!
//! Window geometry is written as small prefix expressions over the active
//! window and the head it sits on, e.g. `x=(/ (- sw w) 2)` to center it
//! horizontally.  Expressions are evaluated relative to the usable area of
//! the head (space reserved by panels and docks removed), and the result is
//! sent to the running window manager as an EWMH request.
//!
//! # Architecture
//!
//! The crate is organised around one core trait:
//!
//! * [`traits::WindowManager`]: abstracts the queries and requests made to
//!   the windowing system so the placement logic is not coupled to X11.
//!
//! The pure pieces are [`arith`] (the expression language), [`geometry`]
//! (head resolution and struts) and [`placement`] (turning `name=expr`
//! parameters into a target rectangle).  [`runner`] ties them to a
//! `WindowManager`; the concrete X11 implementation lives in [`x11`].

pub mod arith;
pub mod command;
pub mod config;
pub mod geometry;
pub mod placement;
pub mod runner;
pub mod traits;
pub mod x11;
