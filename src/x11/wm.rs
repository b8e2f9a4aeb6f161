//! [`WindowManager`] implementation backed by an X11 connection.
//!
//! Queries read EWMH properties (`_NET_ACTIVE_WINDOW`, `_NET_CLIENT_LIST`,
//! `_NET_FRAME_EXTENTS`, `_NET_WM_STRUT_PARTIAL`, ...) and heads come from
//! Xinerama.  Requests are client messages sent to the root window, so the
//! running window manager stays in charge of the actual move.

use crate::geometry::{self, FrameExtents, Rect, Strut};
use crate::traits::{WindowId, WindowManager, WindowState};
use log::debug;
use x11rb::connection::{Connection, RequestConnection};
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};
use x11rb::protocol::xinerama::{self, ConnectionExt as _};
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ClientMessageEvent, ConnectionExt as _, EventMask, Window,
};
use x11rb::rust_connection::RustConnection;

// EWMH atoms, interned once per connection.
x11rb::atom_manager! {
    pub Atoms: AtomsCookie {
        _NET_ACTIVE_WINDOW,
        _NET_CLIENT_LIST,
        _NET_CLIENT_LIST_STACKING,
        _NET_FRAME_EXTENTS,
        _NET_WM_NAME,
        _NET_WM_STRUT,
        _NET_WM_STRUT_PARTIAL,
        _NET_MOVERESIZE_WINDOW,
        _NET_WM_STATE,
        _NET_WM_STATE_MAXIMIZED_VERT,
        _NET_WM_STATE_MAXIMIZED_HORZ,
        _NET_WM_STATE_FULLSCREEN,
        UTF8_STRING,
    }
}

/// Longest property read, in 32-bit units.
const MAX_PROPERTY_LEN: u32 = 1024;

/// `_NET_MOVERESIZE_WINDOW` flags: north-west gravity, x/y/w/h present,
/// request from a pager.
const MOVERESIZE_FLAGS: u32 = 1 | 1 << 8 | 1 << 9 | 1 << 10 | 1 << 11 | 2 << 12;

/// Source indication for client messages: a pager or other direct user
/// action.
const SOURCE_PAGER: u32 = 2;

const NET_WM_STATE_TOGGLE: u32 = 2;

/// X11-backed window manager.
pub struct X11Wm {
    conn: RustConnection,
    root: Window,
    root_rect: Rect,
    atoms: Atoms,
}

/// Errors that can occur when talking to the X server.
#[derive(Debug, thiserror::Error)]
pub enum X11WmError {
    #[error("cannot connect to X server: {0}")]
    Connect(#[from] ConnectError),
    #[error("X connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("X request failed: {0}")]
    Reply(#[from] ReplyError),
    #[error("window {1:#x} has no usable {0} property")]
    MissingProperty(&'static str, Window),
}

impl X11Wm {
    /// Connect to the display named by `$DISPLAY` and intern the atoms.
    pub fn connect() -> Result<Self, X11WmError> {
        let (conn, screen_num) = x11rb::connect(None)?;
        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;
        let root_rect = Rect::new(
            0,
            0,
            i32::from(screen.width_in_pixels),
            i32::from(screen.height_in_pixels),
        );
        let atoms = Atoms::new(&conn)?.reply()?;
        debug!("connected to screen {} (root {:#x}, {})", screen_num, root, root_rect);
        Ok(Self {
            conn,
            root,
            root_rect,
            atoms,
        })
    }

    /// Read a 32-bit property.  A missing property or one of another format
    /// reads as empty.
    fn property32(
        &self,
        window: Window,
        property: Atom,
        type_: impl Into<Atom>,
    ) -> Result<Vec<u32>, X11WmError> {
        let reply = self
            .conn
            .get_property(false, window, property, type_, 0, MAX_PROPERTY_LEN)?
            .reply()?;
        Ok(reply.value32().map(|v| v.collect()).unwrap_or_default())
    }

    /// Read a text property as a (lossily decoded) string.
    fn text_property(
        &self,
        window: Window,
        property: impl Into<Atom>,
        type_: impl Into<Atom>,
    ) -> Result<Option<String>, X11WmError> {
        let reply = self
            .conn
            .get_property(false, window, property, type_, 0, MAX_PROPERTY_LEN)?
            .reply()?;
        if reply.value.is_empty() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&reply.value).into_owned()))
    }

    /// Send an EWMH client message about `window` to the root window.
    fn client_message(
        &self,
        window: Window,
        message: Atom,
        data: [u32; 5],
    ) -> Result<(), X11WmError> {
        let event = ClientMessageEvent::new(32, window, message, data);
        self.conn
            .send_event(
                false,
                self.root,
                EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
                event,
            )?
            .check()?;
        Ok(())
    }

    fn xinerama_heads(&self) -> Result<Option<Vec<Rect>>, X11WmError> {
        if self
            .conn
            .extension_information(xinerama::X11_EXTENSION_NAME)?
            .is_none()
        {
            debug!("xinerama extension not present");
            return Ok(None);
        }
        if self.conn.xinerama_is_active()?.reply()?.state == 0 {
            debug!("xinerama not active");
            return Ok(None);
        }
        let screens = self.conn.xinerama_query_screens()?.reply()?.screen_info;
        Ok(Some(
            screens
                .iter()
                .map(|s| {
                    Rect::new(
                        i32::from(s.x_org),
                        i32::from(s.y_org),
                        i32::from(s.width),
                        i32::from(s.height),
                    )
                })
                .collect(),
        ))
    }
}

impl WindowManager for X11Wm {
    type Error = X11WmError;

    fn root(&self) -> Result<Rect, Self::Error> {
        Ok(self.root_rect)
    }

    fn heads(&self) -> Result<Vec<Rect>, Self::Error> {
        match self.xinerama_heads()? {
            Some(heads) if !heads.is_empty() => Ok(geometry::physical_heads(heads)),
            _ => Ok(vec![self.root_rect]),
        }
    }

    fn active_window(&self) -> Result<WindowId, Self::Error> {
        let values = self.property32(self.root, self.atoms._NET_ACTIVE_WINDOW, AtomEnum::WINDOW)?;
        match values.first() {
            Some(&window) if window != x11rb::NONE => Ok(window),
            _ => Err(X11WmError::MissingProperty("_NET_ACTIVE_WINDOW", self.root)),
        }
    }

    fn window_rect(&self, window: WindowId) -> Result<Rect, Self::Error> {
        let geom = self.conn.get_geometry(window)?.reply()?;
        let origin = self
            .conn
            .translate_coordinates(window, self.root, 0, 0)?
            .reply()?;
        let client = Rect::new(
            i32::from(origin.dst_x),
            i32::from(origin.dst_y),
            i32::from(geom.width),
            i32::from(geom.height),
        );
        Ok(frame_rect(&client, &self.frame_extents(window)?))
    }

    fn frame_extents(&self, window: WindowId) -> Result<FrameExtents, Self::Error> {
        let values = self.property32(window, self.atoms._NET_FRAME_EXTENTS, AtomEnum::CARDINAL)?;
        Ok(frame_extents_from(&values))
    }

    fn client_list(&self) -> Result<Vec<WindowId>, Self::Error> {
        self.property32(self.root, self.atoms._NET_CLIENT_LIST, AtomEnum::WINDOW)
    }

    fn client_list_stacking(&self) -> Result<Vec<WindowId>, Self::Error> {
        self.property32(
            self.root,
            self.atoms._NET_CLIENT_LIST_STACKING,
            AtomEnum::WINDOW,
        )
    }

    fn window_title(&self, window: WindowId) -> Result<Option<String>, Self::Error> {
        if let Some(title) =
            self.text_property(window, self.atoms._NET_WM_NAME, self.atoms.UTF8_STRING)?
        {
            return Ok(Some(title));
        }
        self.text_property(window, AtomEnum::WM_NAME, AtomEnum::ANY)
    }

    fn strut(&self, window: WindowId) -> Result<Option<Strut>, Self::Error> {
        let partial =
            self.property32(window, self.atoms._NET_WM_STRUT_PARTIAL, AtomEnum::CARDINAL)?;
        if let Some(strut) = Strut::from_partial(&partial) {
            return Ok(Some(strut));
        }
        let legacy = self.property32(window, self.atoms._NET_WM_STRUT, AtomEnum::CARDINAL)?;
        Ok(Strut::from_legacy(&legacy))
    }

    fn move_resize(&self, window: WindowId, rect: Rect) -> Result<(), Self::Error> {
        self.client_message(window, self.atoms._NET_MOVERESIZE_WINDOW, moveresize_data(&rect))
    }

    fn activate(&self, window: WindowId) -> Result<(), Self::Error> {
        self.client_message(
            window,
            self.atoms._NET_ACTIVE_WINDOW,
            [SOURCE_PAGER, x11rb::CURRENT_TIME, 0, 0, 0],
        )
    }

    fn toggle_state(&self, window: WindowId, state: WindowState) -> Result<(), Self::Error> {
        let (first, second) = match state {
            WindowState::Maximized => (
                self.atoms._NET_WM_STATE_MAXIMIZED_VERT,
                self.atoms._NET_WM_STATE_MAXIMIZED_HORZ,
            ),
            WindowState::Fullscreen => (self.atoms._NET_WM_STATE_FULLSCREEN, x11rb::NONE),
        };
        self.client_message(
            window,
            self.atoms._NET_WM_STATE,
            [NET_WM_STATE_TOGGLE, first, second, SOURCE_PAGER, 0],
        )
    }
}

//  Pure helpers

/// Decode `_NET_FRAME_EXTENTS` (left, right, top, bottom).  Anything short
/// of four values means an undecorated window.
fn frame_extents_from(values: &[u32]) -> FrameExtents {
    let inset = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
    match *values {
        [left, right, top, bottom, ..] => FrameExtents {
            left: inset(left),
            right: inset(right),
            top: inset(top),
            bottom: inset(bottom),
        },
        _ => FrameExtents::default(),
    }
}

/// Grow a client rectangle by its decorations.
fn frame_rect(client: &Rect, extents: &FrameExtents) -> Rect {
    Rect::new(
        client.x.saturating_sub(extents.left),
        client.y.saturating_sub(extents.top),
        client.width.saturating_add(extents.horizontal()),
        client.height.saturating_add(extents.vertical()),
    )
}

/// Data words of a `_NET_MOVERESIZE_WINDOW` message.  Coordinates travel as
/// two's-complement cardinals; sizes are at least one pixel.
fn moveresize_data(rect: &Rect) -> [u32; 5] {
    [
        MOVERESIZE_FLAGS,
        rect.x as u32,
        rect.y as u32,
        rect.width.max(1) as u32,
        rect.height.max(1) as u32,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_extents_decoding() {
        assert_eq!(
            frame_extents_from(&[1, 2, 24, 3]),
            FrameExtents {
                left: 1,
                right: 2,
                top: 24,
                bottom: 3
            }
        );
        assert_eq!(frame_extents_from(&[]), FrameExtents::default());
        assert_eq!(frame_extents_from(&[1, 2]), FrameExtents::default());
    }

    #[test]
    fn frame_rect_grows_client() {
        let extents = FrameExtents {
            left: 2,
            right: 2,
            top: 20,
            bottom: 2,
        };
        assert_eq!(
            frame_rect(&Rect::new(102, 120, 796, 578), &extents),
            Rect::new(100, 100, 800, 600)
        );
    }

    #[test]
    fn moveresize_flags_request_all_fields() {
        // Gravity 1 (north-west), bits 8..=11 set, source 2 in bits 12..=15.
        assert_eq!(MOVERESIZE_FLAGS, 0x2f01);
    }

    #[test]
    fn moveresize_data_encodes_negative_origin_and_clamps_size() {
        let data = moveresize_data(&Rect::new(-10, 5, 0, -3));
        assert_eq!(data[0], MOVERESIZE_FLAGS);
        assert_eq!(data[1] as i32, -10);
        assert_eq!(data[2], 5);
        assert_eq!(data[3], 1);
        assert_eq!(data[4], 1);
    }
}
