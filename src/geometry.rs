//! Screen geometry: rectangles, display heads and reserved edges.
//!
//! All coordinates live in the root window's coordinate space.  A *head* is
//! one physical display; its rectangle is narrowed to the *usable* area by
//! subtracting the struts that docks and panels declare.

use std::fmt;

/// An axis-aligned rectangle.  The right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Center point, rounded toward zero.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether `(px, py)` lies inside the rectangle, counting all four
    /// edges as inside.
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        self.x <= px && px <= self.right() && self.y <= py && py <= self.bottom()
    }

    /// Whether `other` lies entirely within `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Decoration thickness the window manager adds around a client window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameExtents {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl FrameExtents {
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Space a window reserves along the root window's edges
/// (`_NET_WM_STRUT_PARTIAL`).
///
/// Each inset is measured from the matching root edge.  The start/end pair
/// limits which part of that edge is reserved; the end is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strut {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
    pub left_start_y: u32,
    pub left_end_y: u32,
    pub right_start_y: u32,
    pub right_end_y: u32,
    pub top_start_x: u32,
    pub top_end_x: u32,
    pub bottom_start_x: u32,
    pub bottom_end_x: u32,
}

impl Strut {
    /// Build from the twelve cardinals of `_NET_WM_STRUT_PARTIAL`.
    pub fn from_partial(values: &[u32]) -> Option<Self> {
        match *values {
            [left, right, top, bottom, left_start_y, left_end_y, right_start_y, right_end_y, top_start_x, top_end_x, bottom_start_x, bottom_end_x, ..] => {
                Some(Self {
                    left,
                    right,
                    top,
                    bottom,
                    left_start_y,
                    left_end_y,
                    right_start_y,
                    right_end_y,
                    top_start_x,
                    top_end_x,
                    bottom_start_x,
                    bottom_end_x,
                })
            }
            _ => None,
        }
    }

    /// Build from the four cardinals of the legacy `_NET_WM_STRUT`, which
    /// reserves whole edges.
    pub fn from_legacy(values: &[u32]) -> Option<Self> {
        match *values {
            [left, right, top, bottom, ..] => Some(Self {
                left,
                right,
                top,
                bottom,
                ..Self::default()
            }),
            _ => None,
        }
    }
}

/// Failure to map a window onto a display head.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no display heads available")]
    NoHeads,
    #[error("cannot locate head for window {0}")]
    NoHead(Rect),
}

/// Index of the head that owns `window`.
///
/// A single head is returned without looking at coordinates.  Otherwise the
/// first head containing the window's center point (edges inclusive) wins.
pub fn resolve_head(window: &Rect, heads: &[Rect]) -> Result<usize, ResolveError> {
    match heads.len() {
        0 => Err(ResolveError::NoHeads),
        1 => Ok(0),
        _ => {
            let (cx, cy) = window.center();
            heads
                .iter()
                .position(|head| head.contains_point(cx, cy))
                .ok_or(ResolveError::NoHead(*window))
        }
    }
}

/// Drop heads that are entirely covered by another head, as happens with
/// mirrored outputs.  Among identical heads the first one is kept.
pub fn physical_heads(heads: Vec<Rect>) -> Vec<Rect> {
    heads
        .iter()
        .enumerate()
        .filter(|(i, head)| {
            !heads.iter().enumerate().any(|(j, other)| {
                j != *i && other.contains_rect(head) && (other != *head || j < *i)
            })
        })
        .map(|(_, head)| *head)
        .collect()
}

/// Whether the strut span `[start, end]` touches `[lo, hi)`.  A `0..0` span
/// reserves the whole edge.
fn span_overlaps(lo: i32, hi: i32, start: u32, end: u32) -> bool {
    if start == 0 && end == 0 {
        return true;
    }
    i64::from(start) < i64::from(hi) && i64::from(end) >= i64::from(lo)
}

fn shifted(base: i32, delta: i64) -> i32 {
    (i64::from(base) + delta).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Shrink every head by the struts that reach into it.
///
/// `root` is the root window's rectangle; strut insets are measured from its
/// edges.  Whether a strut applies is decided against each head's original
/// rectangle and each edge only ever moves inward, so the outcome does not
/// depend on the order of `struts`.
pub fn apply_struts(heads: &mut [Rect], root: &Rect, struts: &[Strut]) {
    for head in heads.iter_mut() {
        let original = *head;
        let mut left = original.x;
        let mut right = original.right();
        let mut top = original.y;
        let mut bottom = original.bottom();

        for s in struts {
            if s.left > 0
                && span_overlaps(original.y, original.bottom(), s.left_start_y, s.left_end_y)
            {
                left = left.max(shifted(root.x, i64::from(s.left)));
            }
            if s.right > 0
                && span_overlaps(original.y, original.bottom(), s.right_start_y, s.right_end_y)
            {
                right = right.min(shifted(root.right(), -i64::from(s.right)));
            }
            if s.top > 0 && span_overlaps(original.x, original.right(), s.top_start_x, s.top_end_x)
            {
                top = top.max(shifted(root.y, i64::from(s.top)));
            }
            if s.bottom > 0
                && span_overlaps(original.x, original.right(), s.bottom_start_x, s.bottom_end_x)
            {
                bottom = bottom.min(shifted(root.bottom(), -i64::from(s.bottom)));
            }
        }

        // Edges never cross: a head swallowed by struts collapses to zero
        // size at its (clamped) top-left corner.
        let left = left.min(original.right());
        let top = top.min(original.bottom());
        *head = Rect::new(left, top, (right - left).max(0), (bottom - top).max(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_heads() -> Vec<Rect> {
        vec![Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 1920, 1080)]
    }

    fn root_of_two() -> Rect {
        Rect::new(0, 0, 3840, 1080)
    }

    //  resolve_head

    #[test]
    fn single_head_is_always_chosen() {
        let heads = vec![Rect::new(0, 0, 1920, 1080)];
        let far_away = Rect::new(-50_000, 90_000, 10, 10);
        assert_eq!(resolve_head(&far_away, &heads), Ok(0));
    }

    #[test]
    fn picks_head_containing_center() {
        let heads = two_heads();
        assert_eq!(resolve_head(&Rect::new(100, 100, 400, 300), &heads), Ok(0));
        assert_eq!(resolve_head(&Rect::new(2000, 100, 400, 300), &heads), Ok(1));
        // Mostly on the right head even though it starts on the left one.
        assert_eq!(resolve_head(&Rect::new(1800, 0, 800, 600), &heads), Ok(1));
    }

    #[test]
    fn center_on_shared_edge_goes_to_first_head() {
        let heads = two_heads();
        // Center x == 1920 lies on both heads' edges; inclusive edges mean the
        // first head in list order owns it.
        let window = Rect::new(1820, 100, 200, 200);
        assert_eq!(window.center(), (1920, 200));
        assert_eq!(resolve_head(&window, &heads), Ok(0));
    }

    #[test]
    fn center_on_far_edge_is_inside() {
        let heads = vec![Rect::new(0, 0, 100, 100), Rect::new(500, 500, 100, 100)];
        let window = Rect::new(90, 90, 20, 20);
        assert_eq!(window.center(), (100, 100));
        assert_eq!(resolve_head(&window, &heads), Ok(0));
    }

    #[test]
    fn center_rounds_toward_zero() {
        assert_eq!(Rect::new(0, 0, 5, 3).center(), (2, 1));
        assert_eq!(Rect::new(-10, -10, 5, 3).center(), (-8, -9));
    }

    #[test]
    fn uncovered_center_is_an_error() {
        let heads = vec![Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 1920, 1080)];
        let window = Rect::new(100, 2000, 200, 200);
        assert_eq!(
            resolve_head(&window, &heads),
            Err(ResolveError::NoHead(window))
        );
    }

    #[test]
    fn empty_head_list_is_an_error() {
        assert_eq!(
            resolve_head(&Rect::new(0, 0, 10, 10), &[]),
            Err(ResolveError::NoHeads)
        );
    }

    //  physical_heads

    #[test]
    fn mirrored_heads_are_collapsed() {
        let heads = vec![
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 0, 1280, 720),
            Rect::new(1920, 0, 1280, 1024),
        ];
        assert_eq!(
            physical_heads(heads),
            vec![Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 1280, 1024)]
        );
    }

    //  Strut parsing

    #[test]
    fn partial_strut_needs_twelve_values() {
        let values = [0, 0, 30, 0, 0, 0, 0, 0, 0, 1919, 0, 0];
        let strut = Strut::from_partial(&values).unwrap();
        assert_eq!(strut.top, 30);
        assert_eq!(strut.top_end_x, 1919);
        assert_eq!(Strut::from_partial(&values[..4]), None);
    }

    #[test]
    fn legacy_strut_reserves_whole_edges() {
        let strut = Strut::from_legacy(&[0, 0, 0, 40]).unwrap();
        assert_eq!(strut.bottom, 40);
        assert_eq!((strut.bottom_start_x, strut.bottom_end_x), (0, 0));
        assert_eq!(Strut::from_legacy(&[1, 2]), None);
    }

    //  apply_struts

    #[test]
    fn top_panel_shrinks_only_its_head() {
        let mut heads = two_heads();
        let panel = Strut {
            top: 30,
            top_start_x: 0,
            top_end_x: 1919,
            ..Strut::default()
        };
        apply_struts(&mut heads, &root_of_two(), &[panel]);
        assert_eq!(heads[0], Rect::new(0, 30, 1920, 1050));
        assert_eq!(heads[1], Rect::new(1920, 0, 1920, 1080));
    }

    #[test]
    fn whole_edge_strut_hits_every_head() {
        let mut heads = two_heads();
        let dock = Strut {
            bottom: 48,
            ..Strut::default()
        };
        apply_struts(&mut heads, &root_of_two(), &[dock]);
        assert_eq!(heads[0], Rect::new(0, 0, 1920, 1032));
        assert_eq!(heads[1], Rect::new(1920, 0, 1920, 1032));
    }

    #[test]
    fn side_struts_measure_from_root_edges() {
        let mut heads = two_heads();
        let struts = [
            Strut {
                left: 64,
                left_start_y: 0,
                left_end_y: 1079,
                ..Strut::default()
            },
            Strut {
                right: 100,
                right_start_y: 0,
                right_end_y: 1079,
                ..Strut::default()
            },
        ];
        apply_struts(&mut heads, &root_of_two(), &struts);
        assert_eq!(heads[0], Rect::new(64, 0, 1856, 1080));
        assert_eq!(heads[1], Rect::new(1920, 0, 1820, 1080));
    }

    #[test]
    fn span_outside_head_is_ignored() {
        let mut heads = vec![Rect::new(0, 0, 1920, 1080), Rect::new(0, 1080, 1920, 1080)];
        let root = Rect::new(0, 0, 1920, 2160);
        // Left panel only along the lower head.
        let strut = Strut {
            left: 50,
            left_start_y: 1080,
            left_end_y: 2159,
            ..Strut::default()
        };
        apply_struts(&mut heads, &root, &[strut]);
        assert_eq!(heads[0], Rect::new(0, 0, 1920, 1080));
        assert_eq!(heads[1], Rect::new(50, 1080, 1870, 1080));
    }

    #[test]
    fn struts_never_invert_a_head() {
        let mut heads = vec![Rect::new(0, 0, 100, 100)];
        let root = Rect::new(0, 0, 100, 100);
        let struts = [
            Strut {
                left: 80,
                ..Strut::default()
            },
            Strut {
                right: 50,
                ..Strut::default()
            },
            Strut {
                top: 500,
                ..Strut::default()
            },
        ];
        apply_struts(&mut heads, &root, &struts);
        assert_eq!(heads[0].width, 0);
        assert_eq!(heads[0].height, 0);
        assert!(heads[0].x >= 0 && heads[0].x <= 100);
        assert!(heads[0].y >= 0 && heads[0].y <= 100);
    }

    #[test]
    fn strut_order_does_not_matter() {
        let root = root_of_two();
        let struts = vec![
            Strut {
                top: 30,
                top_start_x: 0,
                top_end_x: 1919,
                ..Strut::default()
            },
            Strut {
                left: 80,
                ..Strut::default()
            },
            Strut {
                right: 1960,
                ..Strut::default()
            },
            Strut {
                bottom: 40,
                bottom_start_x: 1920,
                bottom_end_x: 3839,
                ..Strut::default()
            },
            Strut {
                top: 25,
                ..Strut::default()
            },
        ];

        let mut forward = two_heads();
        apply_struts(&mut forward, &root, &struts);

        let mut reversed_struts = struts.clone();
        reversed_struts.reverse();
        let mut backward = two_heads();
        apply_struts(&mut backward, &root, &reversed_struts);

        let mut rotated_struts = struts.clone();
        rotated_struts.rotate_left(2);
        let mut rotated = two_heads();
        apply_struts(&mut rotated, &root, &rotated_struts);

        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
        assert_eq!(forward[0], Rect::new(80, 30, 1800, 1050));
        assert_eq!(forward[1], Rect::new(1920, 25, 0, 1015));
    }
}
