use std::ops::Index;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::GradientError;

/// Highest table index. A gradient holds `RESOLUTION + 1` colors.
pub const RESOLUTION: usize = 255;

/// A color pinned to a normalized position on the gradient axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub color: Color,
    pub position: f64,
}

impl ControlPoint {
    pub fn new(color: Color, position: f64) -> Self {
        Self { color, position }
    }

    /// Table index this point lands on: `floor(position * RESOLUTION)`.
    /// May lie outside the table for positions outside [0, 1], so it is kept
    /// as a float rather than narrowed to an integer type.
    fn resolve_index(&self, index: usize) -> Result<f64, GradientError> {
        if !self.position.is_finite() {
            return Err(GradientError::PositionOrdering {
                index,
                position: self.position,
            });
        }
        Ok((self.position * RESOLUTION as f64)
            .floor()
            .clamp(f64::MIN, f64::MAX))
    }
}

impl From<(Color, f64)> for ControlPoint {
    fn from((color, position): (Color, f64)) -> Self {
        Self::new(color, position)
    }
}

#[derive(Clone, Copy, Debug)]
struct Anchor {
    color: Color,
    index: f64,
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    from: Anchor,
    to: Anchor,
}

impl Segment {
    /// Color at scan `position`. The table scan only calls this with
    /// `from.index < position <= to.index`, so a zero-length segment is never
    /// reached from `Gradient::new`; called directly it yields `to`.
    fn color_at(&self, position: f64) -> Color {
        let len = self.to.index - self.from.index;
        if len <= 0.0 {
            // Both ends share an index: switch straight to the later color.
            return self.to.color;
        }
        let d = (position - self.from.index) / len;
        self.from.color.lerp(&self.to.color, d)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scan {
    BeforeFirst,
    Interpolating,
    AfterLast,
}

/// Immutable lookup table of `RESOLUTION + 1` colors built from control points.
#[derive(Clone, Debug)]
pub struct Gradient {
    colors: Vec<Color>,
}

impl Gradient {
    /// Builds the table by walking indices `0..=RESOLUTION` once.
    ///
    /// Indices up to the first point take its color, indices past the last
    /// point take the last color, and everything in between is interpolated
    /// linearly between consecutive points. A single point fills the whole
    /// table.
    pub fn new(points: &[ControlPoint]) -> Result<Self, GradientError> {
        let first = points.first().ok_or(GradientError::Empty)?;

        let anchors = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Ok(Anchor {
                    color: p.color,
                    index: p.resolve_index(i)?,
                })
            })
            .collect::<Result<Vec<_>, GradientError>>()?;
        debug!(
            "building gradient from {} control points at indices {:?}",
            anchors.len(),
            anchors.iter().map(|a| a.index).collect::<Vec<_>>()
        );

        let segments: Vec<Segment> = match anchors.as_slice() {
            [only] => vec![Segment {
                from: *only,
                to: *only,
            }],
            _ => anchors
                .windows(2)
                .map(|w| Segment {
                    from: w[0],
                    to: w[1],
                })
                .collect(),
        };

        let mut remaining = segments.into_iter();
        let mut segment = remaining.next().ok_or(GradientError::PositionOrdering {
            index: 0,
            position: first.position,
        })?;
        let mut scan = Scan::BeforeFirst;
        let mut colors = Vec::with_capacity(RESOLUTION + 1);

        for position in (0..=RESOLUTION).map(|i| i as f64) {
            if scan == Scan::BeforeFirst && segment.from.index < position {
                trace!("leaving flat head at index {position}");
                scan = Scan::Interpolating;
            }
            if scan == Scan::Interpolating {
                while segment.to.index < position {
                    match remaining.next() {
                        Some(next) => {
                            trace!(
                                "segment {}..{} starts at index {position}",
                                next.from.index, next.to.index
                            );
                            segment = next;
                        }
                        None => {
                            trace!("entering flat tail at index {position}");
                            scan = Scan::AfterLast;
                            break;
                        }
                    }
                }
            }

            colors.push(match scan {
                Scan::BeforeFirst => segment.from.color,
                Scan::Interpolating => segment.color_at(position),
                Scan::AfterLast => segment.to.color,
            });
        }

        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Color for a luminance in [0, 1]; out of range values are clamped.
    pub fn at(&self, luminance: f64) -> Color {
        crate::lookup::lookup(self, luminance)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }
}

impl Index<usize> for Gradient {
    type Output = Color;

    fn index(&self, index: usize) -> &Color {
        &self.colors[index]
    }
}

impl<'a> IntoIterator for &'a Gradient {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<&[ControlPoint]> for Gradient {
    type Error = GradientError;

    fn try_from(points: &[ControlPoint]) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl<const N: usize> TryFrom<[ControlPoint; N]> for Gradient {
    type Error = GradientError;

    fn try_from(points: [ControlPoint; N]) -> Result<Self, Self::Error> {
        Self::new(&points)
    }
}
