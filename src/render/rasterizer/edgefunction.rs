//! Edge function-based triangle rasterization.
//!
//! The algorithm tests each pixel center in the triangle's bounding box
//! against three edge equations to determine coverage.
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! This is the 2D cross product (B - A) × (P - A). With the triangle wound so
//! that its signed area is positive, interior points are positive for all
//! three edges.
//!
//! # Barycentric Coordinates
//!
//! The edge function values are proportional to barycentric coordinates:
//!
//! ```text
//! lambda_i = E_i(P) / area
//! ```
//!
//! Where E_i is the edge function for the edge opposite to vertex i.
//!
//! # Fill Rule
//!
//! A sample lying exactly on an edge belongs to the triangle only if that edge
//! is a top or left edge, so two triangles sharing an edge never both draw
//! (or both skip) the pixels along it.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::shader::PixelShader;
use crate::config::Interpolation;
use crate::projection::RasterVertex;
use crate::render::framebuffer::FrameBuffer;

/// Per-triangle switches for [`rasterize_with_shader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    pub interpolation: Interpolation,
    /// Leave a row as soon as a pixel fails coverage after one passed.
    pub span_early_exit: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::PerspectiveCorrect,
            span_early_exit: true,
        }
    }
}

/// Computes the edge function value for point P relative to edge (A -> B).
///
/// # Returns
///
/// - Positive: P is on the interior side of a positively wound edge
/// - Negative: P is on the other side
/// - Zero: P lies exactly on the edge AB
#[inline]
pub fn edge_function(a: &RasterVertex, b: &RasterVertex, p: &RasterVertex) -> f64 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// One edge equation `E(x, y) = step_x * x + step_y * y + offset`, walked
/// row by row.
///
/// The coefficients are computed from the endpoints in a fixed order and
/// negated when the edge runs the other way. An edge shared by two triangles
/// therefore evaluates to exactly opposite values in each, which is what makes
/// the top-left tie-break watertight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStepper {
    step_x: f64,
    step_y: f64,
    offset: f64,
    row: f64,
    top_left: bool,
}

impl EdgeStepper {
    /// Edge from `(ax, ay)` to `(bx, by)` of a triangle with positive signed
    /// area (raster space, y down).
    pub fn new(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        let swapped = (bx, by) < (ax, ay);
        let (lx, ly, hx, hy) = if swapped {
            (bx, by, ax, ay)
        } else {
            (ax, ay, bx, by)
        };

        let step_x = hy - ly;
        let step_y = lx - hx;
        let offset = -(lx * step_x) - ly * step_y;
        let sign = if swapped { -1.0 } else { 1.0 };

        let (dx, dy) = (bx - ax, by - ay);
        Self {
            step_x: step_x * sign,
            step_y: step_y * sign,
            offset: offset * sign,
            row: 0.0,
            // Top edge: horizontal, interior below. Left edge: going down.
            top_left: dy > 0.0 || (dy == 0.0 && dx < 0.0),
        }
    }

    /// Moves to the row whose samples sit at `py`.
    #[inline]
    pub fn start_row(&mut self, py: f64) {
        self.row = self.step_y * py + self.offset;
    }

    /// Edge value at column `px` of the current row.
    #[inline]
    pub fn value_at(&self, px: f64) -> f64 {
        self.step_x * px + self.row
    }

    /// Fill rule: strictly inside, or on a top/left edge.
    #[inline]
    pub fn covers(&self, value: f64) -> bool {
        value > 0.0 || (value == 0.0 && self.top_left)
    }

    pub fn is_top_left(&self) -> bool {
        self.top_left
    }
}

/// Depth and attribute weights at a covered pixel.
#[inline]
fn interpolate(
    lambda: [f64; 3],
    vertices: &[RasterVertex; 3],
    interpolation: Interpolation,
) -> Option<(f64, [f64; 3])> {
    match interpolation {
        Interpolation::PerspectiveCorrect => {
            // 1/w is linear in raster space; w itself is not
            let inv_depth = lambda[0] * vertices[0].inv_depth
                + lambda[1] * vertices[1].inv_depth
                + lambda[2] * vertices[2].inv_depth;
            if !(inv_depth > 0.0) {
                return None;
            }
            let depth = 1.0 / inv_depth;
            let weights = [
                lambda[0] * vertices[0].inv_depth * depth,
                lambda[1] * vertices[1].inv_depth * depth,
                lambda[2] * vertices[2].inv_depth * depth,
            ];
            Some((depth, weights))
        }
        Interpolation::Linear => {
            let depth = lambda[0] * vertices[0].depth
                + lambda[1] * vertices[1].depth
                + lambda[2] * vertices[2].depth;
            depth.is_finite().then_some((depth, lambda))
        }
    }
}

/// Rasterize a triangle using the provided pixel shader.
///
/// Handles bounding box clipping, winding normalization, the fill rule,
/// depth interpolation and the depth test. The shader is called for each
/// covered pixel with weights in the caller's vertex order.
///
/// Returns the number of pixels written.
pub fn rasterize_with_shader<S: PixelShader>(
    vertices: [RasterVertex; 3],
    buffer: &mut FrameBuffer,
    shader: &S,
    options: RasterOptions,
) -> usize {
    if !vertices
        .iter()
        .all(|v| v.x.is_finite() && v.y.is_finite())
    {
        return 0;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Step 1: Normalize winding so the signed area is positive
    // ─────────────────────────────────────────────────────────────────────
    let mut vertices = vertices;
    let mut area = edge_function(&vertices[0], &vertices[1], &vertices[2]);
    let flipped = area < 0.0;
    if flipped {
        vertices.swap(1, 2);
        area = -area;
    }
    if !(area > 0.0) {
        return 0; // Degenerate triangle
    }
    let inv_area = 1.0 / area;

    // ─────────────────────────────────────────────────────────────────────
    // Step 2: Compute bounding box, clipped to the framebuffer
    // ─────────────────────────────────────────────────────────────────────
    let [v0, v1, v2] = vertices;
    let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as u32;
    let max_x = v0.x.max(v1.x).max(v2.x).ceil().min(buffer.width() as f64) as u32;
    let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as u32;
    let max_y = v0.y.max(v1.y).max(v2.y).ceil().min(buffer.height() as f64) as u32;
    if min_x >= max_x || min_y >= max_y {
        return 0; // Off screen
    }

    // Edge opposite each vertex
    let mut e0 = EdgeStepper::new(v1.x, v1.y, v2.x, v2.y);
    let mut e1 = EdgeStepper::new(v2.x, v2.y, v0.x, v0.y);
    let mut e2 = EdgeStepper::new(v0.x, v0.y, v1.x, v1.y);

    // ─────────────────────────────────────────────────────────────────────
    // Step 3: Walk the box row by row, sampling at pixel centers
    // ─────────────────────────────────────────────────────────────────────
    let mut written = 0;
    for y in min_y..max_y {
        let py = y as f64 + 0.5;
        e0.start_row(py);
        e1.start_row(py);
        e2.start_row(py);

        let mut entered = false;
        for x in min_x..max_x {
            let px = x as f64 + 0.5;
            let w0 = e0.value_at(px);
            let w1 = e1.value_at(px);
            let w2 = e2.value_at(px);

            if !(e0.covers(w0) && e1.covers(w1) && e2.covers(w2)) {
                // A convex span is contiguous, nothing more on this row
                if entered && options.span_early_exit {
                    break;
                }
                continue;
            }
            entered = true;

            let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];
            let Some((depth, weights)) = interpolate(lambda, &vertices, options.interpolation)
            else {
                continue;
            };
            let weights = if flipped {
                [weights[0], weights[2], weights[1]]
            } else {
                weights
            };

            let Some(color) = shader.shade(weights) else {
                continue;
            };
            if buffer.test_and_set(x, y, depth, color) {
                written += 1;
            }
        }
    }

    written
}
