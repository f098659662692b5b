//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It takes
//! camera-space polygons one at a time and runs each through the pipeline:
//!
//! 1. Backface culling
//! 2. Lighting (flat or per vertex)
//! 3. Frustum clipping
//! 4. Fan triangulation
//! 5. Rasterization with depth testing
//!
//! A frame is bracketed by [`Engine::begin_frame`] and [`Engine::end_frame`];
//! the framebuffer returned by `end_frame` is the finished image.

use log::{debug, trace, warn};

use crate::clipper::Frustum;
use crate::colors::Color;
use crate::config::{Interpolation, RenderConfig};
use crate::error::RenderError;
use crate::light::PointLight;
use crate::polygon::{Polygon, Vertex};
use crate::projection::Projection;
use crate::render::{FrameBuffer, Rasterizer, ShadingMode, Triangle};
use crate::triangulate::triangulate;

/// Counters for the most recent frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub polygons_submitted: usize,
    /// Dropped by the backface test.
    pub polygons_culled: usize,
    /// Dropped before clipping: fewer than three vertices, or lighting could
    /// not be evaluated.
    pub polygons_rejected: usize,
    /// Entirely outside the frustum (or abandoned by the clipper).
    pub polygons_clipped_away: usize,
    pub triangles_rasterized: usize,
    pub pixels_written: usize,
}

impl FrameStats {
    /// Polygons that reached the rasterizer.
    pub fn polygons_drawn(&self) -> usize {
        self.polygons_submitted
            - self.polygons_culled
            - self.polygons_rejected
            - self.polygons_clipped_away
    }
}

pub struct Engine {
    config: RenderConfig,
    frustum: Frustum,
    rasterizer: Rasterizer,
    /// Box-filtered frame when supersampling.
    resolved: Option<FrameBuffer>,
    stats: FrameStats,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let projection = Self::internal_projection(&config)?;
        let mut rasterizer = Rasterizer::new(projection, config.background);
        rasterizer.set_interpolation(config.interpolation);
        rasterizer.set_span_early_exit(config.span_early_exit);

        Ok(Self {
            frustum: projection.frustum(),
            config,
            rasterizer,
            resolved: None,
            stats: FrameStats::default(),
        })
    }

    fn internal_projection(config: &RenderConfig) -> Result<Projection, RenderError> {
        let (width, height) = config.internal_size();
        Projection::new(config.near, config.far, config.fov_half, width, height)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Projection at the internal (possibly supersampled) resolution.
    pub fn projection(&self) -> &Projection {
        self.rasterizer.projection()
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Applies a new configuration, rebuilding the projection and frustum.
    /// On error the engine keeps its previous state.
    pub fn reconfigure(&mut self, config: RenderConfig) -> Result<(), RenderError> {
        config.validate()?;
        let projection = Self::internal_projection(&config)?;
        if projection != *self.rasterizer.projection() {
            self.rasterizer.set_projection(projection);
            self.frustum = projection.frustum();
        }
        self.rasterizer.framebuffer_mut().set_background(config.background);
        self.rasterizer.set_interpolation(config.interpolation);
        self.rasterizer.set_span_early_exit(config.span_early_exit);
        self.config = config;
        self.resolved = None;
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.reconfigure(RenderConfig {
            width,
            height,
            ..self.config
        })
    }

    pub fn set_clip_range(&mut self, near: f64, far: f64) -> Result<(), RenderError> {
        self.reconfigure(RenderConfig {
            near,
            far,
            ..self.config
        })
    }

    /// Sets half the horizontal field of view, in radians.
    pub fn set_fov_half(&mut self, fov_half: f64) -> Result<(), RenderError> {
        self.reconfigure(RenderConfig {
            fov_half,
            ..self.config
        })
    }

    pub fn set_supersample(&mut self, factor: u32) -> Result<(), RenderError> {
        self.reconfigure(RenderConfig {
            supersample: factor,
            ..self.config
        })
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.config.backface_culling = enabled;
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.config.interpolation = interpolation;
        self.rasterizer.set_interpolation(interpolation);
    }

    pub fn set_background(&mut self, background: Color) {
        self.config.background = background;
        self.rasterizer.framebuffer_mut().set_background(background);
    }

    /// Clears color and depth and resets the frame counters.
    pub fn begin_frame(&mut self) {
        self.rasterizer.clear();
        self.resolved = None;
        self.stats = FrameStats::default();
    }

    /// Runs one camera-space polygon through the pipeline.
    ///
    /// With no light the polygon is drawn in its base color. With a light it
    /// is Gouraud shaded when every vertex has a normal, flat shaded from the
    /// facet normal otherwise. The light position must be in camera space.
    pub fn submit(&mut self, polygon: &Polygon, light: Option<&PointLight>) {
        self.stats.polygons_submitted += 1;

        if polygon.vertices.len() < 3 {
            warn!(
                "ignoring polygon with {} vertices, at least 3 are required",
                polygon.vertices.len()
            );
            self.stats.polygons_rejected += 1;
            return;
        }

        if self.config.backface_culling && !polygon.double_sided && polygon.is_back_facing() {
            trace!("culled back-facing polygon at {:?}", polygon.vertices[0].position);
            self.stats.polygons_culled += 1;
            return;
        }

        let Some((vertices, color)) = Self::light_polygon(polygon, light) else {
            trace!("skipping polygon that cannot be lit");
            self.stats.polygons_rejected += 1;
            return;
        };

        let pieces = self.frustum.clip_polygon(&vertices);
        if pieces.is_empty() {
            trace!("polygon clipped away");
            self.stats.polygons_clipped_away += 1;
            return;
        }

        for piece in &pieces {
            for (a, b, c) in triangulate(piece) {
                let Some(triangle) = facet_triangle(&a, &b, &c, color) else {
                    trace!("skipping triangle with partial per-vertex shading");
                    continue;
                };
                self.stats.triangles_rasterized += 1;
                self.stats.pixels_written += self.rasterizer.draw(&triangle);
            }
        }
    }

    /// Evaluates the light once per facet.
    ///
    /// The returned vertices carry a shade only when the facet is Gouraud
    /// shaded; otherwise the returned color is final.
    fn light_polygon(
        polygon: &Polygon,
        light: Option<&PointLight>,
    ) -> Option<(Vec<Vertex>, Color)> {
        let unshaded = || {
            polygon
                .vertices
                .iter()
                .map(|v| Vertex { shade: None, ..*v })
                .collect::<Vec<_>>()
        };

        let Some(light) = light else {
            return Some((unshaded(), polygon.color));
        };

        if polygon.has_vertex_normals() {
            let vertices = polygon
                .vertices
                .iter()
                .map(|v| {
                    let normal = v.normal?;
                    let brightness = light.brightness(normal, v.position)?;
                    Some(v.with_shade(brightness))
                })
                .collect::<Option<Vec<_>>>()?;
            Some((vertices, polygon.color))
        } else {
            let brightness = light.brightness(polygon.normal, polygon.centroid())?;
            Some((unshaded(), polygon.color.shaded(brightness)))
        }
    }

    /// Finishes the frame and returns the image.
    ///
    /// When supersampling, the internal buffer is box-filtered down to the
    /// configured size here.
    pub fn end_frame(&mut self) -> &FrameBuffer {
        let s = &self.stats;
        debug!(
            "frame: {} polygons submitted, {} culled, {} rejected, {} clipped away, {} triangles, {} pixels",
            s.polygons_submitted,
            s.polygons_culled,
            s.polygons_rejected,
            s.polygons_clipped_away,
            s.triangles_rasterized,
            s.pixels_written
        );

        self.resolved = (self.config.supersample > 1)
            .then(|| self.rasterizer.framebuffer().downsample(self.config.supersample));
        self.framebuffer()
    }

    /// The most recently finished frame at the configured size.
    pub fn framebuffer(&self) -> &FrameBuffer {
        match &self.resolved {
            Some(resolved) => resolved,
            None => self.rasterizer.framebuffer(),
        }
    }

    /// Renders a whole frame in one call.
    pub fn render(&mut self, polygons: &[Polygon], light: Option<&PointLight>) -> &FrameBuffer {
        self.begin_frame();
        for polygon in polygons {
            self.submit(polygon, light);
        }
        self.end_frame()
    }
}

/// Builds the raster triangle for one piece of a facet. Shaded vertices
/// select per-vertex shading; a mix of shaded and unshaded vertices has no
/// consistent mode and yields `None`.
fn facet_triangle(a: &Vertex, b: &Vertex, c: &Vertex, color: Color) -> Option<Triangle> {
    let points = [a.position, b.position, c.position];
    let shading = match (a.shade, b.shade, c.shade) {
        (Some(s0), Some(s1), Some(s2)) => ShadingMode::PerVertex {
            base: color,
            brightness: [s0, s1, s2],
        },
        (None, None, None) => ShadingMode::Flat(color),
        _ => return None,
    };
    Some(Triangle::new(points, shading))
}
