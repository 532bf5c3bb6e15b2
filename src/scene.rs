//! Rendering a whole scene onto a raster.

use log::{debug, warn};

use textout_core::{DrawRequest, Point, Rect, Surface, TextOutFlags, ext_text_out};

use crate::config::{ConfigError, DrawConfig, SceneConfig, color_field};
use crate::raster::PixelSurface;

/// Result of rendering a scene.
#[derive(Debug)]
pub struct Rendered {
    pub surface: PixelSurface,
    /// Requests that drew successfully.
    pub drawn: usize,
    /// Requests that failed; each failure is logged.
    pub failed: usize,
}

fn request(draw: &DrawConfig) -> DrawRequest<'_> {
    let mut flags = TextOutFlags::empty();
    flags.set(TextOutFlags::OPAQUE, draw.opaque);
    flags.set(TextOutFlags::CLIPPED, draw.clipped);

    let mut req = DrawRequest::new(Point::new(draw.x, draw.y), &draw.text).with_flags(flags);
    if let Some([l, t, r, b]) = draw.rect {
        req = req.with_rect(Rect::new(l, t, r, b));
    }
    if let Some(advances) = &draw.advances {
        req = req.with_advances(advances);
    }
    req
}

/// Draw every request of `scene` in order through one device context.
///
/// Configuration errors abort the render. A failing request is logged and
/// skipped; state it changed before failing (fills, cursor) stays.
pub fn render(scene: &SceneConfig) -> Result<Rendered, ConfigError> {
    let font = scene.font.build()?;
    let mut dc = scene
        .context
        .build(scene.surface.width, scene.surface.height)?;
    let base_color = dc.text_color;
    let mut surface = PixelSurface::new(
        scene.surface.width,
        scene.surface.height,
        scene.surface_background()?,
    );
    surface.set_clip(dc.drawable_clip());

    let mut drawn = 0;
    let mut failed = 0;
    for (i, draw) in scene.draw.iter().enumerate() {
        dc.text_color = match &draw.color {
            Some(c) => color_field("draw.color", c)?,
            None => base_color,
        };
        match ext_text_out(&mut dc, &font, &mut surface, &request(draw)) {
            Ok(()) => drawn += 1,
            Err(e) => {
                warn!("scene: draw #{i} ({:?}) failed: {e}", draw.text);
                failed += 1;
            }
        }
    }

    debug!("scene: {drawn} drawn, {failed} failed");
    Ok(Rendered {
        surface,
        drawn,
        failed,
    })
}
