use fontdue::{Font, FontSettings};
use tiny_skia::{Color, FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};

use crate::{PackedBitmap, RasterError};

/// DejaVu Sans, embedded so text renders the same on every host.
pub static BUNDLED_FONT: &[u8] = include_bytes!("../../fonts/DejaVuSans/DejaVuSans.ttf");

/// Blank units kept on each side of the text so descenders and
/// antialiasing fringe are not clipped.
const MARGIN: u32 = 1;

/// Largest glyph size rendered, in canvas units after oversampling.
pub const MAX_RENDER_PX: u32 = 8192;

/// Luminance below which a canvas pixel counts as ink.
const INK_THRESHOLD: u32 = 128;

/// Render resolution relative to the print resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Oversample {
    #[default]
    Single,
    /// Render at twice the size and filter down, smoother small glyphs.
    Double,
}

impl Oversample {
    fn factor(self) -> u32 {
        match self {
            Oversample::Single => 1,
            Oversample::Double => 2,
        }
    }
}

/// Size of a rendered text bitmap in print dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    pub width_dots: u32,
    pub height_dots: u32,
}

pub(crate) trait Drawable {
    fn draw(&self, target: &mut Pixmap, transform: Transform) -> Result<(), RasterError>;
}

#[derive(Clone, PartialEq)]
struct Glyph {
    x: i32,
    y: i32,
    width: usize,
    height: usize,
    quality: FilterQuality,
    bitmap: Vec<u8>,
}

impl Glyph {
    /// transform coverage to black rgba with coverage as alpha
    fn to_rbga(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.width * self.height * 4);
        for &alpha in &self.bitmap {
            buf.extend_from_slice(&[0, 0, 0, alpha]);
        }
        buf
    }

    fn to_pixmap(&self) -> Result<Pixmap, RasterError> {
        let (w, h) = (self.width as u32, self.height as u32);
        let canvas_error = RasterError::Canvas {
            width: w,
            height: h,
        };
        let size = IntSize::from_wh(w, h).ok_or(canvas_error.clone())?;
        Pixmap::from_vec(self.to_rbga(), size).ok_or(canvas_error)
    }
}

impl Drawable for Glyph {
    fn draw(&self, target: &mut Pixmap, transform: Transform) -> Result<(), RasterError> {
        if self.height > 0 && self.width > 0 {
            let glyph_pixmap = self.to_pixmap()?;
            let paint = PixmapPaint {
                quality: self.quality,
                ..PixmapPaint::default()
            };
            target.draw_pixmap(self.x, self.y, glyph_pixmap.as_ref(), &paint, transform, None);
        }
        Ok(())
    }
}

/// Where one glyph's coverage box sits. `x` is from the line start, `y`
/// from the baseline, both in unstretched canvas units.
#[derive(Debug, Clone, Copy)]
struct Placement {
    ch: char,
    x: i32,
    y: i32,
    width: usize,
    height: usize,
}

/// One laid out line, sized from glyph metrics alone.
struct Line {
    placements: Vec<Placement>,
    /// Horizontal span covering both the advance and every glyph's ink.
    left: i32,
    right: i32,
    /// Vertical span relative to the baseline, negative is above.
    top: i32,
    bottom: i32,
}

impl Line {
    fn canvas_size(&self, stretch: f32, margin: u32) -> (u32, u32) {
        let span = (self.right - self.left) as f32 * stretch;
        let width = (span.ceil().max(0.) as u32).saturating_add(2 * margin);
        let height = ((self.bottom - self.top).max(1) as u32).saturating_add(2 * margin);
        (width, height)
    }
}

/// Renders text into packed 1-bit bitmaps for embedding in a label.
#[derive(Clone)]
pub struct TextRasterizer {
    font: Font,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer").finish_non_exhaustive()
    }
}

impl TextRasterizer {
    pub fn from_bytes(font_data: &[u8]) -> Result<Self, RasterError> {
        let font =
            Font::from_bytes(font_data, FontSettings::default()).map_err(RasterError::FontLoad)?;
        Ok(Self { font })
    }

    pub fn bundled() -> Result<Self, RasterError> {
        Self::from_bytes(BUNDLED_FONT)
    }

    /// Single line layout. Leading between lines does not apply.
    fn layout(&self, text: &str, px: f32) -> Line {
        let (ascent, descent) = self
            .font
            .horizontal_line_metrics(px)
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((px * 0.8, -px * 0.2));

        let mut placements = Vec::with_capacity(text.len());
        let mut pen = 0f32;
        let mut previous = None;
        let mut left = 0;
        let mut right = 0;
        let mut top = -ascent.ceil() as i32;
        let mut bottom = -descent.floor() as i32;
        for ch in text.chars() {
            if let Some(prev) = previous {
                pen += self.font.horizontal_kern(prev, ch, px).unwrap_or(0.);
            }
            let metrics = self.font.metrics(ch, px);
            let placement = Placement {
                ch,
                x: (pen + metrics.xmin as f32).round() as i32,
                // ymin is the bottom edge above the baseline
                y: -(metrics.height as i32 + metrics.ymin),
                width: metrics.width,
                height: metrics.height,
            };
            if placement.width > 0 && placement.height > 0 {
                left = left.min(placement.x);
                right = right.max(placement.x + placement.width as i32);
                top = top.min(placement.y);
                bottom = bottom.max(placement.y + placement.height as i32);
            }
            placements.push(placement);
            pen += metrics.advance_width;
            previous = Some(ch);
        }

        Line {
            placements,
            left,
            right: right.max(pen.ceil() as i32),
            top,
            bottom,
        }
    }

    /// Size [`TextRasterizer::rasterize`] produces at single resolution.
    /// Uses glyph metrics only, nothing is rendered.
    pub fn measure(&self, text: &str, height_dots: u32, width_dots: u32) -> TextExtent {
        let (height_dots, stretch) = normalize(height_dots, width_dots);
        let line = self.layout(text, height_dots as f32);
        let (width, height) = line.canvas_size(stretch, MARGIN);
        TextExtent {
            width_dots: width,
            height_dots: height,
        }
    }

    /// Renders `text` black on white at a nominal height of `height_dots`,
    /// stretched horizontally by `width_dots / height_dots`, and thresholds
    /// the result into a packed bitmap. No dithering. One canvas unit is
    /// one print dot, so the bitmap embeds without rescaling.
    pub fn rasterize(
        &self,
        text: &str,
        height_dots: u32,
        width_dots: u32,
        oversample: Oversample,
    ) -> Result<PackedBitmap, RasterError> {
        let scale = oversample.factor();
        let (height_dots, stretch) = normalize(height_dots, width_dots);
        let px = height_dots
            .checked_mul(scale)
            .filter(|px| *px <= MAX_RENDER_PX)
            .ok_or(RasterError::TextTooLarge(height_dots))?;
        let quality = match stretch == 1. {
            true => FilterQuality::Nearest,
            false => FilterQuality::Bilinear,
        };

        let line = self.layout(text, px as f32);
        let margin = MARGIN * scale;
        let (width, height) = line.canvas_size(stretch, margin);
        let mut canvas =
            Pixmap::new(width, height).ok_or(RasterError::Canvas { width, height })?;
        canvas.fill(Color::WHITE);

        let baseline = margin as i32 - line.top;
        let transform = Transform::from_scale(stretch, 1.).post_translate(margin as f32, 0.);
        for placement in &line.placements {
            if placement.width == 0 || placement.height == 0 {
                continue;
            }
            let (_, bitmap) = self.font.rasterize(placement.ch, px as f32);
            let glyph = Glyph {
                x: placement.x - line.left,
                y: baseline + placement.y,
                width: placement.width,
                height: placement.height,
                quality,
                bitmap,
            };
            glyph.draw(&mut canvas, transform)?;
        }

        let canvas = match oversample {
            Oversample::Single => canvas,
            Oversample::Double => downsample(&canvas, scale)?,
        };
        log::trace!(
            "rasterized {text:?} at {height_dots} dots into {}x{}",
            canvas.width(),
            canvas.height()
        );
        Ok(threshold(&canvas))
    }
}

fn normalize(height_dots: u32, width_dots: u32) -> (u32, f32) {
    let height_dots = height_dots.max(1);
    let width_dots = width_dots.max(1);
    (height_dots, width_dots as f32 / height_dots as f32)
}

fn downsample(canvas: &Pixmap, factor: u32) -> Result<Pixmap, RasterError> {
    let width = canvas.width().div_ceil(factor);
    let height = canvas.height().div_ceil(factor);
    let mut small = Pixmap::new(width, height).ok_or(RasterError::Canvas { width, height })?;
    small.fill(Color::WHITE);
    let paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    let scale = 1. / factor as f32;
    small.draw_pixmap(0, 0, canvas.as_ref(), &paint, Transform::from_scale(scale, scale), None);
    Ok(small)
}

fn threshold(canvas: &Pixmap) -> PackedBitmap {
    let width = canvas.width() as usize;
    let height = canvas.height() as usize;
    let pixels = canvas.pixels();
    PackedBitmap::from_fn(width, height, |x, y| {
        let p = pixels[y * width + x];
        (p.red() as u32 + p.green() as u32 + p.blue() as u32) / 3 < INK_THRESHOLD
    })
}
