//! Deterministic QR code rendering to a self-contained SVG document.
//!
//! Rendering is a pure function of the payload, the caption, and the
//! configured geometry: no I/O, no randomness, byte-identical output for
//! identical inputs. The matrix itself comes from the `qrcode` crate at
//! error-correction level H (~30% recovery), which leaves enough redundancy
//! for the caption box to occlude a small band of modules in the middle of
//! the image while the code stays scannable.

use std::fmt::Write as _;

use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;

/// Fraction of an em a typical glyph occupies. Width estimation is
/// deliberately approximate to avoid a text-measurement dependency.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Fraction of the image side the caption may span.
const MAX_CAPTION_RATIO: f32 = 0.6;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload does not fit the matrix-code capacity at level H.
    #[error("matrix code encoding failed: {0:?}")]
    EncodingFailed(qrcode::types::QrError),
}

/// Geometry and typography constants for the rendered image.
///
/// Injectable so tests can exercise edge values directly; the defaults are
/// the production values.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Side of one matrix module in pixels.
    pub cell_size_px: u32,
    /// Quiet-zone width on each side, in modules.
    pub margin_cells: u32,
    /// Caption font size before any shrinking.
    pub base_font_px: u32,
    /// Lower bound the caption font is never shrunk below.
    pub min_font_px: u32,
    /// Horizontal padding on each side of the caption box.
    pub caption_padding_px: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size_px: 10,
            margin_cells: 4,
            base_font_px: 32,
            min_font_px: 12,
            caption_padding_px: 4,
        }
    }
}

/// A rendered matrix image with its fitted caption.
///
/// Derived, never persisted: regenerated per request from the payload and
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeImage {
    /// Side of the square module grid.
    pub matrix_size: usize,
    pub cell_size_px: u32,
    pub margin_cells: u32,
    /// Row-major module grid; `true` is a dark cell.
    pub modules: Vec<Vec<bool>>,
    pub caption_text: String,
    /// Font size after adaptive fitting.
    pub caption_font_px: u32,
    pub caption_padding_px: u32,
}

impl CodeImage {
    /// Total image side in pixels, including the quiet zone.
    pub fn side_px(&self) -> u32 {
        (self.matrix_size as u32 + 2 * self.margin_cells) * self.cell_size_px
    }

    /// Estimated caption box size `(width, height)` at the fitted font.
    ///
    /// This is the single-pass recomputation of the width estimate: if the
    /// caption still overflows at the minimum font size, the box is allowed
    /// to visually overflow rather than treated as an error.
    pub fn caption_box(&self) -> (f32, f32) {
        let width = caption_width_estimate(
            self.caption_text.chars().count(),
            self.caption_font_px,
            self.caption_padding_px,
        );
        let height = (self.caption_font_px + 2 * self.caption_padding_px) as f32;
        (width, height)
    }

    /// Serializes the image to a complete SVG document.
    ///
    /// White background, all dark modules combined into a single black path,
    /// a white rectangle under the caption occluding the modules beneath it,
    /// and the caption centered in the image. Absolute pixel coordinates, no
    /// external resource references.
    pub fn to_svg(&self) -> String {
        let side = self.side_px();
        let cell = self.cell_size_px;
        let margin = self.margin_cells;

        let mut path = String::new();
        for (r, row) in self.modules.iter().enumerate() {
            for (c, &dark) in row.iter().enumerate() {
                if dark {
                    let x = (c as u32 + margin) * cell;
                    let y = (r as u32 + margin) * cell;
                    let _ = write!(path, "M{x} {y}h{cell}v{cell}h-{cell}z");
                }
            }
        }

        let (box_w, box_h) = self.caption_box();
        let box_x = (side as f32 - box_w) / 2.0;
        let box_y = (side as f32 - box_h) / 2.0;
        let center = side as f32 / 2.0;

        let mut svg = String::new();
        let _ = write!(
            svg,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{side}" height="{side}" "#,
                r#"viewBox="0 0 {side} {side}">"#
            ),
            side = side
        );
        let _ = write!(svg, r##"<rect width="{side}" height="{side}" fill="#ffffff"/>"##);
        let _ = write!(svg, r##"<path d="{path}" fill="#000000"/>"##);
        let _ = write!(
            svg,
            r##"<rect x="{box_x:.1}" y="{box_y:.1}" width="{box_w:.1}" height="{box_h:.1}" fill="#ffffff"/>"##
        );
        let _ = write!(
            svg,
            concat!(
                r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" dominant-baseline="central" "##,
                r##"font-family="monospace" font-size="{font}" fill="#000000">{text}</text>"##
            ),
            x = center,
            y = center,
            font = self.caption_font_px,
            text = escape_xml(&self.caption_text),
        );
        svg.push_str("</svg>");
        svg
    }
}

/// Estimated pixel width of `chars` glyphs at `font_px` plus padding.
fn caption_width_estimate(chars: usize, font_px: u32, padding_px: u32) -> f32 {
    chars as f32 * font_px as f32 * GLYPH_WIDTH_RATIO + 2.0 * padding_px as f32
}

/// Escapes the XML special characters that can appear in a URL caption.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Pure, stateless QR code renderer.
#[derive(Debug, Clone, Default)]
pub struct CodeImageRenderer {
    config: RenderConfig,
}

impl CodeImageRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Renders `payload` as a matrix code with `caption` fitted beneath the
    /// center of the image.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::EncodingFailed`] when the payload exceeds the
    /// matrix-code capacity at error-correction level H. No retry is
    /// attempted.
    pub fn render(&self, payload: &str, caption: &str) -> Result<CodeImage, RenderError> {
        let code = QrCode::with_error_correction_level(payload, EcLevel::H)
            .map_err(RenderError::EncodingFailed)?;

        let size = code.width();
        let colors = code.to_colors();
        let modules: Vec<Vec<bool>> = colors
            .chunks(size)
            .map(|row| row.iter().map(|&c| c == Color::Dark).collect())
            .collect();

        let cfg = self.config;
        let image_side_px = (size as u32 + 2 * cfg.margin_cells) * cfg.cell_size_px;
        let caption_font_px = self.fit_caption(caption.chars().count(), image_side_px);

        Ok(CodeImage {
            matrix_size: size,
            cell_size_px: cfg.cell_size_px,
            margin_cells: cfg.margin_cells,
            modules,
            caption_text: caption.to_string(),
            caption_font_px,
            caption_padding_px: cfg.caption_padding_px,
        })
    }

    /// Fits the caption font to the image width.
    ///
    /// Starts at the base size; when the width estimate exceeds the allowed
    /// fraction of the image side, scales the font by `max / estimate`,
    /// floors to an integer, and clamps to the minimum. This is a single-pass
    /// correction, not iterative convergence: a caption that still overflows
    /// at the floor is rendered as-is.
    fn fit_caption(&self, caption_chars: usize, image_side_px: u32) -> u32 {
        let cfg = self.config;
        let max_width = MAX_CAPTION_RATIO * image_side_px as f32;
        let estimate =
            caption_width_estimate(caption_chars, cfg.base_font_px, cfg.caption_padding_px);

        if estimate <= max_width {
            return cfg.base_font_px;
        }

        let scaled = (cfg.base_font_px as f32 * max_width / estimate).floor() as u32;
        scaled.max(cfg.min_font_px)
    }
}
