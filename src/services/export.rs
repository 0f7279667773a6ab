//! Export service — rasterize the device screen region to a PNG.
//!
//! DESIGN
//! ======
//! Walks the component tree with the same vertical flow the HTML renderer
//! uses (fixed 375x812 content region, 16px insets, 16px gap) and composites
//! colored blocks per node: style background fills, embedded image payloads
//! decoded and scaled into place, neutral placeholders for remote images.
//! Decorative device chrome (notch, home indicator) is not part of the
//! exported region. Text glyphs are outside this boundary.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, Rgba, RgbaImage, imageops};

use crate::screen::{NodeKind, Screen, ScreenNode};
use crate::theme::{Theme, parse_hex_color};

/// Exported region size, matching the on-screen device frame.
pub const FRAME_WIDTH: u32 = 375;
pub const FRAME_HEIGHT: u32 = 812;

const INSET_X: u32 = 16;
const TOP_INSET: u32 = 40;
const GAP: u32 = 16;

/// Neutral fill for remote images and unstyled blocks.
const PLACEHOLDER_RGB: [u8; 3] = [148, 163, 184];

/// Errors from PNG export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("png encode failed: {0}")]
    Encode(String),
}

/// Download filename: `designflow-<screen-name>-<unix-ms>.png`. Screen names
/// are AI-generated; anything outside a safe ASCII subset is replaced so the
/// name survives a `Content-Disposition` header.
#[must_use]
pub fn export_filename(screen_name: &str) -> String {
    let safe: String = screen_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') { c } else { '-' })
        .collect();
    let safe = safe.trim_matches('-');
    let safe = if safe.is_empty() { "screen" } else { safe };
    let ms = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("designflow-{safe}-{ms}.png")
}

/// Rasterize the screen content region to PNG bytes.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if PNG encoding fails.
pub fn export_png(screen: &Screen, theme: Theme) -> Result<Vec<u8>, ExportError> {
    let background = parse_hex_color(&screen.background_color)
        .or_else(|| parse_hex_color(theme.palette().background))
        .unwrap_or([15, 23, 42]);
    let mut canvas = RgbaImage::from_pixel(
        FRAME_WIDTH,
        FRAME_HEIGHT,
        Rgba([background[0], background[1], background[2], 255]),
    );

    let mut y = TOP_INSET;
    let width = FRAME_WIDTH - 2 * INSET_X;
    for node in &screen.components {
        let height = draw_node(&mut canvas, node, INSET_X, y, width);
        y = y.saturating_add(height + GAP);
        if y >= FRAME_HEIGHT {
            break;
        }
    }

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(out)
}

/// Draw one node at (x, y) and return the vertical space it consumed.
fn draw_node(canvas: &mut RgbaImage, node: &ScreenNode, x: u32, y: u32, width: u32) -> u32 {
    let height = node_height(node);

    match &node.kind {
        NodeKind::Image => draw_image(canvas, node, x, y, width, height),
        NodeKind::Card if node.children.is_some() => {
            fill_rect(canvas, x, y, width, height, block_color(node));
            // Children flow inside the card with their own insets.
            let inner_x = x + 12;
            let inner_width = width.saturating_sub(24);
            let mut child_y = y + 12;
            for child in node.children.iter().flatten() {
                let consumed = draw_node(canvas, child, inner_x, child_y, inner_width);
                child_y += consumed + GAP;
            }
        }
        _ => fill_rect(canvas, x, y, width, height, block_color(node)),
    }

    height
}

/// Vertical space for a node: explicit style height wins, then a fixed
/// per-kind default mirroring the renderer's proportions.
fn node_height(node: &ScreenNode) -> u32 {
    if let Some(h) = node.style().get("height").and_then(parse_px) {
        return h.min(FRAME_HEIGHT);
    }
    match &node.kind {
        NodeKind::Navbar => 56,
        NodeKind::Header => 44,
        NodeKind::Text => 64,
        NodeKind::Button => 52,
        NodeKind::Input => 48,
        NodeKind::Image => 200,
        NodeKind::List => 140,
        NodeKind::Card => {
            let children: u32 = node
                .children
                .iter()
                .flatten()
                .map(|c| node_height(c) + GAP)
                .sum();
            if children == 0 { 120 } else { children + 24 }
        }
        NodeKind::Other(_) => 48,
    }
}

fn block_color(node: &ScreenNode) -> Rgba<u8> {
    let rgb = node
        .style()
        .background_color()
        .and_then(parse_hex_color)
        .unwrap_or(PLACEHOLDER_RGB);
    Rgba([rgb[0], rgb[1], rgb[2], 255])
}

fn draw_image(canvas: &mut RgbaImage, node: &ScreenNode, x: u32, y: u32, width: u32, height: u32) {
    if let Some(decoded) = node.src.as_deref().and_then(decode_inline_image) {
        let scaled = imageops::resize(&decoded, width.max(1), height.max(1), imageops::FilterType::Triangle);
        imageops::overlay(canvas, &scaled, i64::from(x), i64::from(y));
    } else {
        // Remote URL or no src: a neutral placeholder block.
        fill_rect(canvas, x, y, width, height, Rgba([PLACEHOLDER_RGB[0], PLACEHOLDER_RGB[1], PLACEHOLDER_RGB[2], 255]));
    }
}

/// Decode an inline `data:` image payload. Remote URLs return `None`.
fn decode_inline_image(src: &str) -> Option<RgbaImage> {
    if !src.starts_with("data:") {
        return None;
    }
    let payload = src.split_once(',')?.1;
    let bytes = BASE64.decode(payload.trim()).ok()?;
    Some(image::load_from_memory(&bytes).ok()?.to_rgba8())
}

/// Parse a `NNpx` (or bare numeric) CSS length.
fn parse_px(raw: &str) -> Option<u32> {
    raw.trim().trim_end_matches("px").trim().parse().ok()
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = (x + width).min(canvas.width());
    let y_end = (y + height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}
