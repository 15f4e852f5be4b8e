//! Multi-format export pipeline.
//!
//! Vector export is always available; PNG and PDF live behind the `raster`
//! feature. Every path starts from the displayed document's styled SVG,
//! forces explicit output dimensions onto a working copy, and derives the
//! artifact filename from the effective pixel dimensions.

use selkie_core::sanitize::EffectiveStyle;
use selkie_core::style::clamp;
use selkie_style::{Element, Node, ParseError, SvgDocument};

use crate::render::RenderedDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `.svg`, `image/svg+xml`.
    Vector,
    /// `.png` at 1x, `image/png`.
    Raster,
    /// `.png` at the request's scale factor, `image/png`.
    RasterHighRes,
    /// `.pdf` single page, `application/pdf`.
    Document,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Vector => "svg",
            ExportFormat::Raster | ExportFormat::RasterHighRes => "png",
            ExportFormat::Document => "pdf",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Vector => "image/svg+xml",
            ExportFormat::Raster | ExportFormat::RasterHighRes => "image/png",
            ExportFormat::Document => "application/pdf",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ExportFormat::Vector => "SVG",
            ExportFormat::Raster | ExportFormat::RasterHighRes => "PNG",
            ExportFormat::Document => "PDF",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    /// High-resolution raster scale factor, clamped to 1–8.
    pub scale: u32,
    pub transparent: bool,
    pub basename: String,
    /// Output width used when the document has no intrinsic dimensions.
    pub width: u32,
    /// Output height used when the document has no intrinsic dimensions.
    pub height: u32,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            format: ExportFormat::Vector,
            scale: 2,
            transparent: false,
            basename: "flowchart".to_string(),
            width: 1920,
            height: 1080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Recoverable: the caller should offer vector export instead.
    #[error("could not produce {format} output; try exporting as SVG instead")]
    Conversion { format: &'static str },
    #[error("{format} export is not available in this build; export as SVG instead")]
    Unavailable { format: &'static str },
    #[error("nothing has been rendered yet")]
    NothingRendered,
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Exports the displayed document in the requested format.
pub fn export(
    document: &RenderedDocument,
    style: &EffectiveStyle,
    request: &ExportRequest,
) -> Result<ExportArtifact> {
    let mut doc = SvgDocument::parse(&document.svg)?;
    let (width, height) = force_dimensions(&mut doc, request);

    match request.format {
        ExportFormat::Vector => export_vector(doc, style, request, width, height),
        #[cfg(feature = "raster")]
        ExportFormat::Raster | ExportFormat::RasterHighRes => {
            raster::export_png(&doc, style, request, width, height)
        }
        #[cfg(feature = "raster")]
        ExportFormat::Document => raster::export_pdf(&doc, style, request, width, height),
        #[cfg(not(feature = "raster"))]
        _ => Err(ExportError::Unavailable {
            format: request.format.label(),
        }),
    }
}

/// `<basename>-<w>x<h>[-<s>x][-transparent].<ext>`
fn filename(
    basename: &str,
    width: u32,
    height: u32,
    scale: Option<u32>,
    transparent: bool,
    extension: &str,
) -> String {
    let mut name = format!("{basename}-{width}x{height}");
    if let Some(scale) = scale {
        name.push_str(&format!("-{scale}x"));
    }
    if transparent {
        name.push_str("-transparent");
    }
    name.push('.');
    name.push_str(extension);
    name
}

/// JS-`parseInt`-style leading-digit parse, so `"100px"` and `"100%"` both
/// read as 100.
fn parse_leading_u32(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn view_box_dimensions(root: &Element) -> Option<(u32, u32)> {
    let view_box = root.attr("viewBox")?;
    let mut parts = view_box.split_whitespace().skip(2);
    let width = parts.next()?.parse::<f64>().ok()?;
    let height = parts.next()?.parse::<f64>().ok()?;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some((width as u32, height as u32))
}

/// Resolves the output pixel dimensions (viewBox, then width/height
/// attributes, then the request's configured values) and forces them onto
/// the document.
fn force_dimensions(doc: &mut SvgDocument, request: &ExportRequest) -> (u32, u32) {
    let root = doc.root_mut();
    let (width, height) = view_box_dimensions(root)
        .or_else(|| {
            let width = parse_leading_u32(root.attr("width")?)?;
            let height = parse_leading_u32(root.attr("height")?)?;
            Some((width, height))
        })
        .unwrap_or((request.width, request.height));

    root.set_attr("width", &width.to_string());
    root.set_attr("height", &height.to_string());
    if root.attr("viewBox").is_none() {
        root.set_attr("viewBox", &format!("0 0 {width} {height}"));
    }
    (width, height)
}

/// Legacy editor canvas backgrounds that transparent export also strips.
const LEGACY_BACKGROUNDS: [&str; 3] = ["#f0f3f7", "#ffffff", "#0f172a"];

fn is_background_rect(el: &Element, background: &str, configured_width: &str) -> bool {
    if el.name != "rect" {
        return false;
    }
    let fill_matches = el.attr("fill").is_some_and(|fill| {
        let fill = fill.to_ascii_lowercase();
        fill == background || LEGACY_BACKGROUNDS.contains(&fill.as_str())
    });
    let width_matches = el
        .attr("width")
        .is_some_and(|w| w == "100%" || w == configured_width);
    fill_matches && width_matches
}

fn strip_background_rects(el: &mut Element, background: &str, configured_width: &str) {
    el.children.retain(|node| match node {
        Node::Element(child) => !is_background_rect(child, background, configured_width),
        Node::Text(_) => true,
    });
    for child in el.child_elements_mut() {
        strip_background_rects(child, background, configured_width);
    }
}

fn export_vector(
    mut doc: SvgDocument,
    style: &EffectiveStyle,
    request: &ExportRequest,
    width: u32,
    height: u32,
) -> Result<ExportArtifact> {
    if request.transparent {
        let background = style.background.as_str().to_ascii_lowercase();
        let configured_width = request.width.to_string();
        strip_background_rects(doc.root_mut(), &background, &configured_width);
    }
    Ok(ExportArtifact {
        filename: filename(
            &request.basename,
            width,
            height,
            None,
            request.transparent,
            "svg",
        ),
        bytes: doc.serialize().into_bytes(),
        media_type: ExportFormat::Vector.media_type(),
    })
}

fn effective_scale(request: &ExportRequest) -> u32 {
    match request.format {
        ExportFormat::RasterHighRes => {
            let (min, max) = clamp::EXPORT_SCALE;
            request.scale.clamp(min, max)
        }
        _ => 1,
    }
}

#[cfg(feature = "raster")]
mod raster {
    use base64::Engine as _;
    use tracing::warn;

    use super::*;

    fn conversion_failure(format: ExportFormat, stage: &str) -> ExportError {
        warn!(format = format.label(), stage, "export conversion failed");
        ExportError::Conversion {
            format: format.label(),
        }
    }

    /// The sanitizer guarantees `#rgb`/`#rrggbb`, so this parse is total over
    /// resolved background values.
    fn background_color(hex: &str) -> Option<tiny_skia::Color> {
        let digits = hex.strip_prefix('#')?;
        let channel = |pair: &str| u8::from_str_radix(pair, 16).ok();
        match digits.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, ch) in rgb.iter_mut().zip(digits.chars()) {
                    let v = ch.to_digit(16)? as u8;
                    *slot = (v << 4) | v;
                }
                Some(tiny_skia::Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255))
            }
            6 => Some(tiny_skia::Color::from_rgba8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                255,
            )),
            _ => None,
        }
    }

    fn render_pixmap(
        svg: &str,
        pixel_width: u32,
        pixel_height: u32,
        scale: u32,
        background: Option<&str>,
        format: ExportFormat,
    ) -> Result<tiny_skia::Pixmap> {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        options.font_family = "Arial".to_string();

        let tree = usvg::Tree::from_str(svg, &options)
            .map_err(|_| conversion_failure(format, "svg-parse"))?;

        let mut pixmap = tiny_skia::Pixmap::new(pixel_width, pixel_height)
            .ok_or_else(|| conversion_failure(format, "pixmap-alloc"))?;

        if let Some(bg) = background.and_then(background_color) {
            pixmap.fill(bg);
        }

        // The document was forced to width x height, so rendering at the
        // scale factor fills the canvas exactly.
        let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
        resvg::render(&tree, transform, &mut pixmap.as_mut());
        Ok(pixmap)
    }

    pub(super) fn export_png(
        doc: &SvgDocument,
        style: &EffectiveStyle,
        request: &ExportRequest,
        width: u32,
        height: u32,
    ) -> Result<ExportArtifact> {
        let scale = effective_scale(request);
        let (pixel_width, pixel_height) = width
            .checked_mul(scale)
            .zip(height.checked_mul(scale))
            .ok_or_else(|| conversion_failure(request.format, "dimensions"))?;
        let background = (!request.transparent).then(|| style.background.as_str());
        let pixmap = render_pixmap(
            &doc.serialize(),
            pixel_width,
            pixel_height,
            scale,
            background,
            request.format,
        )?;
        let bytes = pixmap
            .encode_png()
            .map_err(|_| conversion_failure(request.format, "png-encode"))?;

        let scale_suffix = (request.format == ExportFormat::RasterHighRes).then_some(scale);
        Ok(ExportArtifact {
            filename: filename(
                &request.basename,
                pixel_width,
                pixel_height,
                scale_suffix,
                request.transparent,
                "png",
            ),
            bytes,
            media_type: ExportFormat::Raster.media_type(),
        })
    }

    const PX_TO_MM: f64 = 0.264583;

    pub(super) fn export_pdf(
        doc: &SvgDocument,
        style: &EffectiveStyle,
        request: &ExportRequest,
        width: u32,
        height: u32,
    ) -> Result<ExportArtifact> {
        let background = (!request.transparent).then(|| style.background.as_str());
        let pixmap = render_pixmap(
            &doc.serialize(),
            width,
            height,
            1,
            background,
            ExportFormat::Document,
        )?;
        let png = pixmap
            .encode_png()
            .map_err(|_| conversion_failure(ExportFormat::Document, "png-encode"))?;

        let width_mm = f64::from(width) * PX_TO_MM;
        let height_mm = f64::from(height) * PX_TO_MM;
        let data_url = format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&png)
        );
        let wrapper = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width_mm}mm" height="{height_mm}mm" viewBox="0 0 {width} {height}"><image href="{data_url}" width="{width}" height="{height}"/></svg>"#
        );

        let options = svg2pdf::usvg::Options::default();
        let tree = svg2pdf::usvg::Tree::from_str(&wrapper, &options)
            .map_err(|_| conversion_failure(ExportFormat::Document, "wrapper-parse"))?;
        let bytes = svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|_| conversion_failure(ExportFormat::Document, "pdf-convert"))?;

        Ok(ExportArtifact {
            filename: filename(
                &request.basename,
                width,
                height,
                None,
                request.transparent,
                "pdf",
            ),
            bytes,
            media_type: ExportFormat::Document.media_type(),
        })
    }
}
