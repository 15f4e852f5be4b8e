#![cfg(feature = "raster")]

use selkie::export::export;
use selkie::{
    DiagramType, ExportError, ExportFormat, ExportRequest, RenderedDocument, StyleConfiguration,
    resolve_style,
};

const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><rect x="10" y="10" width="60" height="30" fill="#112233"/></svg>"##;

fn document() -> RenderedDocument {
    RenderedDocument {
        svg: SVG.to_string(),
        raw_svg: SVG.to_string(),
        diagram_type: DiagramType::Flowchart,
        session_id: "selkie-test".to_string(),
    }
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "not a PNG");
    let be = |b: &[u8]| u32::from_be_bytes([b[0], b[1], b[2], b[3]]);
    (be(&bytes[16..20]), be(&bytes[20..24]))
}

#[test]
fn raster_export_renders_at_document_size() {
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    let request = ExportRequest {
        format: ExportFormat::Raster,
        ..Default::default()
    };
    let artifact = export(&document(), &style, &request).unwrap();

    assert_eq!(artifact.filename, "flowchart-100x50.png");
    assert_eq!(artifact.media_type, "image/png");
    assert_eq!(png_dimensions(&artifact.bytes), (100, 50));
}

#[test]
fn high_res_export_scales_pixels_and_filename_together() {
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    let request = ExportRequest {
        format: ExportFormat::RasterHighRes,
        scale: 4,
        transparent: true,
        ..Default::default()
    };
    let artifact = export(&document(), &style, &request).unwrap();

    // The filename carries the scaled pixel dimensions, not the nominal ones.
    assert_eq!(artifact.filename, "flowchart-400x200-4x-transparent.png");
    assert_eq!(png_dimensions(&artifact.bytes), (400, 200));
}

#[test]
fn high_res_scale_is_clamped() {
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    let request = ExportRequest {
        format: ExportFormat::RasterHighRes,
        scale: 50,
        ..Default::default()
    };
    let artifact = export(&document(), &style, &request).unwrap();
    assert_eq!(artifact.filename, "flowchart-800x400-8x.png");
    assert_eq!(png_dimensions(&artifact.bytes), (800, 400));
}

#[test]
fn pdf_export_produces_a_pdf() {
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    let request = ExportRequest {
        format: ExportFormat::Document,
        ..Default::default()
    };
    let artifact = export(&document(), &style, &request).unwrap();

    assert_eq!(artifact.filename, "flowchart-100x50.pdf");
    assert_eq!(artifact.media_type, "application/pdf");
    assert!(artifact.bytes.starts_with(b"%PDF-"));
}

#[test]
fn oversized_pixel_dimensions_fail_recoverably() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;
    let doc = RenderedDocument {
        svg: svg.to_string(),
        raw_svg: svg.to_string(),
        diagram_type: DiagramType::Flowchart,
        session_id: "selkie-test".to_string(),
    };
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    // A dimensionless document takes the request's width; scaled up it
    // overflows u32 and must surface the recoverable conversion error
    // instead of panicking.
    let request = ExportRequest {
        format: ExportFormat::RasterHighRes,
        scale: 8,
        width: u32::MAX / 4,
        height: 10,
        ..Default::default()
    };
    let err = export(&doc, &style, &request).unwrap_err();
    assert!(matches!(err, ExportError::Conversion { .. }));
    assert!(err.to_string().contains("try exporting as SVG instead"));
}

#[test]
fn transparent_raster_export_skips_the_background_fill() {
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    let opaque = export(
        &document(),
        &style,
        &ExportRequest {
            format: ExportFormat::Raster,
            ..Default::default()
        },
    )
    .unwrap();
    let transparent = export(
        &document(),
        &style,
        &ExportRequest {
            format: ExportFormat::Raster,
            transparent: true,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(transparent.filename, "flowchart-100x50-transparent.png");
    // Same pixel grid, different compositing; the encodings must differ.
    assert_eq!(png_dimensions(&opaque.bytes), png_dimensions(&transparent.bytes));
    assert_ne!(opaque.bytes, transparent.bytes);
}
