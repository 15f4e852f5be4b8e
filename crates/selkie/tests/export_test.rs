use selkie::export::export;
use selkie::{DiagramType, ExportRequest, RenderedDocument, StyleConfiguration, resolve_style};

fn document(svg: &str) -> RenderedDocument {
    RenderedDocument {
        svg: svg.to_string(),
        raw_svg: svg.to_string(),
        diagram_type: DiagramType::Flowchart,
        session_id: "selkie-test".to_string(),
    }
}

#[test]
fn vector_export_forces_dimensions_from_view_box() {
    let doc = document(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 812.5 300.25"><g class="node"><rect width="10" height="10"/></g></svg>"#,
    );
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    let artifact = export(&doc, &style, &ExportRequest::default()).unwrap();

    assert_eq!(artifact.filename, "flowchart-812x300.svg");
    assert_eq!(artifact.media_type, "image/svg+xml");

    let text = String::from_utf8(artifact.bytes).unwrap();
    let parsed = roxmltree::Document::parse(&text).unwrap();
    let root = parsed.root_element();
    assert_eq!(root.attribute("width"), Some("812"));
    assert_eq!(root.attribute("height"), Some("300"));
    assert_eq!(root.attribute("viewBox"), Some("0 0 812.5 300.25"));
}

#[test]
fn vector_export_synthesizes_view_box_from_request_dimensions() {
    let doc = document(r#"<svg xmlns="http://www.w3.org/2000/svg"><g/></svg>"#);
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    let request = ExportRequest {
        basename: "diagram".to_string(),
        width: 1600,
        height: 1200,
        ..Default::default()
    };
    let artifact = export(&doc, &style, &request).unwrap();

    assert_eq!(artifact.filename, "diagram-1600x1200.svg");
    let text = String::from_utf8(artifact.bytes).unwrap();
    assert!(text.contains(r#"viewBox="0 0 1600 1200""#));
}

#[test]
fn transparent_vector_export_strips_background_rects() {
    let doc = document(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><rect fill="#FFFFFF" width="100%" height="100%"/><rect fill="#abcdef" width="1920" height="1080"/><g class="node"><rect fill="#abcdef" width="40" height="20"/></g></svg>"##,
    );
    let config = StyleConfiguration {
        background: Some("#abcdef".to_string()),
        ..Default::default()
    };
    let style = resolve_style(&config, "pastel");
    let request = ExportRequest {
        transparent: true,
        ..Default::default()
    };
    let artifact = export(&doc, &style, &request).unwrap();

    assert_eq!(artifact.filename, "flowchart-100x50-transparent.svg");
    let text = String::from_utf8(artifact.bytes).unwrap();
    // The legacy white canvas and the themed full-width rect are gone; the
    // node-sized rect with the same fill survives.
    assert!(!text.contains("#FFFFFF"));
    assert!(!text.contains(r#"width="1920""#));
    assert!(text.contains(r##"<rect fill="#abcdef" width="40" height="20"/>"##));
}

#[test]
fn opaque_vector_export_keeps_background_rects() {
    let doc = document(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><rect fill="#ffffff" width="100%" height="100%"/></svg>"##,
    );
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    let artifact = export(&doc, &style, &ExportRequest::default()).unwrap();
    let text = String::from_utf8(artifact.bytes).unwrap();
    assert!(text.contains(r##"fill="#ffffff""##));
}

#[cfg(not(feature = "raster"))]
#[test]
fn raster_formats_are_unavailable_without_the_feature() {
    let doc = document(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"/>"#);
    let style = resolve_style(&StyleConfiguration::default(), "pastel");
    let request = ExportRequest {
        format: selkie::ExportFormat::Raster,
        ..Default::default()
    };
    let err = export(&doc, &style, &request).unwrap_err();
    assert!(err.to_string().contains("export as SVG instead"));
}
