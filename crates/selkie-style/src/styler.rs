//! Post-render styling passes.
//!
//! The engine renders with theme variables baked in; these passes then walk
//! the produced document and apply everything theme variables cannot express:
//! dash patterns, corner radii, node shape substitution, role-based recolor,
//! font overrides and drop shadows. Pass order matters and is fixed: shape
//! substitution runs before recoloring so substituted shapes pick up their
//! role colors, and recoloring runs before font overrides so inline `style`
//! edits accumulate instead of clobbering each other.

use selkie_core::detect::DiagramType;
use selkie_core::sanitize::EffectiveStyle;
use selkie_core::style::NodeShape;

use crate::dom::{Element, Node, SvgDocument, fmt_number};

/// Shape role classification used by the recoloring tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Polygon,
    Circle,
    Ellipse,
}

impl ShapeKind {
    pub fn of(tag: &str) -> Option<Self> {
        match tag {
            "rect" => Some(ShapeKind::Rect),
            "polygon" => Some(ShapeKind::Polygon),
            "circle" => Some(ShapeKind::Circle),
            "ellipse" => Some(ShapeKind::Ellipse),
            _ => None,
        }
    }
}

/// Applies every styling pass to a freshly parsed engine document.
///
/// The document must come straight from engine output; feeding a previous
/// pass's serialization back in would double-apply shape substitution.
pub fn apply_style(doc: &mut SvgDocument, style: &EffectiveStyle, diagram_type: DiagramType) {
    style_lines(doc, style, diagram_type);
    apply_corner_radius(doc, style, diagram_type);
    substitute_shapes(doc, style, diagram_type);
    recolor_shapes(doc, style);
    recolor_text(doc, style);
    recolor_lines(doc, style);
    apply_font_overrides(doc, style);
    if style.shadow {
        apply_shadow(doc);
    }
}

const LINE_STYLED_TYPES: [DiagramType; 3] = [
    DiagramType::Flowchart,
    DiagramType::Sequence,
    DiagramType::State,
];

fn style_lines(doc: &mut SvgDocument, style: &EffectiveStyle, diagram_type: DiagramType) {
    if !LINE_STYLED_TYPES.contains(&diagram_type) {
        return;
    }

    let thickness = style.line_thickness.map(|t| t.to_string());
    let dash = match style.line_style {
        Some(line_style) => Some(line_style.dash_array().to_string()),
        // The pastel preset historically rendered dashed 2px edges even
        // without an explicit line style.
        None if style.theme == "pastel" => Some("5,5".to_string()),
        None => None,
    };
    let pastel_width = style.line_style.is_none() && style.theme == "pastel";

    doc.root_mut().for_each_element_mut(&mut |el| {
        if el.name != "path" {
            return;
        }
        if let Some(thickness) = &thickness {
            el.set_attr("stroke-width", thickness);
        } else if pastel_width {
            el.set_attr("stroke-width", "2");
        }
        if let Some(dash) = &dash {
            el.set_attr("stroke-dasharray", dash);
        }
    });

    // Arrowheads must stay solid whatever the edges do.
    doc.root_mut().for_each_element_mut(&mut |el| {
        if el.name == "marker" {
            el.for_each_element_mut(&mut |inner| {
                if inner.name == "path" {
                    inner.set_attr("stroke-dasharray", "0");
                }
            });
        }
    });
}

const ROUNDED_TYPES: [DiagramType; 3] =
    [DiagramType::Flowchart, DiagramType::Class, DiagramType::Er];

fn default_corner_radius(style: &EffectiveStyle, diagram_type: DiagramType) -> u32 {
    match diagram_type {
        DiagramType::Class => 4,
        DiagramType::Er => 8,
        _ => match style.theme.as_str() {
            "corporate" => 4,
            "minimal" => 0,
            "dark" => 8,
            _ => 12,
        },
    }
}

fn apply_corner_radius(doc: &mut SvgDocument, style: &EffectiveStyle, diagram_type: DiagramType) {
    if !ROUNDED_TYPES.contains(&diagram_type) {
        return;
    }
    let radius = style
        .corner_radius
        .unwrap_or_else(|| default_corner_radius(style, diagram_type))
        .to_string();
    doc.root_mut().for_each_element_mut(&mut |el| {
        if el.name == "rect" {
            el.set_attr("rx", &radius);
            el.set_attr("ry", &radius);
        }
    });
}

fn substitute_shapes(doc: &mut SvgDocument, style: &EffectiveStyle, diagram_type: DiagramType) {
    let multiplier = f64::from(style.node_size.unwrap_or(100)) / 100.0;
    if style.node_shape == NodeShape::Rectangle && style.node_size.is_none() {
        return;
    }
    visit_node_groups(doc.root_mut(), &mut |group| {
        replace_first_rect(group, &mut |rect| {
            build_replacement(rect, style.node_shape, multiplier, diagram_type)
        });
    });
}

/// Calls `f` for each `g` carrying class `node`, without descending into one.
fn visit_node_groups(el: &mut Element, f: &mut impl FnMut(&mut Element)) {
    for child in el.child_elements_mut() {
        if child.name == "g" && child.has_class("node") {
            f(child);
        } else {
            visit_node_groups(child, f);
        }
    }
}

/// Finds the first `rect` in document order under `el` and offers it to the
/// callback; a returned node replaces the rect, `None` means the callback
/// mutated it in place (or left it alone). Returns whether a rect was found.
fn replace_first_rect(
    el: &mut Element,
    replace: &mut impl FnMut(&mut Element) -> Option<Node>,
) -> bool {
    for idx in 0..el.children.len() {
        let Node::Element(child) = &mut el.children[idx] else {
            continue;
        };
        if child.name == "rect" {
            if let Some(node) = replace(child) {
                el.children[idx] = node;
            }
            return true;
        }
        if replace_first_rect(child, replace) {
            return true;
        }
    }
    false
}

fn copy_paint_attrs(rect: &Element, target: &mut Element) {
    for attr in ["fill", "stroke", "stroke-width"] {
        if let Some(value) = rect.attr(attr) {
            target.set_attr(attr, value);
        }
    }
}

fn build_replacement(
    rect: &mut Element,
    shape: NodeShape,
    multiplier: f64,
    diagram_type: DiagramType,
) -> Option<Node> {
    let x = rect.attr_f64("x");
    let y = rect.attr_f64("y");
    let width = rect.attr_f64("width");
    let height = rect.attr_f64("height");
    let cx = x + width / 2.0;
    let cy = y + height / 2.0;

    match shape {
        NodeShape::Circle
            if matches!(diagram_type, DiagramType::Flowchart | DiagramType::State) =>
        {
            let mut circle = Element::new("circle");
            circle.set_attr("cx", &fmt_number(cx));
            circle.set_attr("cy", &fmt_number(cy));
            circle.set_attr("r", &fmt_number(width.min(height) / 2.0 * multiplier));
            copy_paint_attrs(rect, &mut circle);
            Some(Node::Element(circle))
        }
        NodeShape::Diamond if diagram_type == DiagramType::Flowchart => {
            let half_w = width / 2.0 * multiplier;
            let half_h = height / 2.0 * multiplier;
            let points = [
                (cx, cy - half_h),
                (cx + half_w, cy),
                (cx, cy + half_h),
                (cx - half_w, cy),
            ];
            Some(Node::Element(polygon(&points, rect)))
        }
        NodeShape::Hexagon if diagram_type == DiagramType::Flowchart => {
            let half_w = width / 2.0 * multiplier;
            let half_h = height / 2.0 * multiplier;
            let offset = half_w * 0.3;
            let points = [
                (cx - half_w + offset, cy - half_h),
                (cx + half_w - offset, cy - half_h),
                (cx + half_w, cy),
                (cx + half_w - offset, cy + half_h),
                (cx - half_w + offset, cy + half_h),
                (cx - half_w, cy),
            ];
            Some(Node::Element(polygon(&points, rect)))
        }
        NodeShape::Rectangle => {
            let new_w = width * multiplier;
            let new_h = height * multiplier;
            rect.set_attr("x", &fmt_number(x - (new_w - width) / 2.0));
            rect.set_attr("y", &fmt_number(y - (new_h - height) / 2.0));
            rect.set_attr("width", &fmt_number(new_w));
            rect.set_attr("height", &fmt_number(new_h));
            None
        }
        // Shape not supported for this diagram type.
        _ => None,
    }
}

fn polygon(points: &[(f64, f64)], rect: &Element) -> Element {
    let mut el = Element::new("polygon");
    let points = points
        .iter()
        .map(|(x, y)| format!("{},{}", fmt_number(*x), fmt_number(*y)))
        .collect::<Vec<_>>()
        .join(" ");
    el.set_attr("points", &points);
    copy_paint_attrs(rect, &mut el);
    el
}

fn paint(el: &mut Element, property: &str, value: &str) {
    el.set_attr(property, value);
    el.set_style_property(property, value);
}

fn recolor_shapes(doc: &mut SvgDocument, style: &EffectiveStyle) {
    let border_requested = style.border.is_requested();
    doc.root_mut().for_each_element_mut(&mut |el| {
        let Some(kind) = ShapeKind::of(&el.name) else {
            return;
        };
        let fill = match kind {
            ShapeKind::Rect => style.primary.as_str(),
            ShapeKind::Polygon => style.secondary.as_str(),
            ShapeKind::Circle | ShapeKind::Ellipse => style.tertiary.as_str(),
        };
        paint(el, "fill", fill);
        if border_requested {
            paint(el, "stroke", style.border.as_str());
        }
    });
}

fn recolor_text(doc: &mut SvgDocument, style: &EffectiveStyle) {
    // Text outside any group keeps the primary text color; each enclosing
    // group re-derives the color from the shape it carries.
    let root_color = style.text.as_str().to_string();
    recolor_text_in(doc.root_mut(), &root_color, style);
}

fn recolor_text_in(el: &mut Element, color: &str, style: &EffectiveStyle) {
    for child in el.child_elements_mut() {
        match child.name.as_str() {
            "text" | "tspan" => {
                paint(child, "fill", color);
                recolor_text_in(child, color, style);
            }
            "g" => {
                let group_color = if child.has_descendant("rect") {
                    style.text.as_str()
                } else if child.has_descendant("polygon") {
                    style.secondary_text.as_str()
                } else if child.has_descendant("circle") {
                    style.tertiary_text.as_str()
                } else {
                    // Edge labels, titles, legends.
                    style.label_text.as_str()
                };
                let group_color = group_color.to_string();
                recolor_text_in(child, &group_color, style);
            }
            _ => recolor_text_in(child, color, style),
        }
    }
}

fn recolor_lines(doc: &mut SvgDocument, style: &EffectiveStyle) {
    if !style.line.is_requested() {
        return;
    }
    doc.root_mut().for_each_element_mut(&mut |el| {
        if el.name == "path" {
            paint(el, "stroke", style.line.as_str());
        }
    });
}

fn apply_font_overrides(doc: &mut SvgDocument, style: &EffectiveStyle) {
    let font_size = style.font_size.map(|size| format!("{size}px"));
    let font_family = style.font_family.clone();
    let font_weight = style.font_weight.map(|weight| weight.as_str());
    if font_size.is_none() && font_family.is_none() && font_weight.is_none() {
        return;
    }
    doc.root_mut().for_each_element_mut(&mut |el| {
        if el.name != "text" && el.name != "tspan" {
            return;
        }
        if let Some(size) = &font_size {
            el.set_attr("font-size", size);
            el.set_style_property("font-size", size);
        }
        if let Some(family) = &font_family {
            el.set_attr("font-family", family);
            el.set_style_property("font-family", family);
        }
        if let Some(weight) = font_weight {
            el.set_attr("font-weight", weight);
            el.set_style_property("font-weight", weight);
        }
    });
}

const SHADOW_FILTER_ID: &str = "drop-shadow";

fn apply_shadow(doc: &mut SvgDocument) {
    install_shadow_filter(doc.root_mut());
    let filter_ref = format!("url(#{SHADOW_FILTER_ID})");
    visit_node_groups(doc.root_mut(), &mut |group| {
        group.for_each_element_mut(&mut |el| {
            if matches!(el.name.as_str(), "rect" | "circle" | "polygon") {
                el.set_attr("filter", &filter_ref);
            }
        });
    });
}

fn install_shadow_filter(root: &mut Element) {
    let defs = match root
        .children
        .iter()
        .position(|node| matches!(node, Node::Element(el) if el.name == "defs"))
    {
        Some(idx) => match &mut root.children[idx] {
            Node::Element(el) => el,
            Node::Text(_) => unreachable!(),
        },
        None => {
            root.children.insert(0, Node::Element(Element::new("defs")));
            match &mut root.children[0] {
                Node::Element(el) => el,
                Node::Text(_) => unreachable!(),
            }
        }
    };

    let installed = defs
        .child_elements()
        .any(|el| el.name == "filter" && el.attr("id") == Some(SHADOW_FILTER_ID));
    if installed {
        return;
    }

    let mut filter = Element::new("filter");
    filter.set_attr("id", SHADOW_FILTER_ID);
    let mut shadow = Element::new("feDropShadow");
    shadow.set_attr("dx", "2");
    shadow.set_attr("dy", "2");
    shadow.set_attr("stdDeviation", "3");
    shadow.set_attr("flood-opacity", "0.3");
    filter.children.push(Node::Element(shadow));
    defs.children.push(Node::Element(filter));
}

#[cfg(test)]
mod tests {
    use selkie_core::sanitize::resolve_style;
    use selkie_core::style::{LineStyle, StyleConfiguration};

    use super::*;

    fn styled(svg: &str, config: &StyleConfiguration, theme: &str, ty: DiagramType) -> String {
        let mut doc = SvgDocument::parse(svg).unwrap();
        apply_style(&mut doc, &resolve_style(config, theme), ty);
        doc.serialize()
    }

    const NODE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"><g class="node"><rect x="10" y="20" width="100" height="40" fill="#eee" stroke="#333"/><text>A</text></g></svg>"##;

    #[test]
    fn dashed_override_reaches_edges_but_not_markers() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><defs><marker id="arrow"><path d="M0,0"/></marker></defs><path class="edge" d="M0,0 L10,10"/></svg>"#;
        let config = StyleConfiguration {
            line_style: Some(LineStyle::Dashed),
            ..Default::default()
        };
        let out = styled(svg, &config, "corporate", DiagramType::Flowchart);
        assert!(out.contains(r#"class="edge" d="M0,0 L10,10" stroke-dasharray="8,4""#));
        // The marker path is set then reset, so it ends up solid.
        assert!(out.contains(r#"<marker id="arrow"><path d="M0,0" stroke-dasharray="0""#));
    }

    #[test]
    fn pastel_defaults_to_soft_dashes() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0,0"/></svg>"#;
        let out = styled(
            svg,
            &StyleConfiguration::default(),
            "pastel",
            DiagramType::Sequence,
        );
        assert!(out.contains(r#"stroke-width="2""#));
        assert!(out.contains(r#"stroke-dasharray="5,5""#));
    }

    #[test]
    fn thickness_override_beats_the_pastel_default_width() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0,0"/></svg>"#;
        let config = StyleConfiguration {
            line_thickness: Some(6),
            ..Default::default()
        };
        let out = styled(svg, &config, "pastel", DiagramType::Flowchart);
        assert!(out.contains(r#"stroke-width="6""#));
        assert!(!out.contains(r#"stroke-width="2""#));
        // The pastel dash default still applies without a line style.
        assert!(out.contains(r#"stroke-dasharray="5,5""#));
    }

    #[test]
    fn line_styling_skips_non_line_diagrams() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0,0"/></svg>"#;
        let config = StyleConfiguration {
            line_style: Some(LineStyle::Dotted),
            ..Default::default()
        };
        let out = styled(svg, &config, "pastel", DiagramType::Gantt);
        assert!(!out.contains("stroke-dasharray"));
    }

    #[test]
    fn corner_radius_defaults_depend_on_type_and_theme() {
        for (theme, ty, expected) in [
            ("vibrant", DiagramType::Class, "4"),
            ("vibrant", DiagramType::Er, "8"),
            ("corporate", DiagramType::Flowchart, "4"),
            ("minimal", DiagramType::Flowchart, "0"),
            ("dark", DiagramType::Flowchart, "8"),
            ("vibrant", DiagramType::Flowchart, "12"),
        ] {
            let out = styled(NODE_SVG, &StyleConfiguration::default(), theme, ty);
            assert!(
                out.contains(&format!(r#"rx="{expected}" ry="{expected}""#)),
                "{theme}/{ty}: {out}"
            );
        }
    }

    #[test]
    fn corner_radius_override_wins() {
        let config = StyleConfiguration {
            corner_radius: Some(17),
            ..Default::default()
        };
        let out = styled(NODE_SVG, &config, "minimal", DiagramType::Flowchart);
        assert!(out.contains(r#"rx="17" ry="17""#));
    }

    #[test]
    fn circle_substitution_preserves_the_center() {
        let config = StyleConfiguration {
            node_shape: NodeShape::Circle,
            ..Default::default()
        };
        let out = styled(NODE_SVG, &config, "corporate", DiagramType::Flowchart);
        // rect center is (60, 40); r = min(100, 40)/2 = 20.
        assert!(out.contains(r#"<circle cx="60" cy="40" r="20""#), "{out}");
        assert!(!out.contains("<rect"));
    }

    #[test]
    fn circle_substitution_only_for_flowchart_and_state() {
        let config = StyleConfiguration {
            node_shape: NodeShape::Circle,
            ..Default::default()
        };
        let out = styled(NODE_SVG, &config, "corporate", DiagramType::Sequence);
        assert!(out.contains("<rect"));
        assert!(!out.contains("<circle"));
    }

    #[test]
    fn hexagon_points_use_the_inset_offset() {
        let config = StyleConfiguration {
            node_shape: NodeShape::Hexagon,
            ..Default::default()
        };
        let out = styled(NODE_SVG, &config, "corporate", DiagramType::Flowchart);
        // halfW = 50, offset = 15; top-left corner at (60-50+15, 40-20).
        assert!(
            out.contains(r#"points="25,20 95,20 110,40 95,60 25,60 10,40""#),
            "{out}"
        );
    }

    #[test]
    fn rectangle_resize_recenters() {
        let config = StyleConfiguration {
            node_size: Some(150),
            ..Default::default()
        };
        let out = styled(NODE_SVG, &config, "corporate", DiagramType::State);
        // 100x40 grows to 150x60; x shifts by -25, y by -10.
        assert!(
            out.contains(r#"x="-15" y="10" width="150" height="60""#),
            "{out}"
        );
    }

    #[test]
    fn shape_recoloring_by_role() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1" height="1"/><polygon points="0,0 1,1 0,1"/><ellipse rx="1" ry="1"/></svg>"#;
        let config = StyleConfiguration {
            primary: Some("#111111".to_string()),
            secondary: Some("#222222".to_string()),
            tertiary: Some("#333333".to_string()),
            ..Default::default()
        };
        let out = styled(svg, &config, "corporate", DiagramType::Gantt);
        assert!(out.contains(r##"<rect width="1" height="1" fill="#111111" style="fill: #111111;""##));
        assert!(out.contains(r##"fill="#222222""##));
        assert!(out.contains(r##"fill="#333333""##));
    }

    #[test]
    fn border_stroke_applies_even_for_invalid_override() {
        let config = StyleConfiguration {
            border: Some("not-a-color".to_string()),
            ..Default::default()
        };
        let out = styled(NODE_SVG, &config, "pastel", DiagramType::Gantt);
        // Invalid override falls back to the pastel border token but the
        // stroke is still rewritten because the role was requested.
        assert!(out.contains(r##"stroke="#b8a89a""##), "{out}");
    }

    #[test]
    fn text_color_follows_the_enclosing_shape() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><g><polygon points="0,0 1,1 0,1"/><text>choice</text></g><g><text>edge label</text></g><text>title</text></svg>"#;
        let config = StyleConfiguration {
            text: Some("#0000aa".to_string()),
            secondary_text: Some("#00aa00".to_string()),
            label_text: Some("#aa0000".to_string()),
            ..Default::default()
        };
        let out = styled(svg, &config, "corporate", DiagramType::Gantt);
        assert!(out.contains(r##"<text fill="#00aa00" style="fill: #00aa00;">choice</text>"##));
        assert!(out.contains(r##"<text fill="#aa0000" style="fill: #aa0000;">edge label</text>"##));
        // Ungrouped text keeps the primary text color.
        assert!(out.contains(r##"<text fill="#0000aa" style="fill: #0000aa;">title</text>"##));
    }

    #[test]
    fn inner_group_overrides_outer_for_text() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><g><rect width="1" height="1"/><g><text>plain</text></g></g></svg>"#;
        let config = StyleConfiguration {
            text: Some("#0000aa".to_string()),
            label_text: Some("#aa0000".to_string()),
            ..Default::default()
        };
        let out = styled(svg, &config, "corporate", DiagramType::Gantt);
        // The nearest group carries no shape, so the label color wins.
        assert!(out.contains(r##"fill="#aa0000""##), "{out}");
    }

    #[test]
    fn line_recolor_only_when_requested() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0,0"/></svg>"#;
        let untouched = styled(
            svg,
            &StyleConfiguration::default(),
            "corporate",
            DiagramType::Gantt,
        );
        assert!(!untouched.contains("stroke"));

        let config = StyleConfiguration {
            line: Some("#123456".to_string()),
            ..Default::default()
        };
        let out = styled(svg, &config, "corporate", DiagramType::Gantt);
        assert!(out.contains(r##"stroke="#123456" style="stroke: #123456;""##));
    }

    #[test]
    fn font_overrides_hit_text_and_tspans() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><text>a<tspan>b</tspan></text></svg>"#;
        let config = StyleConfiguration {
            font_size: Some(18),
            font_family: Some("Inter".to_string()),
            ..Default::default()
        };
        let out = styled(svg, &config, "corporate", DiagramType::Flowchart);
        assert_eq!(out.matches(r#"font-size="18px""#).count(), 2);
        assert_eq!(out.matches(r#"font-family="Inter""#).count(), 2);
        assert!(!out.contains("font-weight"));
    }

    #[test]
    fn shadow_installs_one_filter_and_tags_node_shapes() {
        let config = StyleConfiguration {
            shadow: true,
            ..Default::default()
        };
        let out = styled(NODE_SVG, &config, "corporate", DiagramType::Gantt);
        assert!(out.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg"><defs><filter id="drop-shadow">"#));
        assert_eq!(out.matches("feDropShadow").count(), 1);
        assert!(out.contains(r#"filter="url(#drop-shadow)""#));
    }

    #[test]
    fn shadow_reuses_existing_defs() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><defs><marker id="m"><path d="M0,0"/></marker></defs><g class="node"><rect width="1" height="1"/></g></svg>"#;
        let config = StyleConfiguration {
            shadow: true,
            ..Default::default()
        };
        let out = styled(svg, &config, "corporate", DiagramType::Gantt);
        assert_eq!(out.matches("<defs>").count(), 1);
        assert!(out.contains(r#"<filter id="drop-shadow">"#));
    }
}
