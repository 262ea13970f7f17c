//! Common utilities shared across CLI commands: scene -> SVG -> image.

use image::{DynamicImage, RgbaImage};
use resvg::usvg;
use tiny_skia::Pixmap;

use rat_tide::{DrawOp, Paint, Scene};

/// Default preview surface - wide aspect ratio for terminal display.
pub const PREVIEW_WIDTH: f64 = 1200.0;
pub const PREVIEW_HEIGHT: f64 = 675.0;

/// Serialize a scene to a standalone SVG document.
///
/// Draw order follows the scene: a clip op opens a clipped group that every
/// following fill/stroke joins; text closes the group first so the label
/// always lands on top, unclipped.
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">
<rect width="100%" height="100%" fill="white"/>
"#,
        scene.width, scene.height, scene.width, scene.height
    ));

    let mut clip_open = false;
    let mut clip_count = 0usize;

    for op in &scene.ops {
        match op {
            DrawOp::ClipCircle(circle) => {
                if clip_open {
                    svg.push_str("</g>\n");
                }
                svg.push_str(&format!(
                    "<defs><clipPath id=\"clip{}\"><circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/></clipPath></defs>\n",
                    clip_count, circle.cx, circle.cy, circle.r
                ));
                svg.push_str(&format!("<g clip-path=\"url(#clip{})\">\n", clip_count));
                clip_open = true;
                clip_count += 1;
            }
            DrawOp::FillCircle { circle, color } => {
                svg.push_str(&format!(
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>\n",
                    circle.cx, circle.cy, circle.r, color
                ));
            }
            DrawOp::Path { path, paint } => {
                let data = path.to_svg_data();
                match paint {
                    Paint::Fill { color } => {
                        svg.push_str(&format!("<path d=\"{}\" fill=\"{}\"/>\n", data, color));
                    }
                    Paint::Stroke { color, width } => {
                        svg.push_str(&format!(
                            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\" stroke-linecap=\"round\"/>\n",
                            data, color, width
                        ));
                    }
                }
            }
            DrawOp::Text { x, y, size, color, text } => {
                if clip_open {
                    svg.push_str("</g>\n");
                    clip_open = false;
                }
                svg.push_str(&format!(
                    "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.2}\" font-family=\"sans-serif\" fill=\"{}\" text-anchor=\"middle\">{}</text>\n",
                    x, y, size, color, text
                ));
            }
        }
    }

    if clip_open {
        svg.push_str("</g>\n");
    }
    svg.push_str("</svg>");
    svg
}

/// Rasterize a scene with resvg.
pub fn render_scene(scene: &Scene) -> DynamicImage {
    let width = scene.width.max(1.0) as u32;
    let height = scene.height.max(1.0) as u32;

    let svg = scene_to_svg(scene);

    // Parse and render with resvg. The SVG is our own output, so a parse
    // failure is a bug rather than bad input.
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &options)
        .expect("Failed to parse generated SVG");

    let mut pixmap = Pixmap::new(width, height)
        .expect("Failed to create pixmap");

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let rgba = RgbaImage::from_raw(width, height, pixmap.take())
        .expect("Failed to create image");

    DynamicImage::ImageRgba8(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rat_tide::{FieldStyle, GaugeStyle, WaveField, WaveGauge};

    #[test]
    fn field_scene_becomes_a_single_path() {
        let mut field = WaveField::new(FieldStyle::default());
        field.layout(200.0, 100.0);
        let svg = scene_to_svg(&field.scene());
        assert!(svg.contains("<path d=\"M 200.00 50.00"));
        assert!(svg.contains("fill=\"#ffff00\""));
        assert!(!svg.contains("clipPath"));
    }

    #[test]
    fn gauge_scene_clips_wave_but_not_label() {
        let mut gauge = WaveGauge::new(GaugeStyle::default());
        gauge.layout(200.0, 200.0);
        let svg = scene_to_svg(&gauge.scene());

        let clip_group = svg.find("<g clip-path=\"url(#clip0)\">").expect("clip group");
        let path = svg.find("<path").expect("wave path");
        let group_close = svg.rfind("</g>").expect("group close");
        let text = svg.find("<text").expect("label");

        assert!(clip_group < path && path < group_close, "wave renders inside the clip");
        assert!(group_close < text, "label renders after the clip group closes");
        assert!(svg.contains(">0%</text>"));
    }

    #[test]
    fn stroke_paint_sets_width() {
        let style = FieldStyle { stroke_only: true, line_width: 2.5, ..FieldStyle::default() };
        let mut field = WaveField::new(style);
        field.layout(200.0, 100.0);
        let svg = scene_to_svg(&field.scene());
        assert!(svg.contains("stroke-width=\"2.50\""));
        assert!(svg.contains("fill=\"none\""));
    }

    #[test]
    fn rasterized_frame_matches_surface_size() {
        let mut field = WaveField::new(FieldStyle::default());
        field.layout(64.0, 32.0);
        let img = render_scene(&field.scene());
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 32);
    }
}
