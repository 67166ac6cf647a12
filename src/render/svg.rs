use std::fmt::Write;

use super::{Point, RadialGradient, Rgb, Size, Stroke, Surface, TextStyle};

const FONT_FAMILY: &str = "Arial, sans-serif";

/// Builds a standalone SVG document. Each gradient circle gets its own
/// `<radialGradient>` definition, sized in user space like a canvas gradient.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    defs: String,
    body: String,
    gradients: usize,
}

impl SvgSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            defs: String::new(),
            body: String::new(),
            gradients: 0,
        }
    }

    pub fn finish(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n<defs>\n{defs}</defs>\n{body}</svg>\n",
            w = self.size.width,
            h = self.size.height,
            defs = self.defs,
            body = self.body,
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Rgb) {
        self.defs.clear();
        self.body.clear();
        self.gradients = 0;
        let _ = writeln!(
            self.body,
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            self.size.width,
            self.size.height,
            color.to_hex()
        );
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let dash = stroke
            .dash
            .map(|(on, off)| format!(" stroke-dasharray=\"{} {}\"", on, off))
            .unwrap_or_default();
        let _ = writeln!(
            self.body,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
            from.x,
            from.y,
            to.x,
            to.y,
            stroke.color.to_hex(),
            stroke.width,
            dash
        );
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        let anchor = if style.centered { "middle" } else { "start" };
        let weight = if style.bold { "bold" } else { "normal" };
        let transform = if style.rotation != 0.0 {
            format!(
                " transform=\"rotate({:.2} {:.2} {:.2})\"",
                -style.rotation, at.x, at.y
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            self.body,
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" text-anchor=\"{}\"{}>{}</text>",
            at.x,
            at.y,
            style.color.to_hex(),
            FONT_FAMILY,
            style.size,
            weight,
            anchor,
            transform,
            escape(text)
        );
    }

    fn gradient_circle(&mut self, center: Point, radius: f64, fill: &RadialGradient) {
        let id = format!("node-gradient-{}", self.gradients);
        self.gradients += 1;

        let _ = writeln!(
            self.defs,
            "<radialGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"><stop offset=\"0\" stop-color=\"{}\"/><stop offset=\"1\" stop-color=\"{}\"/></radialGradient>",
            id,
            center.x,
            center.y,
            fill.radius,
            fill.inner.to_hex(),
            fill.outer.to_hex()
        );
        let _ = writeln!(
            self.body,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"url(#{})\"/>",
            center.x, center.y, radius, id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeSet;
    use crate::render::HeatmapRenderer;

    #[test]
    fn test_svg_document() {
        let mut svg = SvgSurface::new(Size::new(800.0, 500.0));
        HeatmapRenderer.render(&NodeSet::fallback(), &mut svg);
        let doc = svg.finish();

        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert_eq!(doc.matches("<circle").count(), 5);
        assert_eq!(doc.matches("<radialGradient").count(), 5);
        assert!(doc.contains("stroke-dasharray=\"5 5\""));
        assert!(doc.contains("fill=\"#111111\""));
        assert!(doc.contains(">$240.2</text>"));
        assert!(doc.contains("rotate(-90.00"));
    }

    #[test]
    fn test_rerender_does_not_accumulate() {
        let mut svg = SvgSurface::new(Size::default());
        HeatmapRenderer.render(&NodeSet::fallback(), &mut svg);
        let once = svg.finish();
        HeatmapRenderer.render(&NodeSet::fallback(), &mut svg);
        assert_eq!(once, svg.finish());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
