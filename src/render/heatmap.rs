use crate::helpers::format_number;
use crate::models::{Node, NodeKind, NodeSet};

use super::{Point, RadialGradient, Rgb, Stroke, Surface, TextStyle};

pub const BACKGROUND: Rgb = Rgb(0x11, 0x11, 0x11);
pub const AXIS_COLOR: Rgb = Rgb(0x55, 0x55, 0x55);
pub const AXIS_LABEL_COLOR: Rgb = Rgb(0xaa, 0xaa, 0xaa);
pub const PRICE_LABEL_COLOR: Rgb = Rgb(0xdd, 0xdd, 0xdd);
pub const POSITIVE_STRENGTH_COLOR: Rgb = Rgb(0xff, 0xff, 0xff);
pub const NEGATIVE_STRENGTH_COLOR: Rgb = Rgb(0xff, 0x55, 0x55);
pub const LATEST_PRICE_COLOR: Rgb = Rgb(0x00, 0xff, 0x00);

pub const PLOT_LEFT: f64 = 80.0;
pub const PLOT_TOP: f64 = 20.0;
pub const PLOT_BOTTOM_MARGIN: f64 = 60.0;
pub const PLOT_RIGHT_MARGIN: f64 = 40.0;
/// The highest price sits this far below the top of the price axis.
pub const PRICE_HEADROOM: f64 = 20.0;

/// Strength axis covers `[-STRENGTH_DOMAIN, STRENGTH_DOMAIN]` regardless of
/// the nodes being drawn.
pub const STRENGTH_DOMAIN: f64 = 22.0;
pub const BASE_RADIUS: f64 = 20.0;
pub const RADIUS_PER_STRENGTH: f64 = 1.2;
pub const GRADIENT_RADIUS: f64 = 35.0;

const AXIS_WIDTH: f64 = 2.0;
const LABEL_SIZE: f64 = 14.0;
const STRENGTH_TEXT_SIZE: f64 = 16.0;

pub fn palette(kind: NodeKind) -> RadialGradient {
    match kind {
        NodeKind::Yellow => RadialGradient {
            inner: Rgb(0xff, 0xff, 0x00),
            outer: Rgb(0xff, 0xd7, 0x00),
            radius: GRADIENT_RADIUS,
        },
        NodeKind::Purple => RadialGradient {
            inner: Rgb(0xdd, 0xa0, 0xdd),
            outer: Rgb(0x4b, 0x00, 0x82),
            radius: GRADIENT_RADIUS,
        },
    }
}

pub fn node_radius(strength: f64) -> f64 {
    BASE_RADIUS + strength.abs() * RADIUS_PER_STRENGTH
}

/// Maps prices and strengths of one node set onto a surface of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScale {
    width: f64,
    height: f64,
    price_min: f64,
    price_range: f64,
}

impl PlotScale {
    pub fn new(width: f64, height: f64, price_min: f64, price_max: f64) -> Self {
        let price_range = price_max - price_min;
        Self {
            width,
            height,
            price_min,
            price_range: if price_range == 0.0 { 1.0 } else { price_range },
        }
    }

    pub fn for_nodes(width: f64, height: f64, nodes: &NodeSet) -> Self {
        let (min, max) = nodes.price_bounds();
        Self::new(width, height, min, max)
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - PLOT_BOTTOM_MARGIN
    }

    pub fn plot_right(&self) -> f64 {
        self.width - PLOT_RIGHT_MARGIN
    }

    /// Higher prices map to smaller y (higher on screen).
    pub fn y(&self, price: f64) -> f64 {
        let plot_height = self.plot_bottom() - PLOT_TOP - PRICE_HEADROOM;
        self.plot_bottom() - (price - self.price_min) / self.price_range * plot_height
    }

    pub fn x(&self, strength: f64) -> f64 {
        let per_unit = (self.plot_right() - PLOT_LEFT) / (2.0 * STRENGTH_DOMAIN);
        PLOT_LEFT + (strength + STRENGTH_DOMAIN) * per_unit
    }

    pub fn position(&self, node: &Node) -> Point {
        Point::new(self.x(node.strength), self.y(node.price))
    }
}

/// Repaints a whole surface from a node set. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatmapRenderer;

impl HeatmapRenderer {
    /// Background, axes and axis titles only.
    pub fn render_axes<S: Surface>(&self, surface: &mut S) {
        let size = surface.size();
        let (w, h) = (size.width, size.height);
        let bottom = h - PLOT_BOTTOM_MARGIN;
        let right = w - PLOT_RIGHT_MARGIN;

        surface.clear(BACKGROUND);

        let axis = Stroke {
            color: AXIS_COLOR,
            width: AXIS_WIDTH,
            dash: None,
        };
        surface.line(Point::new(PLOT_LEFT, PLOT_TOP), Point::new(PLOT_LEFT, bottom), &axis);
        surface.line(Point::new(PLOT_LEFT, bottom), Point::new(right, bottom), &axis);

        let label = TextStyle {
            color: AXIS_LABEL_COLOR,
            size: LABEL_SIZE,
            bold: false,
            centered: false,
            rotation: 0.0,
        };
        surface.text(Point::new(10.0, h / 2.0), "Price ($)", &label);
        surface.text(
            Point::new(w / 2.0, h - 20.0),
            "Strength",
            &TextStyle {
                rotation: 90.0,
                ..label
            },
        );
    }

    pub fn render<S: Surface>(&self, nodes: &NodeSet, surface: &mut S) {
        self.render_axes(surface);

        let size = surface.size();
        let scale = PlotScale::for_nodes(size.width, size.height, nodes);

        for node in nodes {
            self.draw_node(&scale, node, surface);
        }

        let latest_y = scale.y(nodes.latest().price);
        surface.line(
            Point::new(PLOT_LEFT, latest_y),
            Point::new(scale.plot_right(), latest_y),
            &Stroke {
                color: LATEST_PRICE_COLOR,
                width: AXIS_WIDTH,
                dash: Some((5.0, 5.0)),
            },
        );
    }

    fn draw_node<S: Surface>(&self, scale: &PlotScale, node: &Node, surface: &mut S) {
        let center = scale.position(node);
        let radius = node_radius(node.strength);

        surface.gradient_circle(center, radius, &palette(node.kind));

        let strength_color = if node.strength >= 0.0 {
            POSITIVE_STRENGTH_COLOR
        } else {
            NEGATIVE_STRENGTH_COLOR
        };
        surface.text(
            Point::new(center.x, center.y + 6.0),
            &format_number(node.strength),
            &TextStyle {
                color: strength_color,
                size: STRENGTH_TEXT_SIZE,
                bold: true,
                centered: true,
                rotation: 0.0,
            },
        );
        surface.text(
            Point::new(center.x, center.y + radius + 18.0),
            &format!("${}", format_number(node.price)),
            &TextStyle {
                color: PRICE_LABEL_COLOR,
                size: LABEL_SIZE,
                bold: false,
                centered: true,
                rotation: 0.0,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, Recorder, Size};
    use approx::assert_relative_eq;

    fn node(price: f64, strength: f64, kind: NodeKind) -> Node {
        Node::new(price, strength, kind)
    }

    fn set(nodes: Vec<Node>) -> NodeSet {
        NodeSet::new(nodes).unwrap()
    }

    #[test]
    fn test_render_is_idempotent() {
        let nodes = NodeSet::fallback();
        let mut first = Recorder::new(Size::new(800.0, 500.0));
        let mut second = Recorder::new(Size::new(800.0, 500.0));
        HeatmapRenderer.render(&nodes, &mut first);
        HeatmapRenderer.render(&nodes, &mut second);
        assert_eq!(first.commands(), second.commands());

        // repainting the same surface replaces, not appends
        HeatmapRenderer.render(&nodes, &mut first);
        assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn test_render_command_layout() {
        let nodes = NodeSet::fallback();
        let mut recorder = Recorder::new(Size::new(800.0, 500.0));
        HeatmapRenderer.render(&nodes, &mut recorder);

        let commands = recorder.commands();
        // clear, 2 axes, 2 axis labels, 3 per node, reference line
        assert_eq!(commands.len(), 5 + 3 * nodes.len() + 1);
        assert_eq!(commands[0], DrawCommand::Clear(BACKGROUND));
        assert_eq!(recorder.circles().count(), 5);

        match commands.last().unwrap() {
            DrawCommand::Line { from, to, stroke } => {
                assert_eq!(stroke.dash, Some((5.0, 5.0)));
                assert_eq!(stroke.color, LATEST_PRICE_COLOR);
                assert_relative_eq!(from.x, PLOT_LEFT);
                assert_relative_eq!(to.x, 760.0);
                // latest node is the most expensive of the fallback set
                assert_relative_eq!(from.y, PLOT_TOP + PRICE_HEADROOM);
            }
            other => panic!("expected reference line, got {:?}", other),
        }
    }

    #[test]
    fn test_x_depends_only_on_strength() {
        let nodes = set(vec![
            node(100.0, 5.0, NodeKind::Yellow),
            node(250.0, 5.0, NodeKind::Purple),
            node(900.0, 5.0, NodeKind::Yellow),
        ]);
        let mut recorder = Recorder::new(Size::new(800.0, 500.0));
        HeatmapRenderer.render(&nodes, &mut recorder);

        let xs: Vec<f64> = recorder.circles().map(|(c, _, _)| c.x).collect();
        assert!(xs.iter().all(|x| *x == xs[0]));
        // (5 + 22) * 680 / 44 + 80
        assert_relative_eq!(xs[0], 497.272_727_272_727_3, epsilon = 1e-9);
    }

    #[test]
    fn test_y_depends_only_on_price() {
        let nodes = set(vec![
            node(100.0, -11.0, NodeKind::Yellow),
            node(100.0, 0.0, NodeKind::Purple),
            node(100.0, 11.0, NodeKind::Yellow),
            node(200.0, 3.0, NodeKind::Purple),
        ]);
        let mut recorder = Recorder::new(Size::new(800.0, 500.0));
        HeatmapRenderer.render(&nodes, &mut recorder);

        let ys: Vec<f64> = recorder.circles().map(|(c, _, _)| c.y).collect();
        assert_relative_eq!(ys[0], 440.0);
        assert_relative_eq!(ys[1], 440.0);
        assert_relative_eq!(ys[2], 440.0);
        assert_relative_eq!(ys[3], 40.0);
    }

    #[test]
    fn test_strength_scale_is_fixed_across_sets() {
        let narrow = PlotScale::for_nodes(800.0, 500.0, &set(vec![node(1.0, 2.0, NodeKind::Yellow)]));
        let wide = PlotScale::for_nodes(800.0, 500.0, &NodeSet::fallback());
        assert_relative_eq!(narrow.x(2.0), wide.x(2.0));
        assert_relative_eq!(wide.x(-22.0), PLOT_LEFT);
        assert_relative_eq!(wide.x(22.0), 760.0);
    }

    #[test]
    fn test_single_price_does_not_produce_nan() {
        let nodes = set(vec![node(57.0, 1.0, NodeKind::Yellow), node(57.0, -1.0, NodeKind::Purple)]);
        let mut recorder = Recorder::new(Size::new(800.0, 500.0));
        HeatmapRenderer.render(&nodes, &mut recorder);
        for (center, radius, _) in recorder.circles() {
            assert!(center.x.is_finite() && center.y.is_finite() && radius.is_finite());
            assert_relative_eq!(center.y, 440.0);
        }
    }

    #[test]
    fn test_radius_and_palette() {
        assert_relative_eq!(node_radius(0.0), 20.0);
        assert_relative_eq!(node_radius(-10.0), 32.0);
        assert_eq!(palette(NodeKind::Yellow).outer, Rgb(0xff, 0xd7, 0x00));
        assert_eq!(palette(NodeKind::Purple).outer, Rgb(0x4b, 0x00, 0x82));
    }

    #[test]
    fn test_node_labels() {
        let nodes = set(vec![node(220.5, -12.4, NodeKind::Purple)]);
        let mut recorder = Recorder::new(Size::new(800.0, 500.0));
        HeatmapRenderer.render(&nodes, &mut recorder);

        let texts: Vec<(&str, Rgb)> = recorder
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, style, .. } => Some((text.as_str(), style.color)),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&("-12.4", NEGATIVE_STRENGTH_COLOR)));
        assert!(texts.contains(&("$220.5", PRICE_LABEL_COLOR)));
        assert!(texts.contains(&("Strength", AXIS_LABEL_COLOR)));
    }

    #[test]
    fn test_render_axes_only() {
        let mut recorder = Recorder::new(Size::new(800.0, 500.0));
        HeatmapRenderer.render_axes(&mut recorder);
        assert_eq!(recorder.commands().len(), 5);
        assert_eq!(recorder.circles().count(), 0);
    }
}
