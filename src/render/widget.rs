use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line},
        Block, Widget,
    },
};

use super::{DrawCommand, Point, RadialGradient, Size, Stroke, TextStyle};

const GRADIENT_RINGS: usize = 12;

/// Paints a recorded display list onto a braille [`Canvas`]. Logical pixel
/// coordinates are kept as canvas bounds so the picture scales with the
/// terminal area; y is flipped because the canvas origin is bottom-left.
pub struct HeatmapWidget<'a> {
    commands: &'a [DrawCommand],
    size: Size,
    block: Option<Block<'a>>,
}

impl<'a> HeatmapWidget<'a> {
    pub fn new(commands: &'a [DrawCommand], size: Size) -> Self {
        Self {
            commands,
            size,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

fn dash_segments(from: Point, to: Point, on: f64, off: f64) -> Vec<(Point, Point)> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 || on <= 0.0 {
        return vec![(from, to)];
    }
    let (ux, uy) = (dx / length, dy / length);
    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + on).min(length);
        segments.push((
            Point::new(from.x + ux * start, from.y + uy * start),
            Point::new(from.x + ux * end, from.y + uy * end),
        ));
        start += on + off.max(0.0);
    }
    segments
}

struct Painter {
    height: f64,
    /// Logical pixels per terminal column.
    cell_width: f64,
}

impl Painter {
    fn line(&self, ctx: &mut Context<'_>, from: Point, to: Point, stroke: &Stroke) {
        let segments = match stroke.dash {
            Some((on, off)) => dash_segments(from, to, on, off),
            None => vec![(from, to)],
        };
        for (a, b) in segments {
            ctx.draw(&Line {
                x1: a.x,
                y1: self.height - a.y,
                x2: b.x,
                y2: self.height - b.y,
                color: stroke.color.into(),
            });
        }
    }

    fn circle(&self, ctx: &mut Context<'_>, center: Point, radius: f64, fill: &RadialGradient) {
        for ring in 0..GRADIENT_RINGS {
            let r = radius * (GRADIENT_RINGS - ring) as f64 / GRADIENT_RINGS as f64;
            let color = fill.inner.lerp(fill.outer, r / fill.radius);
            ctx.draw(&Circle {
                x: center.x,
                y: self.height - center.y,
                radius: r,
                color: color.into(),
            });
        }
    }

    fn text(&self, ctx: &mut Context<'_>, at: Point, text: &str, style: &TextStyle) {
        let mut span_style = Style::default().fg(style.color.into());
        if style.bold {
            span_style = span_style.add_modifier(Modifier::BOLD);
        }
        let x = if style.centered {
            at.x - text.chars().count() as f64 * self.cell_width / 2.0
        } else {
            at.x
        };
        ctx.print(
            x,
            self.height - at.y,
            TextLine::from(Span::styled(text.to_string(), span_style)),
        );
    }
}

impl Widget for HeatmapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let background = self
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Clear(color) => Some(Color::from(*color)),
                _ => None,
            })
            .unwrap_or(Color::Reset);
        let painter = Painter {
            height: self.size.height,
            cell_width: self.size.width / inner.width.max(1) as f64,
        };
        let commands = self.commands;

        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(background)
            .x_bounds([0.0, self.size.width])
            .y_bounds([0.0, self.size.height])
            .paint(move |ctx| {
                for command in commands {
                    match command {
                        DrawCommand::Clear(_) => {}
                        DrawCommand::Line { from, to, stroke } => {
                            painter.line(ctx, *from, *to, stroke)
                        }
                        DrawCommand::Circle {
                            center,
                            radius,
                            fill,
                        } => painter.circle(ctx, *center, *radius, fill),
                        DrawCommand::Text { .. } => {}
                    }
                }
                // labels on top of the shapes
                ctx.layer();
                for command in commands {
                    if let DrawCommand::Text { at, text, style } = command {
                        painter.text(ctx, *at, text, style);
                    }
                }
            });
        if let Some(block) = self.block {
            canvas = canvas.block(block);
        }
        canvas.render(area, buf);
    }
}
