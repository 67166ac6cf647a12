mod heatmap;
mod svg;
mod widget;

pub use heatmap::*;
pub use svg::SvgSurface;
pub use widget::HeatmapWidget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(800.0, 500.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Linear blend, `t = 0` is `self` and `t = 1` is `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        ratatui::style::Color::Rgb(c.0, c.1, c.2)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
    /// `(dash, gap)` lengths; `None` draws a solid line.
    pub dash: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Rgb,
    pub size: f64,
    pub bold: bool,
    pub centered: bool,
    /// Degrees, counter-clockwise.
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub inner: Rgb,
    pub outer: Rgb,
    /// Distance from the centre at which `outer` is reached.
    pub radius: f64,
}

/// 2D drawing target in logical pixels, origin top-left, y pointing down.
pub trait Surface {
    fn size(&self) -> Size;
    fn clear(&mut self, color: Rgb);
    fn line(&mut self, from: Point, to: Point, stroke: &Stroke);
    fn text(&mut self, at: Point, text: &str, style: &TextStyle);
    fn gradient_circle(&mut self, center: Point, radius: f64, fill: &RadialGradient);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        at: Point,
        text: String,
        style: TextStyle,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: RadialGradient,
    },
}

/// Surface that keeps every call as a [`DrawCommand`].
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = (Point, f64, &RadialGradient)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                fill,
            } => Some((*center, *radius, fill)),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Rgb) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: stroke.clone(),
        });
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            style: style.clone(),
        });
    }

    fn gradient_circle(&mut self, center: Point, radius: f64, fill: &RadialGradient) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill: *fill,
        });
    }
}
