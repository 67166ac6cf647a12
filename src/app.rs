use std::sync::Arc;

use log::{debug, error};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc;

use crate::controller::{Controller, LoadTicket};
use crate::loader::{DataLoader, LoadOutcome};
use crate::models::DateRange;
use crate::polygon::AggregatesSource;
use crate::render::{HeatmapRenderer, HeatmapWidget, Recorder, Size, Surface};

const ERROR_COLOR: Color = Color::Rgb(0xff, 0x6b, 0x6b);
const INFO_COLOR: Color = Color::Rgb(0xff, 0xd7, 0x00);

pub type Completion = (LoadTicket, LoadOutcome);

/// What started a load. All of them end up in [`App::request_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Startup,
    Enter,
    LoadKey,
}

pub struct App<S> {
    pub input: String,
    pub should_quit: bool,
    controller: Controller,
    loader: Arc<DataLoader<S>>,
    range: DateRange,
    seed: Option<u64>,
    canvas: Recorder,
    tx: mpsc::UnboundedSender<Completion>,
}

impl<S: AggregatesSource + 'static> App<S> {
    pub fn new(
        loader: DataLoader<S>,
        symbol: &str,
        range: DateRange,
        seed: Option<u64>,
        size: Size,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut canvas = Recorder::new(size);
        HeatmapRenderer.render_axes(&mut canvas);
        let app = Self {
            input: symbol.to_string(),
            should_quit: false,
            controller: Controller::new(),
            loader: Arc::new(loader),
            range,
            seed,
            canvas,
            tx,
        };
        (app, rx)
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn canvas(&self) -> &Recorder {
        &self.canvas
    }

    /// Starts a background load for the current input. The result comes back
    /// through the receiver returned by [`App::new`].
    pub fn request_load(&mut self, trigger: Trigger) -> LoadTicket {
        let ticket = self.controller.request_load(&self.input, self.range);
        debug!("{:?} triggered load #{}", trigger, ticket.seq);
        self.input = ticket.symbol.clone();

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(ticket.seq)),
            None => StdRng::from_os_rng(),
        };
        let loader = self.loader.clone();
        let tx = self.tx.clone();
        let task_ticket = ticket.clone();
        tokio::spawn(async move {
            let outcome = loader
                .load(&task_ticket.symbol, task_ticket.range, &mut rng)
                .await;
            if let Err(e) = tx.send((task_ticket, outcome)) {
                error!("Failed to deliver load result: {}", e);
            }
        });
        ticket
    }

    /// Applies a finished load and repaints; stale results are ignored.
    pub fn on_complete(&mut self, (ticket, outcome): Completion) -> bool {
        if !self.controller.complete(&ticket, outcome) {
            return false;
        }
        if let Some(nodes) = self.controller.nodes() {
            HeatmapRenderer.render(nodes, &mut self.canvas);
        }
        true
    }

    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let input = Paragraph::new(Line::from(vec![
            Span::raw(self.input.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]))
        .block(Block::default().borders(Borders::ALL).title(" Ticker "));
        frame.render_widget(input, chunks[0]);

        let status = self.controller.status();
        let color = if status.is_error { ERROR_COLOR } else { INFO_COLOR };
        let status = Paragraph::new(Span::styled(status.message.as_str(), Style::default().fg(color)))
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        frame.render_widget(status, chunks[1]);

        let heatmap = HeatmapWidget::new(self.canvas.commands(), self.canvas.size())
            .block(Block::default().borders(Borders::ALL).title(" Heatmap "));
        frame.render_widget(heatmap, chunks[2]);

        let keys = Paragraph::new(Span::styled(
            "Enter/F5 load  Esc quit",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(keys, chunks[3]);
    }
}
