use std::fs::File;
use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::info;
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use nodeheat::{
    app::{App, Completion, Trigger},
    cli::Args,
    loader::DataLoader,
    polygon::PolygonClient,
};

fn init_logging(args: &Args) -> Result<()> {
    // the alternate screen must not receive log lines
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            env_logger::Builder::from_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None if std::env::var_os("RUST_LOG").is_some() => env_logger::init(),
        None => {}
    }
    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<PolygonClient>,
    rx: &mut mpsc::UnboundedReceiver<Completion>,
) -> Result<()> {
    let mut events = EventStream::new();
    app.request_load(Trigger::Startup);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else { break };
                if let Event::Key(key) = event? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Esc => app.should_quit = true,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.should_quit = true;
                        }
                        KeyCode::Enter => {
                            app.request_load(Trigger::Enter);
                        }
                        KeyCode::F(5) => {
                            app.request_load(Trigger::LoadKey);
                        }
                        KeyCode::Backspace => {
                            app.input.pop();
                        }
                        KeyCode::Char(c) if !c.is_whitespace() => app.input.push(c),
                        _ => {}
                    }
                }
            }
            Some(done) = rx.recv() => {
                app.on_complete(done);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    info!("Starting nodeheat for {}", args.symbol);

    let client = PolygonClient::new(&args.base_url, &args.api_key, args.timeout.as_std())?;
    let loader = DataLoader::with_node_count(client, args.nodes);
    let (mut app, mut rx) = App::new(
        loader,
        &args.symbol,
        args.date_range(),
        args.seed,
        args.canvas_size(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
    Ok(())
}
