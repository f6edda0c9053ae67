use std::{
    fs::File,
    io::{self, stdout, Stdout},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use tick_tetris::{Command, GameEvent, GameState, Shape, Snapshot, BOARD_HEIGHT, BOARD_WIDTH};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "tick-tetris", about = "Falling-block puzzle in the terminal")]
struct Args {
    /// Seed for shape selection; omit for a different game every run
    #[arg(long)]
    seed: Option<u64>,

    /// Input poll / redraw interval in milliseconds
    #[arg(long, default_value_t = 20)]
    frame_ms: u64,

    /// Write logs here (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Parse arguments and exit immediately
    #[arg(long)]
    noop: bool,
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    Ok(())
}

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";

fn shape_color(shape: Shape) -> Color {
    match shape {
        Shape::I => Color::Cyan,
        Shape::O => Color::Yellow,
        Shape::T => Color::Magenta,
        Shape::S => Color::Green,
        Shape::Z => Color::Red,
        Shape::J => Color::Blue,
        Shape::L => Color::Rgb(255, 165, 0),
    }
}

fn clear_name(lines: u32) -> &'static str {
    match lines {
        1 => "Single",
        2 => "Double",
        3 => "Triple",
        _ => "Tetris!",
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(frame: &mut Frame, view: &Snapshot, last_clear: Option<u32>) {
    let area = frame.size();

    let grid_display_width = (BOARD_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = BOARD_HEIGHT as u16 + 2;
    let info_width = 20;
    let total_width = grid_display_width + info_width;
    let total_height = grid_display_height + 2;

    let main_area = centered_rect(total_width, total_height, area);
    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    let game_row = vertical[0];
    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(info_width),
    ])
    .split(game_row);

    render_board(frame, view, horizontal[0]);
    render_info(frame, view, last_clear, horizontal[1]);

    let controls_area = Rect {
        x: area.x,
        y: game_row.y + game_row.height,
        width: area.width,
        height: 1,
    };
    if controls_area.y < area.height {
        let controls = Paragraph::new(Line::from(
            "←→: Move | ↑: Rotate | ↓: Soft drop | Space: Hard drop | R: Reset | Q: Quit",
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(controls, controls_area);
    }

    if view.game_over {
        render_game_over(frame, view, area);
    }
}

fn render_board(frame: &mut Frame, view: &Snapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tetris ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let board = view.composed();
    let lines: Vec<Line> = board
        .rows()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&cell| match Shape::from_cell_value(cell) {
                    Some(shape) => Span::styled(BLOCK_CHAR, Style::default().fg(shape_color(shape))),
                    None => Span::raw(EMPTY_CHAR),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, view: &Snapshot, last_clear: Option<u32>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", view.score)),
        Line::from(""),
        Line::from(Span::styled("Level", Style::default().fg(Color::Green))),
        Line::from(format!("{}", view.level)),
        Line::from(""),
        Line::from(Span::styled("Lines", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}", view.lines)),
    ];
    if let Some(cleared) = last_clear {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            clear_name(cleared),
            Style::default().fg(Color::Magenta),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, view: &Snapshot, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", view.score)),
        Line::from(format!("Lines: {}", view.lines)),
        Line::from(format!("Level: {}", view.level)),
        Line::from(""),
        Line::from(Span::styled(
            "R to restart, Q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(paragraph, centered_rect(26, 11, area));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Input
// ============================================================================

enum Input {
    Play(Command),
    Reset,
}

/// Waits up to `timeout` for one key press.
fn poll_input(timeout: Duration) -> io::Result<Input> {
    if !event::poll(timeout)? {
        return Ok(Input::Play(Command::None));
    }
    let Event::Key(key) = event::read()? else {
        return Ok(Input::Play(Command::None));
    };
    if key.kind != KeyEventKind::Press {
        return Ok(Input::Play(Command::None));
    }
    let command = match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => return Ok(Input::Reset),
        KeyCode::Left => Command::Left,
        KeyCode::Right => Command::Right,
        KeyCode::Up => Command::RotateCw,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Char(' ') => Command::HardDrop,
        _ => Command::None,
    };
    Ok(Input::Play(command))
}

// ============================================================================
// Main Loop
// ============================================================================

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, args: &Args) -> Result<()> {
    let mut game = match args.seed {
        Some(seed) => GameState::with_seed(seed),
        None => GameState::new(),
    };
    let frame = Duration::from_millis(args.frame_ms);
    let mut last_clear = None;
    let mut last_tick = Instant::now();

    loop {
        let view = game.snapshot();
        terminal.draw(|f| render(f, &view, last_clear))?;

        let command = match poll_input(frame)? {
            Input::Play(Command::Quit) => break,
            Input::Play(command) => command,
            Input::Reset => {
                match args.seed {
                    Some(seed) => game.reset_with_seed(seed),
                    None => game.reset(),
                }
                last_clear = None;
                last_tick = Instant::now();
                Command::None
            }
        };

        let elapsed_ms = last_tick.elapsed().as_millis() as u64;
        last_tick += Duration::from_millis(elapsed_ms);
        game.tick(elapsed_ms, command);

        for event in game.take_events() {
            match event {
                GameEvent::LinesCleared(n) => last_clear = Some(n),
                GameEvent::GameReset => last_clear = None,
                _ => {}
            }
        }
    }

    info!(score = game.score(), lines = game.lines(), "quit");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.noop {
        println!("Arguments parsed successfully (--noop mode)");
        return Ok(());
    }
    init_logging(&args)?;
    info!(seed = ?args.seed, frame_ms = args.frame_ms, "starting");

    enable_raw_mode().context("failed to enable raw mode")?;
    let result = open_terminal().and_then(|mut terminal| run(&mut terminal, &args));

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Everything after raw mode; failures here still reach the restore in `main`.
fn open_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    stdout()
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))
        .context("failed to create terminal")?;
    Ok(terminal)
}
