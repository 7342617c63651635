mod config;
mod games;
mod generator;
mod input;
mod logging;
mod schedule;
mod score;
mod scorebook;
mod session;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use config::LaunchConfig;
use games::{create_game, AppState, GameSetup};
use input::{is_narrow_layout, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::{Frame, Terminal};
use ratzilla::{DomBackend, WebRenderer};
use score::{ScoreRecord, ScoreReporter};
use scorebook::ScoreBook;
use session::GameKind;
use time::{FrameClock, TICKS_PER_SEC};
use widgets::{ClickableList, TabBar};

/// Shared action: leave the current game for the menu.
pub const BACK_TO_MENU: u16 = 1000;
/// Game tabs: `TAB_BASE + GameKind::index()`.
pub const TAB_BASE: u16 = 1001;

struct App {
    state: AppState,
    config: LaunchConfig,
    scores: Rc<RefCell<ScoreBook>>,
    clock: FrameClock,
}

impl App {
    fn new(config: LaunchConfig, scores: ScoreBook) -> Self {
        let mut app = Self {
            state: AppState::Menu,
            config,
            scores: Rc::new(RefCell::new(scores)),
            clock: FrameClock::new(TICKS_PER_SEC),
        };
        if let Some(kind) = app.config.game {
            app.open(kind);
        }
        app
    }

    /// A reporter that files finished sessions in the score book.
    fn reporter(&self) -> ScoreReporter {
        let scores = Rc::clone(&self.scores);
        ScoreReporter::new(
            self.config.session.clone(),
            Box::new(move |record: &ScoreRecord| {
                let mut book = scores.borrow_mut();
                if book.record(record) {
                    log::info!("new best for {}: {}", record.game_id(), record.score);
                }
                if let Err(e) = scorebook::save(&book) {
                    log::warn!("score book not saved: {}", e);
                }
            }),
        )
    }

    fn open(&mut self, kind: GameKind) {
        log::debug!("opening {}", kind.title());
        let game = create_game(
            kind,
            GameSetup {
                difficulty: self.config.difficulty,
                reporter: self.reporter(),
            },
        );
        self.state = AppState::Playing { game };
    }

    fn current(&self) -> Option<GameKind> {
        match &self.state {
            AppState::Menu => None,
            AppState::Playing { game } => Some(game.kind()),
        }
    }

    fn back_to_menu(&mut self) {
        self.state = AppState::Menu;
    }

    fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Click(BACK_TO_MENU) => self.back_to_menu(),
            InputEvent::Click(id) if (TAB_BASE..TAB_BASE + 3).contains(id) => {
                if let Some(&kind) = GameKind::ALL.get((id - TAB_BASE) as usize) {
                    // Re-tapping the active tab keeps the game running.
                    if self.current() != Some(kind) {
                        self.open(kind);
                    }
                }
            }
            _ => {
                if let AppState::Playing { game } = &mut self.state {
                    game.handle_input(event);
                } else if let InputEvent::Key(c @ '1'..='3') = event {
                    self.open(GameKind::ALL[(*c as u8 - b'1') as usize]);
                }
            }
        }
    }

    /// Feed a frame timestamp and run the active game's ticks.
    fn advance(&mut self, now_ms: f64) {
        let ticks = self.clock.update(now_ms);
        if let AppState::Playing { game } = &mut self.state {
            game.tick(ticks);
        }
    }
}

/// Position of a pointer event relative to the terminal grid, with the
/// grid's pixel size.
fn grid_relative(mouse_x: u32, mouse_y: u32) -> Option<(f64, f64, f64, f64)> {
    let document = web_sys::window()?.document()?;
    // DomBackend renders its grid as the first <div> in <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();
    Some((
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    ))
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
fn launch_config() -> (LaunchConfig, Vec<config::ConfigError>) {
    LaunchConfig::from_location()
}

#[cfg(not(target_arch = "wasm32"))]
fn launch_config() -> (LaunchConfig, Vec<config::ConfigError>) {
    LaunchConfig::from_query(&std::env::args().nth(1).unwrap_or_default())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let (config, errors) = launch_config();
    logging::init(config.log_level);
    for e in &errors {
        log::warn!("launch config: {} (using default)", e);
    }

    let app = Rc::new(RefCell::new(App::new(config, scorebook::load())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }
            let Some((x, y, width, height)) = grid_relative(mouse_event.x, mouse_event.y) else {
                return;
            };
            let action = click_state.borrow().hit_test_pixel(x, y, width, height);
            log::trace!("click at ({:.0}, {:.0}) -> {:?}", x, y, action);
            if let Some(id) = action {
                app.borrow_mut().handle(&InputEvent::Click(id));
            }
        }
    });

    terminal.on_key_event({
        let app = app.clone();
        move |key_event| {
            let mut app = app.borrow_mut();
            match key_event.code {
                KeyCode::Esc => app.back_to_menu(),
                KeyCode::Enter => app.handle(&InputEvent::Enter),
                KeyCode::Backspace => app.handle(&InputEvent::Backspace),
                KeyCode::Char(c) => app.handle(&InputEvent::Key(c.to_ascii_lowercase())),
                _ => {}
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            app.borrow_mut().advance(now_ms());
            let app = app.borrow();
            let size = f.area();
            click_state.borrow_mut().begin_frame(size.width, size.height);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(10),
                    Constraint::Length(3),
                ])
                .split(size);

            render_tabs(f, &app, chunks[0], &click_state);
            match &app.state {
                AppState::Menu => render_menu(f, &app, chunks[1], &click_state),
                AppState::Playing { game } => game.render(f, chunks[1], &click_state),
            }
            render_footer(f, &app, chunks[2], &click_state);
        }
    });

    Ok(())
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let active = app.current();
    let bar = GameKind::ALL.iter().fold(TabBar::new(" │ "), |bar, &kind| {
        let style = if Some(kind) == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        bar.tab(kind.title(), style, TAB_BASE + kind.index() as u16)
    });
    bar.block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" 🧠 Brain Games "),
    )
    .render(f, area, &mut click_state.borrow_mut());
}

fn render_menu(f: &mut Frame, app: &App, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let borders = if is_narrow_layout(area.width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };
    let scores = app.scores.borrow();
    let session = app.config.session.as_deref();

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " Pick a game to train your brain!",
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    for (i, kind) in GameKind::ALL.iter().enumerate() {
        let best = match scores.best(session, *kind) {
            Some(b) => format!("best {}", b),
            None => "not played yet".to_string(),
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] {:<14}", i + 1, kind.title()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(best, Style::default().fg(Color::DarkGray)),
            ]),
            TAB_BASE + kind.index() as u16,
        );
    }

    let top = if borders.contains(Borders::TOP) { 1 } else { 0 };
    let bottom = if borders.contains(Borders::BOTTOM) { 1 } else { 0 };
    cl.register_targets(area, &mut click_state.borrow_mut(), top, bottom);

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Menu ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let text = match app.state {
        AppState::Menu => "Tap a game or press 1-3",
        AppState::Playing { .. } => "◀ Menu (Esc)",
    };
    let help = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);

    if let AppState::Playing { .. } = app.state {
        click_state.borrow_mut().add_click_target(area, BACK_TO_MENU);
    }
}
