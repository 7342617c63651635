//! Memory Match rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::time::format_clock;
use crate::widgets::{render_log, ButtonGrid, ClickableList};

use super::actions::*;
use super::card_key;
use super::state::{Card, MemoryPhase, MemoryState, BOARD_COLUMNS};

pub fn render(
    state: &MemoryState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };
    let card_height = if is_narrow { 2 } else { 3 };
    let board = board_grid(state, card_height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(board.height() + 2),
            Constraint::Length(4),
            Constraint::Min(3),
        ])
        .split(area);

    render_header(state, f, chunks[0], borders);

    let board_block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Cards ");
    let inner = board_block.inner(chunks[1]);
    f.render_widget(board_block, chunks[1]);
    board.render(f, inner, &mut click_state.borrow_mut());

    render_controls(state, f, chunks[2], borders, click_state);
    render_log(f, chunks[3], &state.log, borders);
}

fn render_header(state: &MemoryState, f: &mut Frame, area: Rect, borders: Borders) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Moves: ", label),
            Span::styled(state.moves.to_string(), value),
            Span::styled("   Matches: ", label),
            Span::styled(format!("{}/{}", state.matches, state.total_pairs()), value),
        ]),
        Line::from(vec![
            Span::styled(" Time: ", label),
            Span::styled(format_clock(state.session.elapsed_secs()), value),
        ]),
    ];
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Memory Match ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn board_grid(state: &MemoryState, card_height: u16) -> ButtonGrid<'static> {
    // Face-down cards only take taps while no pair is waiting to resolve.
    let accepting = state.phase == MemoryPhase::Running && !state.pair_pending();
    state
        .board
        .iter()
        .enumerate()
        .fold(ButtonGrid::new(BOARD_COLUMNS, card_height), |grid, (i, card)| {
            let action = (accepting && !card.is_visible()).then(|| SELECT_CARD_BASE + i as u16);
            grid.button(card_label(i, card), card_style(card), action)
        })
}

fn card_label(index: usize, card: &Card) -> Line<'static> {
    if card.is_visible() {
        Line::from(card.symbol)
    } else {
        let key = card_key(index).map(|c| c.to_string()).unwrap_or_default();
        Line::from(format!("{} ?", key))
    }
}

fn card_style(card: &Card) -> Style {
    if card.matched {
        Style::default().fg(Color::Green)
    } else if card.face_up {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    }
}

fn render_controls(
    state: &MemoryState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    if state.phase == MemoryPhase::Won {
        cl.push(Line::from(Span::styled(
            format!(" 🎉 Congratulations! Score: {}", state.session.score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        cl.push(Line::from(Span::styled(
            " Tap a card or press its letter",
            Style::default().fg(Color::DarkGray),
        )));
    }
    cl.push_clickable(
        Line::from(Span::styled(
            " [Enter] New Game",
            Style::default().fg(Color::Green),
        )),
        NEW_GAME,
    );

    let top = if borders.contains(Borders::TOP) { 1 } else { 0 };
    let bottom = if borders.contains(Borders::BOTTOM) { 1 } else { 0 };
    cl.register_targets(area, &mut click_state.borrow_mut(), top, bottom);

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green));
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}
