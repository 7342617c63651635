//! Math Speed rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::time::format_clock;
use crate::widgets::{render_log, ButtonGrid, ClickableList};

use super::actions::*;
use super::state::{ArithmeticPhase, ArithmeticState, Difficulty, HOT_STREAK};

pub fn render(
    state: &ArithmeticState,
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
    let button_height = if is_narrow { 2 } else { 3 };

    let pad = if state.phase == ArithmeticPhase::Running {
        keypad(button_height)
    } else {
        difficulty_picker(state, button_height)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(pad.height() + 2),
            Constraint::Min(3),
        ])
        .split(area);

    render_header(state, f, chunks[0], borders);
    if state.phase == ArithmeticPhase::Running {
        render_problem(state, f, chunks[1], borders);
    } else {
        render_start(state, f, chunks[1], borders, click_state);
    }

    let title = if state.phase == ArithmeticPhase::Running {
        " Keypad "
    } else {
        " Difficulty "
    };
    let pad_block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Magenta))
        .title(title);
    let inner = pad_block.inner(chunks[2]);
    f.render_widget(pad_block, chunks[2]);
    pad.render(f, inner, &mut click_state.borrow_mut());

    render_log(f, chunks[3], &state.log, borders);
}

fn render_header(state: &ArithmeticState, f: &mut Frame, area: Rect, borders: Borders) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let time_left = state.time_left();
    let time_style = if time_left <= 10 && state.phase == ArithmeticPhase::Running {
        value.fg(Color::Red)
    } else {
        value
    };
    let streak_style = if state.streak >= HOT_STREAK {
        value.fg(Color::LightRed)
    } else {
        value
    };
    let streak = if state.streak >= HOT_STREAK {
        format!("{} 🔥", state.streak)
    } else {
        state.streak.to_string()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(state.session.score.to_string(), value),
            Span::styled("   Streak: ", label),
            Span::styled(streak, streak_style),
        ]),
        Line::from(vec![
            Span::styled(" Time: ", label),
            Span::styled(format_clock(time_left), time_style),
            Span::styled("   Answered: ", label),
            Span::styled(
                format!("{}/{}", state.correct_answers, state.total_answered),
                value,
            ),
        ]),
    ];
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" Math Speed ({}) ", state.difficulty),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_problem(state: &ArithmeticState, f: &mut Frame, area: Rect, borders: Borders) {
    let answer = if state.entry.is_empty() {
        Span::styled("type or tap a number", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            format!("{}_", state.entry.as_str()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };
    let lines = vec![
        Line::from(Span::styled(
            state.problem.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Answer: ", Style::default().fg(Color::Gray)),
            answer,
        ]),
    ];
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green));
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(widget, area);
}

fn render_start(
    state: &ArithmeticState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    if state.phase == ArithmeticPhase::Finished {
        cl.push(Line::from(Span::styled(
            format!(
                "Time's up! Final Score: {}  (best streak {})",
                state.session.score, state.best_streak
            ),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        cl.push(Line::from(Span::styled(
            "Solve as many problems as you can in 60 seconds.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let label = if state.phase == ArithmeticPhase::Finished {
        " [Enter] Play Again "
    } else {
        " [Enter] Start Game "
    };
    cl.push_clickable(
        Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        START,
    );

    let top = if borders.contains(Borders::TOP) { 1 } else { 0 };
    let bottom = if borders.contains(Borders::BOTTOM) { 1 } else { 0 };
    cl.register_targets(area, &mut click_state.borrow_mut(), top, bottom);

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green));
    let widget = Paragraph::new(cl.into_lines())
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(widget, area);
}

/// Easy / Medium / Hard buttons; the current tier is highlighted.
fn difficulty_picker(state: &ArithmeticState, height: u16) -> ButtonGrid<'static> {
    Difficulty::ALL
        .iter()
        .enumerate()
        .fold(ButtonGrid::new(3, height), |grid, (i, &d)| {
            let style = if d == state.difficulty {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let key = d.label().chars().next().unwrap_or(' ');
            grid.button(
                format!("({}) {}", key, d.label()),
                style,
                Some(DIFFICULTY_BASE + i as u16),
            )
        })
}

/// Digits 1-9 and 0, then minus, backspace and submit.
fn keypad(height: u16) -> ButtonGrid<'static> {
    let digit = Style::default().fg(Color::White);
    let mut grid = ButtonGrid::new(5, height);
    for d in (1..=9).chain(std::iter::once(0)) {
        grid = grid.button(d.to_string(), digit, Some(KEYPAD_DIGIT_BASE + d));
    }
    grid.button("−", Style::default().fg(Color::Cyan), Some(KEYPAD_MINUS))
        .button("⌫", Style::default().fg(Color::Red), Some(KEYPAD_BACKSPACE))
        .button(
            "OK",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            Some(KEYPAD_SUBMIT),
        )
}
