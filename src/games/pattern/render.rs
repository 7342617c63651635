//! Pattern Match rendering (read-only from state).

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
use super::state::{PatternColor, PatternPhase, PatternState};

pub fn color_of(color: PatternColor) -> Color {
    match color {
        PatternColor::Orange => Color::Rgb(255, 140, 0),
        PatternColor::Gold => Color::Rgb(255, 200, 40),
        PatternColor::Yellow => Color::Rgb(250, 240, 90),
        PatternColor::Sky => Color::Rgb(110, 200, 250),
        PatternColor::Pink => Color::Rgb(255, 130, 190),
        PatternColor::Blue => Color::Rgb(40, 90, 230),
    }
}

pub fn render(
    state: &PatternState,
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
    let pads = color_pads(state, if is_narrow { 2 } else { 3 });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(pads.height() + 2),
            Constraint::Min(3),
        ])
        .split(area);

    render_header(state, f, chunks[0], borders);
    render_stage(state, f, chunks[1], borders, click_state);

    let pad_block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Colors ");
    let inner = pad_block.inner(chunks[2]);
    f.render_widget(pad_block, chunks[2]);
    pads.render(f, inner, &mut click_state.borrow_mut());

    render_log(f, chunks[3], &state.log, borders);
}

fn render_header(state: &PatternState, f: &mut Frame, area: Rect, borders: Borders) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Level: ", label),
            Span::styled(state.level.to_string(), value),
            Span::styled("   Score: ", label),
            Span::styled(state.session.score.to_string(), value),
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
            " Pattern Match ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Swatches for a run of colors, two cells each.
fn swatches(colors: &[PatternColor]) -> Line<'static> {
    let spans: Vec<Span> = colors
        .iter()
        .flat_map(|&c| {
            [
                Span::styled("██", Style::default().fg(color_of(c))),
                Span::raw(" "),
            ]
        })
        .collect();
    Line::from(spans)
}

fn render_stage(
    state: &PatternState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let hint = Style::default().fg(Color::DarkGray);
    let mut cl = ClickableList::new();
    match state.phase {
        PatternPhase::Idle => {
            cl.push(Line::from(Span::styled("Remember the colors, then repeat them.", hint)));
            cl.push_clickable(start_line(" [Enter] Start Game "), START);
        }
        PatternPhase::Showing => {
            cl.push(Line::from(Span::styled(
                "Watch the pattern...",
                Style::default().fg(Color::Yellow),
            )));
            cl.push(swatches(&state.sequence));
        }
        PatternPhase::AwaitingInput => {
            cl.push(Line::from(Span::styled(
                format!(
                    "Your turn! {}/{}",
                    state.attempt.len(),
                    state.sequence.len()
                ),
                Style::default().fg(Color::Green),
            )));
            let remaining = state.sequence.len().saturating_sub(state.attempt.len());
            let mut line = swatches(&state.attempt);
            line.spans.push(Span::styled("· ".repeat(remaining), hint));
            cl.push(line);
        }
        PatternPhase::GameOver => {
            cl.push(Line::from(Span::styled(
                format!(
                    "Game Over! Final Score: {}  (levels cleared: {})",
                    state.session.score, state.levels_cleared
                ),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            cl.push(swatches(&state.sequence));
            cl.push_clickable(start_line(" [Enter] Play Again "), START);
        }
    }

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

fn start_line(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
}

fn color_pads(state: &PatternState, pad_height: u16) -> ButtonGrid<'static> {
    let accepting = state.phase == PatternPhase::AwaitingInput;
    PatternColor::ALL
        .iter()
        .fold(ButtonGrid::new(3, pad_height), |grid, &color| {
            let mut style = Style::default().fg(color_of(color));
            if !accepting {
                style = style.add_modifier(Modifier::DIM);
            }
            let index = color.index();
            let label = format!("{} {}", index + 1, color.name());
            grid.button(label, style, accepting.then(|| PICK_COLOR_BASE + index as u16))
        })
}
