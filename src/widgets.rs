//! Clickable UI components.
//!
//! Each component draws itself and registers the click targets for what it
//! drew, so rows and cells can never drift out of sync with their actions.
//!
//! - [`TabBar`]: one row of game tabs.
//! - [`ClickableList`]: lines of text, some of them tappable.
//! - [`ButtonGrid`]: equal-sized buttons in rows (cards, color pads, keypad).

use ratzilla::ratatui::layout::{Alignment, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::games::GameLog;
use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// ```ignore
/// TabBar::new(" │ ")
///     .tab("Memory Match", active, TAB_MEMORY)
///     .tab("Math Speed", idle, TAB_MATH)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Bordered tab bars register their targets inside the border.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let mut spans: Vec<Span> = Vec::new();
        let sep_width = Line::from(self.separator).width() as u16;
        let mut tab_widths: Vec<(u16, u16)> = Vec::new();

        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {} ", label);
            tab_widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };

        let line = Line::from(spans);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(line).block(block),
            None => Paragraph::new(line),
        };
        f.render_widget(paragraph, area);

        // Full outer height so the border rows are tappable too.
        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with optional click actions; one logical line per row.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Best: 820"));
/// cl.push_clickable(Line::from(" [Enter] New Game"), NEW_GAME);
/// cl.register_targets(area, &mut cs, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// The target follows the line wherever it ends up.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register row targets. `top_offset`/`bottom_offset` are the rows taken
    /// by borders; lines pushed past the bottom are not registered.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row < content_end {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

// ── ButtonGrid ─────────────────────────────────────────────────

struct Button<'a> {
    label: Line<'a>,
    style: Style,
    action_id: Option<u16>,
}

/// Equal-width buttons laid out left to right, top to bottom.
///
/// Buttons with no action are drawn but never become click targets
/// (matched cards, a locked difficulty).
pub struct ButtonGrid<'a> {
    buttons: Vec<Button<'a>>,
    columns: u16,
    cell_height: u16,
}

impl<'a> ButtonGrid<'a> {
    pub fn new(columns: u16, cell_height: u16) -> Self {
        Self {
            buttons: Vec::new(),
            columns: columns.max(1),
            cell_height: cell_height.max(1),
        }
    }

    pub fn button(
        mut self,
        label: impl Into<Line<'a>>,
        style: Style,
        action_id: Option<u16>,
    ) -> Self {
        self.buttons.push(Button {
            label: label.into(),
            style,
            action_id,
        });
        self
    }

    pub fn rows(&self) -> u16 {
        (self.buttons.len() as u16).div_ceil(self.columns)
    }

    /// Height needed to show every row.
    pub fn height(&self) -> u16 {
        self.rows() * self.cell_height
    }

    /// Cell rectangle of each button, in push order. Cells that start below
    /// `area` are dropped; the last visible row may be cut short.
    pub fn layout(&self, area: Rect) -> Vec<Rect> {
        let cell_width = area.width / self.columns;
        let bottom = area.y + area.height;
        let mut rects = Vec::with_capacity(self.buttons.len());
        for i in 0..self.buttons.len() as u16 {
            let col = i % self.columns;
            let row = i / self.columns;
            let y = area.y + row * self.cell_height;
            if y >= bottom || cell_width == 0 {
                break;
            }
            let height = self.cell_height.min(bottom - y);
            rects.push(Rect::new(area.x + col * cell_width, y, cell_width, height));
        }
        rects
    }

    pub fn register_targets(&self, area: Rect, cs: &mut ClickState) {
        for (rect, button) in self.layout(area).into_iter().zip(&self.buttons) {
            if let Some(id) = button.action_id {
                cs.add_click_target(rect, id);
            }
        }
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        self.register_targets(area, cs);
        let rects = self.layout(area);
        for (rect, button) in rects.into_iter().zip(self.buttons) {
            let mut widget = Paragraph::new(button.label)
                .style(button.style)
                .alignment(Alignment::Center);
            if rect.height >= 3 {
                widget = widget.block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(button.style),
                );
            }
            f.render_widget(widget, rect);
        }
    }
}

// ── Log panel ──────────────────────────────────────────────────

/// Newest feedback lines that fit in `area`, important ones highlighted.
pub fn render_log(f: &mut Frame, area: Rect, log: &GameLog, borders: Borders) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = log
        .tail(visible)
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!(" {}", entry.text), style))
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Log "),
    );
    f.render_widget(widget, area);
}
