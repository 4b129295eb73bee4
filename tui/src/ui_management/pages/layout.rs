use ratatui::{prelude::*, widgets::*};

use crate::ui_management::components::usage::{widget_usage_to_text, UsageInfo};

const APP_TITLE: &str = "Trivia";

/// Splits the whole frame into the page body and the usage footer below it
pub fn split_page(area: Rect, usage: &UsageInfo) -> (Rect, Rect) {
    // lines + description + borders
    let usage_height = usage.lines.len() as u16 + u16::from(usage.description.is_some()) + 2;

    let [body, footer] = *Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(usage_height)].as_ref())
        .split(area)
    else {
        panic!("The page layout should have 2 chunks")
    };

    (body, footer)
}

/// A rect of the given size in the middle of `area`, shrunk to fit when `area` is smaller
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn page_block<'a>(title: &str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {APP_TITLE} · {title} "))
}

pub fn render_usage<B: Backend>(frame: &mut Frame<B>, usage: UsageInfo, area: Rect) {
    let usage = Paragraph::new(widget_usage_to_text(usage))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Usage"));

    frame.render_widget(usage, area);
}

/// Full screen status view: a heading and a few centered lines of text
pub fn render_status<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    heading: &str,
    lines: Vec<Line<'_>>,
) {
    let block = page_block(heading);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut text = vec![
        Line::from(Span::from(heading.to_string()).bold()),
        Line::from(""),
    ];
    text.extend(lines);

    let height = text.len() as u16;
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered_rect(inner.width, height, inner));
}
