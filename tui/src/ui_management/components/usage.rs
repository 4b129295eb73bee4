use ratatui::{
    style::Stylize,
    text::{Line, Span, Text},
};

/// A key binding hint such as "(Enter) to join"
#[derive(Debug, Clone)]
pub struct UsageInfoLine {
    pub keys: Vec<String>,
    pub description: String,
}

impl UsageInfoLine {
    pub fn new(keys: &[&str], description: &str) -> Self {
        UsageInfoLine {
            keys: keys.iter().map(|key| String::from(*key)).collect(),
            description: String::from(description),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UsageInfo {
    pub description: Option<String>,
    pub lines: Vec<UsageInfoLine>,
}

pub trait HasUsageInfo {
    fn usage_info(&self) -> UsageInfo;
}

fn key_to_span<'a>(key: &str) -> Span<'a> {
    Span::from(format!("({})", key)).bold()
}

/// Joins the keys of a binding as "(a)", "(a) or (b)" or "(a), (b), or (c)"
fn bindings_to_spans<'a>(keys: &[String]) -> Vec<Span<'a>> {
    let Some((last, rest)) = keys.split_last() else {
        return vec![];
    };
    if rest.is_empty() {
        return vec![key_to_span(last)];
    }

    let separator = if rest.len() == 1 { " or " } else { ", " };
    let mut spans: Vec<Span> = Vec::with_capacity(keys.len() * 2);
    for key in rest {
        spans.push(key_to_span(key));
        spans.push(separator.into());
    }
    if rest.len() > 1 {
        spans.push("or ".into());
    }
    spans.push(key_to_span(last));

    spans
}

pub fn widget_usage_to_text<'a>(usage: UsageInfo) -> Text<'a> {
    let mut lines: Vec<Line> = vec![];
    if let Some(description) = usage.description {
        lines.push(Line::from(description));
    }

    for wuk in usage.lines {
        let mut bindings = bindings_to_spans(&wuk.keys);
        bindings.push(Span::from(format!(" {}", wuk.description)));

        lines.push(Line::from(bindings));
    }

    Text::from(lines)
}
