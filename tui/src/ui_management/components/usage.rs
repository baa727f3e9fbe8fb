use ratatui::{
    style::Stylize,
    text::{Line, Span, Text},
};

/// One key binding hint, e.g. `(Tab) or (Shift+Tab) move between fields`
#[derive(Debug, Clone)]
pub struct UsageInfoLine {
    pub keys: Vec<&'static str>,
    pub description: String,
}

impl UsageInfoLine {
    pub fn new(keys: &[&'static str], description: impl Into<String>) -> Self {
        UsageInfoLine {
            keys: keys.to_vec(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
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

pub fn usage_to_text<'a>(usage: UsageInfo) -> Text<'a> {
    let mut lines: Vec<Line> = vec![];
    if let Some(description) = usage.description {
        lines.push(Line::from(description));
    }

    for usage_line in usage.lines {
        let mut bindings: Vec<Span> = Vec::with_capacity(usage_line.keys.len() * 2 + 1);

        for (idx, key) in usage_line.keys.iter().enumerate() {
            if idx > 0 {
                bindings.push(" or ".into());
            }
            bindings.push(key_to_span(key));
        }

        bindings.push(Span::from(format!(" {}", usage_line.description)));

        lines.push(Line::from(bindings));
    }

    Text::from(lines)
}
