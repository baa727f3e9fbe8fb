use std::fmt::Display;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Returns the option next to `current`, wrapping around at both ends.
/// Starts from the first (or last, going backwards) option when nothing is selected.
pub fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    if options.is_empty() {
        return None;
    }

    let len = options.len();
    let next_idx = match current.and_then(|current| options.iter().position(|o| *o == current)) {
        Some(idx) if forward => (idx + 1) % len,
        Some(idx) => (idx + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };

    Some(options[next_idx])
}

/// Renders the options on a single line, the selected one highlighted
pub fn options_line<'a, T: Copy + PartialEq + Display>(
    options: &[T],
    selected: Option<T>,
    enabled: bool,
) -> Line<'a> {
    let mut spans = Vec::with_capacity(options.len() * 2);

    for (idx, option) in options.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }

        let style = match (Some(*option) == selected, enabled) {
            (true, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::Black).bg(Color::Gray),
            (false, true) => Style::default(),
            (false, false) => Style::default().fg(Color::DarkGray),
        };

        spans.push(Span::styled(format!(" {} ", option), style));
    }

    Line::from(spans)
}
