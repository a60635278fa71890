//! Bordered pane with focus styling, an optional number hint and a badge.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::{
    style_focused_border, style_unfocused_border, C_MUTED, C_NUMBER_HINT, C_PANEL_BORDER,
    C_PRIMARY, C_SECONDARY,
};

/// Text shown right-aligned in the pane header (e.g. "ERR", "12 rows").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

fn title_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    }
}

/// Block titled `[N] title`, purple-bordered when focused.
pub fn pane_chrome<'a>(
    title: &'a str,
    number_key: Option<char>,
    focused: bool,
    badge: Option<Badge<'a>>,
) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let mut title_spans = Vec::with_capacity(2);
    if let Some(key) = number_key {
        title_spans.push(Span::styled(
            format!("[{}] ", key),
            Style::default().fg(C_NUMBER_HINT),
        ));
    }
    title_spans.push(Span::styled(title, title_style(focused)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title_spans));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}

/// One-line strip standing in for a hidden pane: ` ▸ title  summary`.
pub fn draw_hidden_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    summary: Option<&str>,
    focused: bool,
) {
    if area.height == 0 {
        return;
    }
    let mut spans = vec![
        Span::styled(" ▸ ", Style::default().fg(C_PANEL_BORDER)),
        Span::styled(title, title_style(focused)),
    ];
    if let Some(s) = summary.filter(|s| !s.is_empty()) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(s, Style::default().fg(C_SECONDARY)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
