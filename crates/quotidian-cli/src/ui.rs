//! Widget rendering

use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::*;

use quotidian::quote::QuoteOrigin;
use quotidian::theme::{parse_hex, Theme, THEMES};
use quotidian_app::app::{AppSnapshot, NoticeKind};

/// Terminal colours for one theme
struct Palette {
    bg: Color,
    accent: Color,
    orb1: Color,
    orb2: Color,
    text: Color,
    muted: Color,
}

impl Palette {
    fn from_theme(theme: &Theme) -> Self {
        Self {
            bg: hex(theme.from),
            accent: hex(theme.accent),
            orb1: hex(theme.orb1),
            orb2: hex(theme.orb2),
            text: Color::White,
            muted: Color::Gray,
        }
    }
}

fn hex(value: &str) -> Color {
    parse_hex(value).map_or(Color::Reset, |(r, g, b)| Color::Rgb(r, g, b))
}

pub fn draw_ui(f: &mut Frame, snap: &AppSnapshot, selected: usize, now: Instant) {
    let theme = THEMES.get(snap.theme_index).unwrap_or(&THEMES[0]);
    let palette = Palette::from_theme(theme);
    let area = f.area();

    let outer = Block::default()
        .title(format!(" Quotidian v{} ", env!("CARGO_PKG_VERSION")))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.bg))
        .padding(Padding::horizontal(2));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // category + favourites count
        Constraint::Min(3),    // quote
        Constraint::Length(1), // author
        Constraint::Length(1), // status line
        Constraint::Length(5), // notice
        Constraint::Length(1), // help bar
    ])
    .split(inner);

    draw_header(f, snap, &palette, chunks[0]);
    draw_quote(f, snap, &palette, chunks[1]);
    draw_author(f, snap, &palette, chunks[2]);
    draw_status(f, snap, &palette, chunks[3]);
    draw_notice(f, snap, &palette, chunks[4], now);
    draw_help(f, &palette, chunks[5]);

    if snap.drawer_open {
        draw_drawer(f, snap, &palette, selected, area);
    }
}

fn draw_header(f: &mut Frame, snap: &AppSnapshot, palette: &Palette, area: Rect) {
    let cols = Layout::horizontal([Constraint::Min(10), Constraint::Length(16)]).split(area);

    let mut left = Vec::new();
    if let Some(current) = &snap.current {
        left.push(Span::styled(
            format!(" {} ", current.category.to_uppercase()),
            Style::default().fg(palette.bg).bg(palette.orb1).bold(),
        ));
        if current.origin != QuoteOrigin::Remote {
            left.push(Span::raw("  "));
            left.push(Span::styled("offline", Style::default().fg(palette.muted).italic()));
        }
    }
    f.render_widget(Paragraph::new(Line::from(left)), cols[0]);

    let count = Line::from(vec![
        Span::styled("\u{2665} ", Style::default().fg(palette.accent)),
        Span::styled(
            format!("{} saved", snap.favourite_count),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(count).alignment(Alignment::Right), cols[1]);
}

fn draw_quote(f: &mut Frame, snap: &AppSnapshot, palette: &Palette, area: Rect) {
    let mut style = Style::default().fg(palette.text).italic();
    if snap.is_fading {
        style = style.add_modifier(Modifier::DIM);
    }

    let text = match (&snap.current, &snap.loading_text) {
        (Some(current), _) => format!("\u{201c}{}\u{201d}", current.quote.text),
        (None, Some(loading)) => loading.clone(),
        (None, None) => "Press n for a quote.".to_string(),
    };

    // Vertically centre short quotes
    let lines = wrapped_height(&text, area.width);
    let top = area.height.saturating_sub(lines) / 2;
    let body = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, body);
}

fn draw_author(f: &mut Frame, snap: &AppSnapshot, palette: &Palette, area: Rect) {
    let Some(current) = &snap.current else {
        return;
    };
    let mut style = Style::default().fg(palette.orb2);
    if snap.is_fading {
        style = style.add_modifier(Modifier::DIM);
    }
    let author = Paragraph::new(format!("\u{2014} {}", current.quote.author))
        .style(style)
        .alignment(Alignment::Center);
    f.render_widget(author, area);
}

fn draw_status(f: &mut Frame, snap: &AppSnapshot, palette: &Palette, area: Rect) {
    let (heart, heart_style) = if snap.is_saved {
        ("\u{2665} Saved", Style::default().fg(palette.accent).bold())
    } else {
        ("\u{2661} Save", Style::default().fg(palette.muted))
    };

    let mut spans = vec![
        Span::styled(snap.new_quote_label(), Style::default().fg(palette.text)),
        Span::raw("   "),
        Span::styled(
            snap.copy_label(),
            Style::default().fg(if snap.copied { palette.accent } else { palette.text }),
        ),
        Span::raw("   "),
        Span::styled(heart, heart_style),
    ];
    if let (Some(loading), Some(_)) = (&snap.loading_text, &snap.current) {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(loading.as_str(), Style::default().fg(palette.muted).italic()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn draw_notice(f: &mut Frame, snap: &AppSnapshot, palette: &Palette, area: Rect, now: Instant) {
    let Some(notice) = &snap.notice else {
        return;
    };

    let (title, colour) = match notice.kind {
        NoticeKind::Retrying { .. } => (" Connection ", Color::Yellow),
        NoticeKind::Offline => (" Offline ", palette.accent),
        NoticeKind::Error => (" Error ", Color::Red),
    };

    let block = Block::default()
        .title(title)
        .title(Line::from(" x dismiss ").right_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colour));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    f.render_widget(
        Paragraph::new(notice.message.as_str()).style(Style::default().fg(palette.text).bold()),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(notice.detail.as_str()).style(Style::default().fg(palette.muted)),
        rows[1],
    );

    if let Some(progress) = notice.progress(now) {
        let gauge = LineGauge::default()
            .ratio(1.0 - progress)
            .label("")
            .filled_style(Style::default().fg(colour))
            .unfilled_style(Style::default().fg(Color::DarkGray));
        f.render_widget(gauge, rows[2]);
    }
}

fn draw_help(f: &mut Frame, palette: &Palette, area: Rect) {
    let key = Style::default().fg(palette.accent);
    let help = Line::from(vec![
        Span::styled("'n' ", key),
        Span::raw("new  |  "),
        Span::styled("'c' ", key),
        Span::raw("copy  |  "),
        Span::styled("'s' ", key),
        Span::raw("save  |  "),
        Span::styled("'f' ", key),
        Span::raw("favourites  |  "),
        Span::styled("'q' ", key),
        Span::raw("quit"),
    ]);
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(palette.muted)),
        area,
    );
}

fn draw_drawer(f: &mut Frame, snap: &AppSnapshot, palette: &Palette, selected: usize, area: Rect) {
    let popup = centered(area, 80, 80);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" Favourites ({}) ", snap.favourites.len()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.bg));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    if snap.favourites.is_empty() {
        let empty = Paragraph::new("No favourites yet. Press s to save a quote.")
            .style(Style::default().fg(palette.muted).italic())
            .alignment(Alignment::Center);
        f.render_widget(empty, rows[0]);
    } else {
        let width = rows[0].width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = snap
            .favourites
            .iter()
            .enumerate()
            .map(|(i, fav)| {
                let quote = format!("\u{201c}{}\u{201d} \u{2014} {}", fav.text, fav.author);
                let mut meta = vec![Span::styled(
                    fav.saved_label().unwrap_or_default(),
                    Style::default().fg(palette.muted),
                )];
                if snap.copied_favourite == Some(i) {
                    meta.push(Span::styled(
                        "  \u{2713} Copied!",
                        Style::default().fg(palette.accent),
                    ));
                }
                ListItem::new(vec![
                    Line::styled(truncate_str(&quote, width), Style::default().fg(palette.text)),
                    Line::from(meta),
                ])
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(palette.orb1).fg(palette.bg))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(selected));
        f.render_stateful_widget(list, rows[0], &mut state);
    }

    let key = Style::default().fg(palette.accent);
    let help = Line::from(vec![
        Span::styled("\u{2191}/\u{2193} ", key),
        Span::raw("select  "),
        Span::styled("'d' ", key),
        Span::raw("remove  "),
        Span::styled("'y' ", key),
        Span::raw("copy  "),
        Span::styled("'a' ", key),
        Span::raw("clear all  "),
        Span::styled("Esc ", key),
        Span::raw("close"),
    ]);
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(palette.muted)),
        rows[1],
    );
}

fn centered(area: Rect, pct_x: u16, pct_y: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - pct_y) / 2),
        Constraint::Percentage(pct_y),
        Constraint::Percentage((100 - pct_y) / 2),
    ])
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - pct_x) / 2),
        Constraint::Percentage(pct_x),
        Constraint::Percentage((100 - pct_x) / 2),
    ])
    .split(vertical[1])[1]
}

/// Rough line count of `text` wrapped to `width` columns
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let chars = text.chars().count();
    u16::try_from(chars.div_ceil(width).max(1)).unwrap_or(u16::MAX)
}

fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 1 {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('\u{2026}');
        out
    } else {
        s.chars().take(max).collect()
    }
}
