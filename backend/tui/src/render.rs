//! TUI Rendering
//!
//! Draws a `UiState` snapshot plus the view state onto the frame.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap,
    },
    Frame,
};
use textlift_core::UiState;

use crate::app::{Mode, TuiApp};

const INK: Color = Color::Rgb(0x27, 0x27, 0x57);
const MUTED: Color = Color::Rgb(0x50, 0x50, 0x81);
const ACCENT: Color = Color::Rgb(0x86, 0x86, 0xac);
const BUTTON: Color = Color::Rgb(0x0f, 0x0e, 0x47);

pub const TITLE: &str = "Image to Text Converter";
pub const SUBTITLE: &str = "An online image to text converter to extract text from images.";
pub const DROP_HINT: &str = "Drop, Upload or Paste image";
pub const FORMATS_HINT: &str = "Supported formats: JPG, PNG, GIF, JPEG, PDF";

pub fn draw_ui(f: &mut Frame, ui: &UiState, app: &mut TuiApp) {
    let area = centered_column(f.size(), 76);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Subtitle
            Constraint::Length(1),
            Constraint::Length(8), // Drop zone
            Constraint::Length(1), // Error
            Constraint::Length(3), // Submit
            Constraint::Min(3),    // Result
            Constraint::Length(1), // Footer
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(TITLE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(INK).add_modifier(Modifier::BOLD)),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(SUBTITLE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(MUTED)),
        chunks[1],
    );

    draw_drop_zone(f, ui, chunks[3]);

    if let Some(err) = ui.error {
        f.render_widget(
            Paragraph::new(err.to_string())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red)),
            chunks[4],
        );
    }

    draw_submit(f, ui, chunks[5]);

    if let Some(text) = ui.displayed_text() {
        draw_result(f, ui, &text, chunks[6]);
    }

    let footer = match &app.notice {
        Some(notice) => Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new("o browse · paste a path to drop · enter extract · c copy · q quit")
            .style(Style::default().fg(ACCENT)),
    };
    f.render_widget(footer.alignment(Alignment::Center), chunks[7]);

    if app.mode == Mode::Picker {
        draw_picker(f, app, area);
    }
}

fn draw_drop_zone(f: &mut Frame, ui: &UiState, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled("⇪", Style::default().fg(ACCENT))),
        Line::from(Span::styled(DROP_HINT, Style::default().fg(INK))),
        Line::from(Span::styled(FORMATS_HINT, Style::default().fg(MUTED))),
        Line::from(""),
        Line::from(Span::styled(
            "[ Browse ]",
            Style::default().fg(Color::White).bg(BUTTON),
        )),
    ];
    if let Some(file) = &ui.selected {
        lines.push(Line::from(Span::styled(
            format!("{} ({})", file.name, human_size(file.len())),
            Style::default().fg(INK).add_modifier(Modifier::ITALIC),
        )));
    }

    let zone = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(zone, area);
}

fn draw_submit(f: &mut Frame, ui: &UiState, area: Rect) {
    let style = if ui.can_submit() {
        Style::default().fg(Color::White).bg(BUTTON).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    };
    let button = Paragraph::new(ui.submit_label())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)));
    f.render_widget(button, area);
}

fn draw_result(f: &mut Frame, ui: &UiState, text: &str, area: Rect) {
    let marker = if ui.copied { "[copied ✓]" } else { "[copy]" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Title::from(marker).alignment(Alignment::Right));
    let body = Paragraph::new(text.to_string())
        .style(Style::default().fg(INK))
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(body, area);
}

fn draw_picker(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    let popup = inset(area, 4, 3);
    let items: Vec<ListItem> = app
        .picker
        .entries
        .iter()
        .map(|entry| {
            if entry.is_dir {
                ListItem::new(format!("{}/", entry.name)).style(Style::default().fg(MUTED))
            } else {
                ListItem::new(entry.name.as_str()).style(Style::default().fg(INK))
            }
        })
        .collect();

    let title = format!(" {} ", app.picker.dir.display());
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .title(Title::from(" enter open · backspace up · esc close ").position(Position::Bottom))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .highlight_style(Style::default().fg(Color::White).bg(BUTTON));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut app.picker.list_state);
}

fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn inset(area: Rect, dx: u16, dy: u16) -> Rect {
    Rect {
        x: area.x + dx.min(area.width / 2),
        y: area.y + dy.min(area.height / 2),
        width: area.width.saturating_sub(dx * 2),
        height: area.height.saturating_sub(dy * 2),
    }
}

fn human_size(bytes: usize) -> String {
    match bytes {
        b if b >= 1 << 20 => format!("{:.1} MB", b as f64 / (1u64 << 20) as f64),
        b if b >= 1 << 10 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{b} B"),
    }
}
