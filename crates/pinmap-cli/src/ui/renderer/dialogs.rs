//! Overlays drawn above the map: marker popups, the new-pin dialogs, and alerts.

use pinmap_core::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};
use unicode_width::UnicodeWidthStr as _;

use crate::ui::flow::{FormField, NamePrompt, PinForm, SubmissionFlow};
use crate::ui::input::TextInput;
use crate::ui::layout::{anchored_rect, centered_rect};
use crate::ui::map_state::MapState;
use crate::ui::markers::Marker;
use crate::ui::state::{Alert, AlertKind};
use crate::ui::theme::ThemeColors as _;

const PROMPT_WIDTH: u16 = 52;
const FORM_WIDTH: u16 = 48;
/// Border (2) plus name label, name field, image label, image field, message, and help rows
const FORM_HEIGHT: u16 = 8;

fn dialog_block(title: &str, theme: Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!("─── {title} "))
        .border_style(Style::default().fg(theme.focused_border()))
        .padding(Padding::horizontal(1))
}

fn line_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Renders the popup of the selected marker next to it.
pub fn render_marker_popup(
    frame: &mut Frame,
    map_area: Rect,
    map: &MapState,
    marker: &Marker,
    theme: Theme,
) {
    let Some(anchor) = map.viewport.latlng_to_cell(map_area, marker.pin.location()) else {
        return;
    };
    let popup = &marker.popup;
    let lines: Vec<Line<'_>> = popup
        .lines()
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let style = if index == 0 {
                Style::default()
                    .fg(theme.highlight())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text())
            };
            Line::styled(text, style)
        })
        .collect();

    let content_width = popup.lines().into_iter().map(line_width).max().unwrap_or(0);
    let height = lines.len() as u16 + 2;
    let area = anchored_rect(anchor, content_width.saturating_add(4), height, map_area);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.unfocused_border()))
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}

/// Renders the dialog for the current step of the new-pin flow.
pub fn render_flow(
    frame: &mut Frame,
    map_area: Rect,
    map: &MapState,
    flow: &SubmissionFlow,
    theme: Theme,
) {
    match flow {
        SubmissionFlow::Idle => {}
        SubmissionFlow::NamePrompt(prompt) => render_name_prompt(frame, map_area, prompt, theme),
        SubmissionFlow::Form(form) => render_form(frame, map_area, map, form, false, theme),
        SubmissionFlow::Submitting(form) => render_form(frame, map_area, map, form, true, theme),
    }
}

fn render_name_prompt(frame: &mut Frame, map_area: Rect, prompt: &NamePrompt, theme: Theme) {
    let area = centered_rect(PROMPT_WIDTH, 5, map_area);
    let block = dialog_block("New pin", theme);
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let label = format!(
        "Enter a name for the pin at ({:.5}, {:.5}):",
        prompt.location.lat, prompt.location.lng
    );
    frame.render_widget(
        Paragraph::new(label).style(Style::default().fg(theme.text())),
        row(inner, 0),
    );
    render_input(frame, row(inner, 1), &prompt.input, true, theme);
    frame.render_widget(
        Paragraph::new("Enter: continue · Esc: cancel")
            .style(Style::default().fg(theme.unfocused_border())),
        row(inner, 2),
    );
}

fn render_form(
    frame: &mut Frame,
    map_area: Rect,
    map: &MapState,
    form: &PinForm,
    submitting: bool,
    theme: Theme,
) {
    let area = map.viewport.latlng_to_cell(map_area, form.location).map_or_else(
        || centered_rect(FORM_WIDTH, FORM_HEIGHT, map_area),
        |anchor| anchored_rect(anchor, FORM_WIDTH, FORM_HEIGHT, map_area),
    );
    let block = dialog_block("Add pin", theme);
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let label_style = |field: FormField| {
        if form.focus == field && !submitting {
            Style::default()
                .fg(theme.highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text())
        }
    };

    frame.render_widget(
        Paragraph::new("Name").style(label_style(FormField::Name)),
        row(inner, 0),
    );
    render_input(
        frame,
        row(inner, 1),
        &form.name,
        form.focus == FormField::Name && !submitting,
        theme,
    );
    frame.render_widget(
        Paragraph::new("Image path (optional)").style(label_style(FormField::Image)),
        row(inner, 2),
    );
    render_input(
        frame,
        row(inner, 3),
        &form.image_path,
        form.focus == FormField::Image && !submitting,
        theme,
    );

    let message = if submitting {
        Some(Paragraph::new("Submitting...").style(Style::default().fg(theme.highlight())))
    } else {
        form.error
            .as_deref()
            .map(|error| Paragraph::new(error).style(Style::default().fg(theme.error())))
    };
    if let Some(message) = message {
        frame.render_widget(message, row(inner, 4));
    }
    frame.render_widget(
        Paragraph::new("Enter: submit · Tab: switch · Esc: cancel")
            .style(Style::default().fg(theme.unfocused_border())),
        row(inner, 5),
    );
}

fn render_input(frame: &mut Frame, area: Rect, input: &TextInput, focused: bool, theme: Theme) {
    let mut text_area = input.widget().clone();
    text_area.set_style(Style::default().fg(theme.text()));
    let cursor_style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    text_area.set_cursor_style(cursor_style);
    frame.render_widget(&text_area, area);
}

/// Renders a modal alert centered on screen.
pub fn render_alert(frame: &mut Frame, screen: Rect, alert: &Alert, theme: Theme) {
    let (title, color) = match alert.kind {
        AlertKind::Info => ("Info", theme.highlight()),
        AlertKind::Error => ("Error", theme.error()),
    };
    let width = line_width(&alert.message).saturating_add(8).max(28);
    let area = centered_rect(width, 5, screen);

    let lines = vec![
        Line::styled(alert.message.as_str(), Style::default().fg(theme.text())),
        Line::default(),
        Line::styled("[Enter] OK", Style::default().fg(theme.unfocused_border())).right_aligned(),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).centered().block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("─── {title} "))
                .border_style(Style::default().fg(color))
                .padding(Padding::horizontal(1)),
        ),
        area,
    );
}

/// One-row slice of `area` at `offset`, empty when it falls outside.
fn row(area: Rect, offset: u16) -> Rect {
    if offset >= area.height {
        return Rect { height: 0, ..area };
    }
    Rect {
        y: area.y + offset,
        height: 1,
        ..area
    }
}
