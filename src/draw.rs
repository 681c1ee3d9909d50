use log::error;
use std::time::Instant;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, InputMode};
use crate::components::wheel::{WheelView, to_color};
use crate::state::app_state::StatusKind;
use crate::ui::layout::LayoutAreas;

const HELP_LINES: &[(&str, &str)] = &[
    ("Space / Enter", "spin the wheel"),
    ("e", "toggle edit mode"),
    ("←/→ h/l j/k", "move the sector cursor (edit mode)"),
    ("Enter", "rename the sector under the cursor (edit mode)"),
    ("Enter / Esc", "save / cancel a rename"),
    ("s", "export the wheel as SVG"),
    ("f", "toggle full screen"),
    ("\"", "toggle the log pane"),
    ("?", "toggle this help"),
    ("q / Ctrl-C", "quit"),
];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);
    let now = Instant::now();

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        draw_wheel(f, layout.wheel, app, now);
        if let Some(area) = layout.side_panel {
            draw_side_panel(f, area, app);
        }
        if let Some(area) = layout.logs {
            draw_logs(f, area);
        }
        if let Some(area) = layout.status_bar {
            draw_status_bar(f, area, app);
        }

        match app.input_mode() {
            InputMode::EditSession => draw_edit_popup(f, f.area(), app),
            InputMode::Help => draw_help(f, f.area()),
            InputMode::Wheel | InputMode::EditMode => {}
        }
    });
    if let Err(e) = result {
        error!("failed to draw frame: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_wheel(f: &mut Frame, area: Rect, app: &App, now: Instant) {
    let title = if app.state.wheel.edit_mode() { " Wheel (editing) " } else { " Lucky Wheel " };
    let border = if app.state.wheel.edit_mode() { Color::Yellow } else { Color::White };
    let block = default_border(border).title(title);

    let scene = match app.scene() {
        Ok(scene) => scene,
        Err(e) => {
            f.render_widget(
                Paragraph::new(e.to_string())
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
            return;
        }
    };

    let cursor = app.state.wheel.edit_mode().then_some(app.state.cursor);
    let winner = if app.is_animating() {
        None
    } else {
        app.state.history.latest().map(|r| r.winner)
    };

    f.render_widget(
        WheelView {
            scene: &scene,
            rotation_degrees: app.display_rotation(now),
            cursor,
            winner,
            block: Some(block),
        },
        area,
    );
}

fn draw_side_panel(f: &mut Frame, area: Rect, app: &App) {
    let sectors = app.state.wheel.sectors();
    let list_height = (sectors.len() as u16).saturating_add(2);
    let [list_area, history_area] =
        Layout::vertical([Constraint::Length(list_height), Constraint::Fill(1)]).areas(area);

    let block = default_border(Color::White).title(" Prizes ");
    let inner = block.inner(list_area);
    f.render_widget(block, list_area);

    let palette = app.state.wheel.palette();
    let editing = app.state.wheel.edit_mode();
    let lines: Vec<Line> = sectors
        .iter()
        .enumerate()
        .map(|(idx, sector)| {
            let selected = editing && idx == app.state.cursor;
            let swatch = to_color(palette.color_for(sector.color_index));
            let marker = if selected { "> " } else { "  " };
            let label_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled("■ ", Style::default().fg(swatch)),
                Span::styled(format!("{:>2} ", idx + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(sector.label.as_str(), label_style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);

    let block = default_border(Color::DarkGray).title(" History ");
    let inner = block.inner(history_area);
    f.render_widget(block, history_area);

    if app.state.history.records.is_empty() {
        f.render_widget(
            Paragraph::new("No spins yet").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = app
        .state
        .history
        .records
        .iter()
        .take(inner.height as usize)
        .map(|record| {
            Line::from(vec![
                Span::styled(format!("{} ", record.at), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("#{} ", record.spin_id), Style::default().fg(Color::Gray)),
                Span::styled(record.label.as_str(), Style::default().fg(Color::White)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn key_hints(app: &App) -> &'static str {
    match app.input_mode() {
        InputMode::Wheel if !app.state.wheel.can_spin() => "spinning...  s svg  ? help  q quit",
        InputMode::Wheel => "Space spin  e edit  s svg  f full screen  \" logs  ? help  q quit",
        InputMode::EditMode => "←/→ move  Enter rename  e/Esc done  s svg  ? help  q quit",
        InputMode::EditSession => "type a name  Enter save  Esc cancel",
        InputMode::Help => "Esc/? close help",
    }
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [status_area, hints_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(inner);

    if let Some(status) = &app.state.status {
        let color = match status.kind {
            StatusKind::Info => Color::Gray,
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
        };
        f.render_widget(
            Paragraph::new(status.text.as_str()).style(Style::default().fg(color)),
            status_area,
        );
    }

    f.render_widget(
        Paragraph::new(key_hints(app))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        hints_area,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logger, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_edit_popup(f: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.state.wheel.edit_session() else {
        return;
    };
    let popup = centered(area, 48, 3);
    f.render_widget(Clear, popup);

    let block = default_border(Color::Yellow)
        .title(format!(" Rename sector {} ", session.target_index + 1));
    f.render_widget(
        Paragraph::new(format!("{}_", session.draft))
            .style(Style::default().fg(Color::Yellow))
            .block(block),
        popup,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let popup = centered(area, 60, HELP_LINES.len() as u16 + 2);
    f.render_widget(Clear, popup);

    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>14}  "), Style::default().fg(Color::Yellow)),
                Span::styled(*action, Style::default().fg(Color::White)),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(default_border(Color::White).title(" Help ")),
        popup,
    );
}
