use crate::dashboard::{LoadStatus, Page};
use crate::output::{format_page_footer, format_stat, truncate_name};
use crate::scoring::StatCategory;
use crate::tui::app::{App, InputMode};
use crate::tui::theme::ThemeColors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Filters(1) + Table(fill) + Footer(1) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_filters(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    match app.input_mode {
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::ScoreBreakdown => render_breakdown_popup(frame, app),
        InputMode::WeightEditor | InputMode::WeightInput => render_weight_editor(frame, app),
        InputMode::Normal | InputMode::Search => {}
    }

    if app.state.is_loading() {
        render_loading_overlay(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let left = "Fantasy Hoops";
    let right = format!("{} | {}", app.state.model.display_name(), app.state.view_mode.label());
    let padding_len = (area.width as usize).saturating_sub(left.len() + right.chars().count());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_filters(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let filter = &app.state.filter;

    let value_style = |active: bool| {
        if active {
            Style::default().fg(theme.filter_active).bold()
        } else {
            Style::default().fg(theme.muted)
        }
    };
    let is_set = |value: &str| !value.is_empty() && !value.eq_ignore_ascii_case(crate::players::ALL);

    let search = if app.input_mode == InputMode::Search {
        format!("{}|", app.search_input)
    } else if filter.search_text.is_empty() {
        "-".to_string()
    } else {
        filter.search_text.clone()
    };

    let mut spans = vec![
        Span::styled("Position: ", Style::default().fg(theme.muted)),
        Span::styled(filter.position.clone(), value_style(is_set(&filter.position))),
        Span::raw("  "),
        Span::styled("Team: ", Style::default().fg(theme.muted)),
        Span::styled(filter.team.clone(), value_style(is_set(&filter.team))),
        Span::raw("  "),
        Span::styled("Search: ", Style::default().fg(theme.muted)),
        Span::styled(
            search,
            value_style(app.input_mode == InputMode::Search || !filter.search_text.is_empty()),
        ),
    ];
    if filter.is_active() {
        spans.push(Span::styled("  (c: clear)", Style::default().fg(theme.muted)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.clone();
    let rows = app.rows();

    if rows.is_empty() {
        let text = match &app.state.status {
            LoadStatus::Failed(msg) => format!("Could not load players: {}", msg),
            _ if app.state.records.is_empty() => "No players loaded".to_string(),
            _ => "No players match the current filters".to_string(),
        };
        let empty_msg = Paragraph::new(text).alignment(Alignment::Center).block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    // Bar scaling uses the best score on this page
    let max_score = rows.iter().map(|p| p.score).fold(0.0_f64, f64::max);

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(idx, projection)| {
            let record = &projection.record;
            let score_color = theme.score_color(projection.score, max_score);
            let mut score_spans = vec![Span::styled(
                format!("{:>6.1} ", projection.score),
                Style::default().fg(score_color),
            )];
            score_spans.extend(score_bar(projection.score, max_score, 8, &theme).spans);

            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            let stat = |category: StatCategory| Cell::from(format_stat(record.stat(category)));

            Row::new(vec![
                Cell::from(format!("{}.", projection.rank)).style(Style::default().fg(theme.index_color)),
                Cell::from(truncate_name(&record.display_name, 24)),
                Cell::from(record.team.clone()).style(Style::default().fg(theme.team_color)),
                Cell::from(truncate_name(&record.position, 14)),
                Cell::from(Line::from(score_spans)),
                stat(StatCategory::Points),
                stat(StatCategory::Rebounds),
                stat(StatCategory::Assists),
                stat(StatCategory::Steals),
                stat(StatCategory::Blocks),
                stat(StatCategory::Turnovers),
                Cell::from(format_stat(record.scoring_line().minutes)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),  // "123."
        Constraint::Fill(1),    // Player
        Constraint::Length(4),  // Team
        Constraint::Length(14), // Position
        Constraint::Length(16), // "  45.3 ████░░░░"
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
    ];

    let table = Table::new(table_rows, widths)
        .header(
            Row::new(vec!["#", "Player", "Team", "Pos", "FPTS", "PTS", "REB", "AST", "STL", "BLK", "TO", "MIN"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut text = format_page_footer(&app.view.page);
    if app.view.filtered_count != app.view.total_count {
        text.push_str(&format!(" | {} filtered of {}", app.view.filtered_count, app.view.total_count));
    }
    if let Some(hint) = page_nav_hint(&app.view.page) {
        text.push_str(" | ");
        text.push_str(&hint);
    }
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(app.theme.muted)),
        area,
    );
}

/// Which page keys do anything from here, `None` on a single page.
fn page_nav_hint<T>(page: &Page<T>) -> Option<String> {
    match (page.has_previous(), page.has_next()) {
        (false, false) => None,
        (true, false) => Some("p: prev".to_string()),
        (false, true) => Some("n: next".to_string()),
        (true, true) => Some("p: prev  n: next".to_string()),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            theme.flash_error
        } else if msg.starts_with("Refreshed") || msg.starts_with("Applied") || msg.contains("weight set") {
            theme.flash_success
        } else {
            Color::White
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let elapsed = app.last_refresh.elapsed();
        let refresh_time = if elapsed.as_secs() < 60 {
            format!("refreshed {}s ago", elapsed.as_secs())
        } else {
            format!("refreshed {}m ago", elapsed.as_secs() / 60)
        };

        let hints: &[(&str, &str)] = match app.input_mode {
            InputMode::Search => &[("Enter", ":keep "), ("Esc", ":clear")],
            InputMode::WeightEditor => &[
                ("j/k", ":select "),
                ("Enter", ":edit "),
                ("p", ":preset "),
                ("R", ":reset "),
                ("Esc", ":close"),
            ],
            InputMode::WeightInput => &[("Enter", ":save "), ("Esc", ":cancel")],
            _ => &[
                ("j/k", ":nav "),
                ("n/p", ":page "),
                ("/", ":search "),
                ("P/T", ":filter "),
                ("m", ":model "),
                ("w", ":weights "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = vec![
            Span::styled(refresh_time, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

fn score_bar(score: f64, max_score: f64, width: usize, theme: &ThemeColors) -> Line<'static> {
    let ratio = if max_score > 0.0 {
        (score / max_score).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_color = theme.score_color(score, max_score);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(bar_color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }

    Line::from(spans)
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect { x, y, width, height }
}

fn popup_block<'a>(title: &'a str, theme: &ThemeColors) -> Block<'a> {
    Block::bordered()
        .title(title)
        .title_style(theme.popup_title)
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg))
}

fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some((record, breakdown)) = app.selected_breakdown() else {
        return;
    };
    let theme = &app.theme;

    let height = breakdown.contributions.len() as u16 + 6;
    let popup_area = centered_rect_fixed(54, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let title = format!(" {} ", truncate_name(&record.display_name, 40));
    let block = popup_block(&title, theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:<24}", "Category"), theme.header_style),
        Span::styled(format!("{:>7} {:>7} {:>8}", "Stat", "Weight", "Points"), theme.header_style),
    ])];
    for c in &breakdown.contributions {
        let points_color = if c.points < 0.0 { theme.score_negative } else { theme.score_high };
        lines.push(Line::from(vec![
            Span::raw(format!("{:<24}", c.category.label())),
            Span::raw(format!("{:>7.1} {:>7.2} ", c.stat, c.weight)),
            Span::styled(format!("{:>8.2}", c.points), Style::default().fg(points_color)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<40}", "Total"), theme.header_style),
        Span::styled(format!("{:>8.2}", breakdown.score), theme.header_style),
    ]));
    lines.push(Line::from(Span::styled(
        "Esc/b: close  j/k: next player",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_weight_editor(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let height = StatCategory::ALL.len() as u16 + 4;
    let popup_area = centered_rect_fixed(44, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Scoring Weights ", theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let selected = app.selected_category();
    let mut lines: Vec<Line> = app
        .state
        .weights
        .iter()
        .map(|(category, weight)| {
            let value = if category == selected && app.input_mode == InputMode::WeightInput {
                Span::styled(format!("{}|", app.weight_input), theme.cursor_style)
            } else {
                Span::raw(format!("{:>6.2}", weight))
            };
            let label_style = if category == selected {
                theme.row_selected
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{:<28}", category.label()), label_style),
                value,
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: edit  p: next preset  R: reset  Esc: close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 21, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(" Keyboard Shortcuts ", theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("j / Down", "Move down"),
        ("k / Up", "Move up"),
        ("n / Right", "Next page"),
        ("p / Left", "Previous page"),
        ("/", "Search by name or team"),
        ("P", "Cycle position filter"),
        ("T", "Cycle team filter"),
        ("c", "Clear filters"),
        ("m / M", "Next / previous model"),
        ("s", "Cycle page size"),
        ("v", "Toggle predictions / recent form"),
        ("w", "Edit scoring weights"),
        ("b", "Score breakdown"),
        ("r", "Refresh (bypasses cache)"),
        ("?", "Show/hide this help"),
        ("q / Ctrl-c", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:<14}", key), key_style),
                Span::raw(*desc),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

fn render_loading_overlay(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(34, 3, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().border_style(Style::default().fg(app.theme.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
    let text = if app.state.records.is_empty() {
        format!("{} Loading players...", spinner)
    } else {
        format!("{} Loading {}...", spinner, app.state.model.display_name())
    };

    let loading_text = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.title_color));
    frame.render_widget(loading_text, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::paginate;

    #[test]
    fn test_centered_rect_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect_fixed(40, 4, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 3);
    }

    #[test]
    fn test_page_nav_hint() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(page_nav_hint(&paginate(&items, 1, 10)).as_deref(), Some("n: next"));
        assert_eq!(page_nav_hint(&paginate(&items, 2, 10)).as_deref(), Some("p: prev  n: next"));
        assert_eq!(page_nav_hint(&paginate(&items, 3, 10)).as_deref(), Some("p: prev"));
        assert_eq!(page_nav_hint(&paginate(&items, 1, 50)), None);
    }

    #[test]
    fn test_score_bar_fill() {
        let theme = ThemeColors::dark();
        let line = score_bar(50.0, 100.0, 8, &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "████░░░░");

        let line = score_bar(-5.0, 100.0, 4, &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "░░░░");
    }
}
