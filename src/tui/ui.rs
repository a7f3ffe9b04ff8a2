//! UI rendering for the TUI.
//!
//! Handles layout and widget rendering using ratatui.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::AppMode;
use crate::core::AnalysisEntry;
use crate::tui::Theme;
use crate::App;

/// Draw the main UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Topic input
            Constraint::Min(8),         // Tasks + analysis
            Constraint::Percentage(35), // History
            Constraint::Length(1),      // Status bar
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let analysis_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(content_chunks[1]);

    draw_header(frame, app, chunks[0]);
    draw_task_list(frame, app, content_chunks[0]);
    draw_progress(frame, app, analysis_chunks[0]);
    draw_recommendations(frame, app, analysis_chunks[1]);
    draw_history(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    if app.mode == AppMode::Help {
        draw_help_overlay(frame, app);
    }
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title)
        .title_style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))
}

/// Draw the topic input.
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let editing = app.mode == AppMode::EditingTopic;

    let content = if app.session.topic.is_empty() && !editing {
        Span::styled("Press i to enter a topic, e.g. Python", Style::default().fg(theme.text_dim))
    } else {
        Span::styled(app.session.topic.as_str(), Style::default().fg(theme.text))
    };

    let border = if editing { theme.primary } else { theme.border };
    let input = Paragraph::new(Line::from(vec![Span::raw(" "), content])).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" taskgen - topic ")
            .title_style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
    );

    frame.render_widget(input, area);

    if editing {
        // Border plus the leading space take two columns, the right border one.
        let max = area.width.saturating_sub(3);
        let offset = cursor_offset(&app.session.topic, app.cursor_position, max);
        frame.set_cursor_position((area.x + 2 + offset, area.y + 1));
    }
}

/// Display columns before the `cursor`-th char of `topic`, capped at `max`.
fn cursor_offset(topic: &str, cursor: usize, max: u16) -> u16 {
    let before: String = topic.chars().take(cursor).collect();
    let width = UnicodeWidthStr::width(before.as_str());
    u16::try_from(width).unwrap_or(u16::MAX).min(max)
}

/// Draw the task checklist.
fn draw_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let error = app.session.generation_error.as_deref();

    let Some(set) = app.session.active_tasks() else {
        let paragraph = match error {
            Some(error) => Paragraph::new(error).style(Style::default().fg(theme.error)),
            None => Paragraph::new("No tasks yet. Enter a topic and press Enter.")
                .style(Style::default().fg(theme.text_dim)),
        };
        let paragraph = paragraph.wrap(Wrap { trim: true }).block(panel(" Tasks ", theme));
        frame.render_widget(paragraph, area);
        return;
    };

    let items: Vec<ListItem> = set
        .tasks
        .iter()
        .map(|task| {
            let (mark, style) = if task.done {
                ("[x] ", Style::default().fg(theme.secondary))
            } else {
                ("[ ] ", Style::default().fg(theme.text))
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(task.description.as_str(), style),
            ]))
        })
        .collect();

    let title = format!(" Tasks: {} ({}/{}) ", set.topic, set.completed_count(), set.len());
    let block = panel(&title, theme);
    let mut list_area = block.inner(area);
    frame.render_widget(block, area);

    // A failed regeneration keeps the previous list; the error sits above it.
    if let Some(error) = error {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(list_area);
        let line = Paragraph::new(error).style(Style::default().fg(theme.error));
        frame.render_widget(line, rows[0]);
        list_area = rows[1];
    }

    let list = List::new(items)
        .highlight_style(Style::default().bg(theme.selected_bg).add_modifier(Modifier::BOLD));

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, list_area, &mut state);
}

/// Draw the latest progress summary.
fn draw_progress(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let text = match (&app.session.analysis_error, app.session.latest_analysis()) {
        (None, Some(entry)) => Line::from(Span::styled(
            format!("You completed {}% of tasks.", entry.percent),
            Style::default().fg(theme.secondary).add_modifier(Modifier::BOLD),
        )),
        _ => Line::from(Span::styled(
            "Press a to analyze progress",
            Style::default().fg(theme.text_dim),
        )),
    };

    let paragraph = Paragraph::new(text).block(panel(" Progress ", theme));
    frame.render_widget(paragraph, area);
}

/// Draw recommendations from the latest analysis, or the analysis error.
fn draw_recommendations(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let lines: Vec<Line> = if let Some(error) = &app.session.analysis_error {
        vec![Line::from(Span::styled(error.as_str(), Style::default().fg(theme.error)))]
    } else if let Some(entry) = app.session.latest_analysis() {
        entry
            .recommendations
            .iter()
            .map(|r| Line::from(Span::styled(format!("• {r}"), Style::default().fg(theme.accent))))
            .collect()
    } else {
        Vec::new()
    };

    let paragraph =
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(panel(" Recommendations ", theme));
    frame.render_widget(paragraph, area);
}

/// Render the analysis history as plain lines, oldest first.
pub fn history_lines(history: &[AnalysisEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in history.iter().enumerate() {
        lines.push(format!(
            "Analysis #{} - {}% ({})",
            i + 1,
            entry.percent,
            entry.taken_at.format("%H:%M:%S")
        ));
        lines.push("  Completed tasks:".to_string());
        lines.extend(entry.done.iter().map(|task| format!("    - {task}")));
        lines.push("  Recommendations:".to_string());
        lines.extend(entry.recommendations.iter().map(|r| format!("    - {r}")));
    }
    lines
}

/// Draw the cumulative analysis history.
fn draw_history(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let history = &app.session.history;

    let lines: Vec<Line> = history_lines(history)
        .into_iter()
        .map(|line| {
            let style = if line.starts_with("Analysis #") {
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(Span::styled(line, style))
        })
        .collect();

    let max_scroll = lines.len().saturating_sub(1);
    let scroll = app.history_scroll.min(max_scroll) as u16;

    let title = format!(" History ({}) ", history.len());
    let paragraph = Paragraph::new(lines).scroll((scroll, 0)).block(panel(&title, theme));
    frame.render_widget(paragraph, area);
}

/// Draw the status bar.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let text = app.status_message.clone().unwrap_or_else(|| match app.mode {
        AppMode::EditingTopic => "Enter generate · Esc done · Ctrl+U clear".to_string(),
        _ => "i topic · space toggle · a analyze · e/E export txt/json · ? help · q quit"
            .to_string(),
    });

    let status = Paragraph::new(Line::from(Span::styled(
        format!(" {text}"),
        Style::default().fg(theme.text_dim),
    )));
    frame.render_widget(status, area);
}

fn help_line<'a>(key: &'a str, description: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{key:>12}  "), Style::default().fg(theme.primary)),
        Span::styled(description, Style::default().fg(theme.text)),
    ])
}

/// Draw the keyboard shortcut overlay.
fn draw_help_overlay(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 60, frame.area());

    let lines = vec![
        help_line("i, /", "Edit topic", theme),
        help_line("Enter", "Generate tasks (while editing)", theme),
        help_line("g", "Generate tasks for the current topic", theme),
        help_line("Up/Down, j/k", "Move selection", theme),
        help_line("Space", "Toggle task", theme),
        help_line("a", "Analyze progress", theme),
        help_line("e", "Export to TXT", theme),
        help_line("E", "Export to JSON", theme),
        help_line("PgUp/PgDn", "Scroll history", theme),
        help_line("q, Ctrl+C", "Quit", theme),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(panel(" Help ", theme)), area);
}

/// A rect of the given percentage size, centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Local;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::ai::testing::ScriptedProvider;
    use crate::core::{Config, Event};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    fn entry(percent: u32, done: &[&str], recommendations: &[&str]) -> AnalysisEntry {
        AnalysisEntry {
            done: done.iter().map(|s| (*s).to_string()).collect(),
            percent,
            recommendations: recommendations.iter().map(|s| (*s).to_string()).collect(),
            taken_at: Local::now(),
        }
    }

    #[test]
    fn test_history_lines() {
        let lines = history_lines(&[entry(25, &["Loops"], &["Try closures"]), entry(50, &[], &[])]);

        assert!(lines[0].starts_with("Analysis #1 - 25% ("));
        assert_eq!(lines[1], "  Completed tasks:");
        assert_eq!(lines[2], "    - Loops");
        assert_eq!(lines[3], "  Recommendations:");
        assert_eq!(lines[4], "    - Try closures");
        assert!(lines[5].starts_with("Analysis #2 - 50% ("));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_draw_tasks_and_analysis() {
        let mut app = App::new(Arc::new(ScriptedProvider::failing()), Config::default());
        app.session = std::mem::take(&mut app.session)
            .apply(Event::TasksGenerated {
                topic: "Python".to_string(),
                tasks: vec!["Learn loops".to_string(), "Learn functions".to_string()],
            })
            .apply(Event::TaskToggled(0))
            .apply(Event::AnalysisCompleted(entry(50, &["Learn loops"], &["Write a decorator"])));

        let screen = render(&app);
        assert!(screen.contains("[x] Learn loops"));
        assert!(screen.contains("[ ] Learn functions"));
        assert!(screen.contains("You completed 50% of tasks."));
        assert!(screen.contains("Write a decorator"));
        assert!(screen.contains("Analysis #1 - 50%"));
    }

    #[test]
    fn test_draw_inline_errors() {
        let mut app = App::new(Arc::new(ScriptedProvider::failing()), Config::default());
        app.session = std::mem::take(&mut app.session)
            .apply(Event::GenerationFailed("Error: connection refused".to_string()));

        let screen = render(&app);
        assert!(screen.contains("Error: connection refused"));
    }

    #[test]
    fn test_failed_regeneration_keeps_checklist_visible() {
        let mut app = App::new(Arc::new(ScriptedProvider::failing()), Config::default());
        app.session = std::mem::take(&mut app.session)
            .apply(Event::TasksGenerated {
                topic: "Python".to_string(),
                tasks: vec!["Learn loops".to_string(), "Learn functions".to_string()],
            })
            .apply(Event::GenerationFailed("Error: connection refused".to_string()))
            .apply(Event::TaskToggled(1));

        let screen = render(&app);
        assert!(screen.contains("Error: connection refused"));
        assert!(screen.contains("[ ] Learn loops"));
        assert!(screen.contains("[x] Learn functions"));
        assert!(screen.contains("Tasks: Python (1/2)"));
    }

    #[test]
    fn test_cursor_offset_counts_display_columns() {
        assert_eq!(cursor_offset("Python", 3, 50), 3);
        assert_eq!(cursor_offset("日本語", 2, 50), 4);
        assert_eq!(cursor_offset("日本語", 3, 50), 6);
        assert_eq!(cursor_offset("", 0, 50), 0);
    }

    #[test]
    fn test_cursor_offset_stays_inside_input() {
        let topic = "x".repeat(300);
        assert_eq!(cursor_offset(&topic, 300, 97), 97);
        assert_eq!(cursor_offset("日本語", 3, 4), 4);
        assert_eq!(cursor_offset("abc", 3, 0), 0);
    }

    #[test]
    fn test_editing_cursor_inside_header() {
        let mut app = App::new(Arc::new(ScriptedProvider::failing()), Config::default());
        for c in "x".repeat(150).chars() {
            app.enter_char(c);
        }
        app.start_editing();

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor.y, 1);
        assert!(cursor.x < 100);
    }

    #[test]
    fn test_draw_help_overlay() {
        let mut app = App::new(Arc::new(ScriptedProvider::failing()), Config::default());
        app.show_help();
        assert!(render(&app).contains("Analyze progress"));
    }
}
