use chrono::{Local, Utc};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
};

use super::{App, InputMode, InsertField};

pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4), // header
                Constraint::Min(1),    // list
                Constraint::Length(3), // progress
                Constraint::Length(5), // footer
            ]
            .as_ref(),
        )
        .split(size);

    // Header (help + view settings)
    let help = Line::from("q quit  a add  c/enter complete  d delete  j/k move  s sort  f filter  r reverse");
    let view = Line::from(format!(
        "Sort: {}{}   Filter: {}   File: {}",
        app.query.sort_by.label(),
        if app.query.reverse { " (reversed)" } else { "" },
        app.filter_label(),
        app.repo.store().path().display(),
    ));
    let header = Paragraph::new(vec![help, view])
        .block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(header, chunks[0]);

    // Main list
    let now = Utc::now();
    let items: Vec<ListItem> = app
        .tasks
        .iter()
        .map(|t| {
            let id = Span::styled(format!("{:>3} ", t.id), Style::default().add_modifier(Modifier::BOLD));
            let check = Span::raw(if t.completed { "[x] " } else { "[ ] " });
            let title_style = if t.completed {
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            let mut line = vec![id, check, Span::styled(t.title.clone(), title_style)];

            if let Some(due) = t.due_date {
                let due_style = if t.is_overdue(now) {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                line.push(Span::styled(
                    format!("  due {}", due.with_timezone(&Local).format("%Y-%m-%d %H:%M")),
                    due_style,
                ));
            }
            if !t.description.is_empty() {
                line.push(Span::raw("  - "));
                line.push(Span::styled(
                    t.description.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(line))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!("Tasks ({})", app.tasks.len())))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !app.tasks.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Done"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(app.percent_done());
    frame.render_widget(gauge, chunks[2]);

    // Footer (status or input form)
    let (title, content) = match app.input_mode {
        InputMode::Insert => (
            "Add Task  [Tab=next field | Enter=add | Esc=cancel]",
            vec![
                form_line("Title", &app.draft_title, app.insert_field == InsertField::Title),
                form_line("Description", &app.draft_description, app.insert_field == InsertField::Description),
                form_line("Due", &app.draft_due, app.insert_field == InsertField::DueDate),
            ],
        ),
        InputMode::Normal => ("Status", vec![Line::from(app.status_line.clone())]),
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(footer, chunks[3]);
}

fn form_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:>12}: ", label), label_style),
        Span::raw(value),
        Span::raw(cursor),
    ])
}
