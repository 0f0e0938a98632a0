use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use crate::commands::describe_due;
use crate::derived::is_overdue;
use crate::models::Priority;
use crate::rewards::catalog;
use crate::templates::templates;
use crate::theme::Theme;
use super::app::{AddStep, App, InputMode, ViewMode};

struct Palette {
    accent: Color,
    border: Color,
    highlight: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Normal => Palette { accent: Color::LightMagenta, border: Color::Magenta, highlight: Color::DarkGray },
        Theme::Horror => Palette { accent: Color::LightRed, border: Color::Red, highlight: Color::Rgb(60, 0, 60) },
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let theme = app.settings.theme;
    let colors = palette(theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main view
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    let block = |title: String| {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border))
            .title(title)
    };
    let header_style = Style::default().fg(colors.accent).add_modifier(Modifier::BOLD);
    let highlight = Style::default().add_modifier(Modifier::BOLD).bg(colors.highlight);

    match app.view_mode {
        ViewMode::Tasks => {
            let rows: Vec<Row> = app
                .tasks
                .iter()
                .map(|t| {
                    let overdue = is_overdue(t, app.now_ms);
                    let style = if t.completed {
                        Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
                    } else if overdue {
                        Style::default().fg(Color::Red)
                    } else {
                        match t.priority {
                            Priority::High => Style::default().fg(colors.accent),
                            _ => Style::default(),
                        }
                    };
                    let status = if t.completed {
                        theme.done_mark().to_string()
                    } else if overdue {
                        "Overdue".to_string()
                    } else {
                        String::new()
                    };

                    Row::new(vec![
                        Cell::from(theme.priority_icon(t.priority)),
                        Cell::from(t.title.clone()),
                        Cell::from(t.category.clone().unwrap_or_default()),
                        Cell::from(describe_due(t).unwrap_or_default()),
                        Cell::from(status),
                    ]).style(style)
                })
                .collect();

            let widths = [
                Constraint::Length(3),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(30),
                Constraint::Length(8),
            ];

            let title = if app.tasks.is_empty() {
                format!("{} - {}", theme.title(), theme.empty_list())
            } else {
                format!("{} - Tasks", theme.title())
            };
            let table = Table::new(rows, widths)
                .header(Row::new(vec!["", "Title", "Category", "Due", "Status"])
                    .style(header_style)
                    .bottom_margin(1))
                .block(block(title))
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");

            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(4)].as_ref())
                .split(chunks[0]);
            f.render_stateful_widget(table, parts[0], &mut app.state);

            let details = match app.selected_task() {
                Some(t) => t.description.clone().unwrap_or_else(|| "No description.".to_string()),
                None => String::new(),
            };
            let details = Paragraph::new(details)
                .wrap(Wrap { trim: true })
                .block(block("Details".to_string()));
            f.render_widget(details, parts[1]);
        }
        ViewMode::Templates => {
            let rows: Vec<Row> = templates()
                .iter()
                .map(|t| {
                    Row::new(vec![
                        Cell::from(t.emoji),
                        Cell::from(t.title),
                        Cell::from(theme.priority_icon(t.priority)),
                        Cell::from(t.category),
                        Cell::from(t.description),
                    ])
                })
                .collect();

            let widths = [
                Constraint::Length(3),
                Constraint::Length(24),
                Constraint::Length(3),
                Constraint::Length(10),
                Constraint::Min(20),
            ];

            let table = Table::new(rows, widths)
                .header(Row::new(vec!["", "Template", "", "Category", "Description"])
                    .style(header_style)
                    .bottom_margin(1))
                .block(block(format!("{} - Templates", theme.title())))
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");

            f.render_stateful_widget(table, chunks[0], &mut app.template_state);
        }
        ViewMode::Rewards => {
            let progress = app.progress();
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(0)].as_ref())
                .split(chunks[0]);

            let pips: String = (1..=progress.total_levels)
                .map(|l| if l <= progress.level { '●' } else { '○' })
                .collect();
            let hint = if progress.at_max_level() {
                "Every reward is unlocked!".to_string()
            } else {
                format!("Complete {} more tasks to reach the next level!", progress.tasks_to_next)
            };
            let summary = Paragraph::new(vec![
                Line::from(format!("Level {}  {}", progress.level, pips)),
                Line::from(hint),
            ])
            .style(Style::default().fg(colors.accent))
            .block(block(theme.level_heading().to_string()));
            f.render_widget(summary, parts[0]);

            let rows: Vec<Row> = catalog()
                .iter()
                .map(|r| {
                    let unlocked = progress.is_unlocked(r);
                    Row::new(vec![
                        Cell::from(r.emoji),
                        Cell::from(r.name),
                        Cell::from(format!("Level {}", r.level)),
                        Cell::from(if unlocked { "Unlocked" } else { "Locked" }),
                    ])
                    .style(if unlocked { Style::default().fg(Color::Green) } else { Style::default().fg(Color::DarkGray) })
                })
                .collect();
            let widths = [
                Constraint::Length(3),
                Constraint::Min(24),
                Constraint::Length(9),
                Constraint::Length(10),
            ];
            let table = Table::new(rows, widths)
                .block(block("Rewards".to_string()))
                .row_highlight_style(highlight)
                .highlight_symbol(">> ");
            f.render_stateful_widget(table, parts[1], &mut app.reward_state);
        }
        ViewMode::Memories => {
            let text = match app.slideshow.current() {
                Some(memory) => vec![
                    Line::from(memory.title).style(header_style),
                    Line::from(memory.display_date()),
                    Line::from(""),
                    Line::from(format!(
                        "📷 {} ({}/{})",
                        app.slideshow.current_image().unwrap_or("-"),
                        app.slideshow.image_index() + 1,
                        memory.images.len()
                    )),
                    Line::from(""),
                    Line::from(memory.message),
                ],
                None => vec![Line::from("No memories yet.")],
            };
            let view = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(block(format!("{} - Memories", theme.title())));
            f.render_widget(view, chunks[0]);
        }
    }

    let status = Paragraph::new(app.status.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    let help_text = match app.input_mode {
        InputMode::Normal => match app.view_mode {
            ViewMode::Tasks => "q: Quit | a: Add | Space: Toggle Done | d: Del | c: Show/Hide Done | t: Theme | v: Next View",
            ViewMode::Templates => "q: Quit | Enter: Create Task from Template | t: Theme | v: Next View",
            ViewMode::Rewards => "q: Quit | Enter: Request Reward | t: Theme | v: Next View",
            ViewMode::Memories => "q: Quit | ←/→: Photo | n/p: Memory | t: Theme | v: Next View",
        },
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[2]);

    // Render Input Box if needed
    if app.input_mode == InputMode::Adding {
        let area = centered_rect(60, 3, f.area()); // Fixed height of 3 (border + 1 line)
        f.render_widget(Clear, area); // Clear the area first

        let prefix = match app.add_state.template {
            Some(t) => format!("Add '{}'", t.title),
            None => "Add Task".to_string(),
        };
        let prompt = match app.add_state.step {
            AddStep::Title => "Enter Title",
            AddStep::Description => "Description (Optional)",
            AddStep::Priority => "Priority: low / medium / high (default medium)",
            AddStep::DueDate => "Due Date YYYY-MM-DD (Optional)",
            AddStep::DueTime => "Due Time HH:MM (Optional)",
            AddStep::Category => "Category (Optional)",
        };

        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(format!("{prefix}: {prompt}")));

        f.render_widget(input, area);
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(r.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(r.height.saturating_sub(height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
