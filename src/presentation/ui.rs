use crate::application::{App, AppMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_form(f, app, chunks[1]);
    render_list(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let state = app.store.state();
    let header = Paragraph::new(format!(
        "todolist | {} item(s), {} done",
        state.len(),
        state.done_count()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == AppMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let (offset, cursor_col) = form_view(&app.input, app.cursor_position, inner_width);

    let form = Paragraph::new(app.input.as_str())
        .scroll((0, u16::try_from(offset).unwrap_or(u16::MAX)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("New todo"),
        );
    f.render_widget(form, area);

    if editing {
        let col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
        f.set_cursor_position((area.x.saturating_add(1).saturating_add(col), area.y + 1));
    }
}

/// Horizontal scroll offset and cursor column of the form field, both in
/// display cells, so the cursor stays inside a field `inner_width` wide.
fn form_view(input: &str, cursor: usize, inner_width: usize) -> (usize, usize) {
    let before: String = input.chars().take(cursor).collect();
    let before_width = Line::raw(before).width();
    let offset = before_width.saturating_sub(inner_width.saturating_sub(1));
    (offset, before_width - offset)
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .state()
        .todos
        .iter()
        .map(|todo| {
            let (marker, text_style) = if todo.item.done {
                let struck = Style::default()
                    .add_modifier(Modifier::CROSSED_OUT)
                    .fg(Color::DarkGray);
                ("[x] ", struck)
            } else {
                ("[ ] ", Style::default())
            };
            let mut line = Line::from(vec![
                Span::raw(marker),
                Span::styled(todo.item.description.clone(), text_style),
            ]);
            if app.pending_delete == Some(todo.id) {
                line = line.style(Style::default().fg(Color::Red));
            }
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(app.options.title.as_str()))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(app.selected_position());
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => app.status_message.clone().unwrap_or_else(|| {
            "a: add | d/space: done | x/Del: delete | ↑↓/jk: move | F1/?: help | q: quit"
                .to_string()
        }),
        AppMode::Editing => app
            .status_message
            .clone()
            .unwrap_or_else(|| "Enter: add todo | Esc: back to list".to_string()),
        AppMode::Help => {
            "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string()
        }
    };

    let style = match app.mode {
        AppMode::Normal => Style::default(),
        AppMode::Editing => Style::default().fg(Color::Green),
        AppMode::Help => Style::default().fg(Color::Cyan),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("todolist Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"TODOLIST KEYS

=== LIST ===
↑↓ or k/j       Move the selection
Home/g, End/G   First / last todo
d, Space, Enter Mark the selected todo as done
x or Delete     Delete the selected todo
                (press twice when confirm_delete is on)
Esc             Disarm a pending delete

=== FORM ===
a, i or Tab     Focus the "New todo" field
Enter           Add the typed text as a new todo
Esc             Leave the field, discarding the text
←→ Home End     Move the cursor
Backspace/Del   Edit the text

=== HELP ===
↑↓ or j/k       Scroll one line
Page Up/Down    Scroll five lines
Home            Jump to top
Esc/F1/?/q      Close this window

=== NOTES ===
Blank text is not added.
Todos live only for this session; nothing is saved on exit.

q               Quit"#;
