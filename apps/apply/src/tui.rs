use std::io;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{execute, terminal};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tokio::sync::mpsc;

use crate::catalog::FieldKind;
use crate::session::{FormSession, SubmissionState};
use crate::submit::{SubmitClient, SubmitError};

/// Runs the form in an alternate screen until the user quits. Submissions
/// are spawned off the event loop and resolve back through a channel, so
/// rendering and input never block on the network.
pub async fn run(session: &mut FormSession, client: SubmitClient) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, session, client).await;

    terminal::disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut FormSession,
    client: SubmitClient,
) -> Result<()> {
    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, SubmitError>>();

    loop {
        terminal.draw(|f| ui(f, session))?;

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else { break };
                if let Event::Key(k) = event? {
                    if k.kind != KeyEventKind::Press {
                        continue;
                    }
                    match k.code {
                        KeyCode::Esc => break,
                        KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => break,
                        KeyCode::Down | KeyCode::Tab => session.focus_next(),
                        KeyCode::Up | KeyCode::BackTab => session.focus_prev(),
                        KeyCode::Enter => {
                            if session.on_submit_control() {
                                // No-op while a request is in flight.
                                if let Some(snapshot) = session.begin_submit() {
                                    let client = client.clone();
                                    let tx = tx.clone();
                                    tokio::spawn(async move {
                                        let _ = tx.send(client.submit(&snapshot).await);
                                    });
                                }
                            } else {
                                session.focus_next();
                            }
                        }
                        KeyCode::Char(' ')
                            if matches!(
                                session.focused_field().map(|d| d.kind),
                                Some(FieldKind::Checkbox)
                            ) =>
                        {
                            session.toggle()
                        }
                        KeyCode::Char(c) => session.edit_char(c),
                        KeyCode::Backspace => session.backspace(),
                        _ => {}
                    }
                }
            }
            Some(result) = rx.recv() => {
                session.complete(result);
            }
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, session: &FormSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.size());

    let header = Paragraph::new(Line::from(Span::styled(
        "Frontend Engineer — Job Application",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).title("apply"));
    f.render_widget(header, chunks[0]);

    f.render_widget(form_body(session, chunks[1].height), chunks[1]);
    f.render_widget(status_line(session.state()), chunks[2]);

    let help = Paragraph::new(Line::raw(
        "Keys: ↑/↓/Tab move • Space toggles • Enter on [ Submit ] sends • Esc quits",
    ))
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, chunks[3]);
}

fn form_body(session: &FormSession, height: u16) -> Paragraph<'static> {
    let mut rows: Vec<Line> = Vec::with_capacity(session.submit_index() + 1);

    for (i, descriptor) in session.fields().iter().enumerate() {
        let rendered = match descriptor.kind {
            FieldKind::Checkbox => {
                if session.record().is_checked(descriptor.field_name) {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
            _ => session.display_value(i),
        };
        let label = format!("{:<18}", descriptor.field_name.wire_name());
        rows.push(focusable_row(
            format!("{label} {rendered}"),
            session.cursor() == i,
        ));
    }

    let submitting = *session.state() == SubmissionState::Submitting;
    let submit_row = if submitting {
        // Disabled while a request is in flight.
        Line::from(Span::styled(
            "  [ Submitting… ]".to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        focusable_row("[ Submit ]".to_string(), session.on_submit_control())
    };
    rows.push(submit_row);

    // Keep the focused row inside the visible window.
    let visible = height.saturating_sub(2) as usize;
    let skip = if visible > 0 && session.cursor() + 1 > visible {
        session.cursor() + 1 - visible
    } else {
        0
    };
    let rows: Vec<Line> = rows.into_iter().skip(skip).collect();

    Paragraph::new(rows).block(Block::default().borders(Borders::ALL).title("Application"))
}

fn focusable_row(text: String, focused: bool) -> Line<'static> {
    if focused {
        Line::from(Span::styled(
            format!("▸ {text}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::raw(format!("  {text}"))
    }
}

fn status_line(state: &SubmissionState) -> Paragraph<'static> {
    let line = match state {
        SubmissionState::Idle => Line::raw("Ready"),
        SubmissionState::Submitting => Line::from(Span::styled(
            "Submitting…",
            Style::default().fg(Color::Yellow),
        )),
        SubmissionState::Done => Line::from(Span::styled(
            "Application submitted",
            Style::default().fg(Color::Green),
        )),
        SubmissionState::Failed(msg) => Line::from(Span::styled(
            format!("Submission failed: {msg}"),
            Style::default().fg(Color::Red),
        )),
    };
    Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status"))
}
