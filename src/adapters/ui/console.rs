//! Line-oriented terminal front end.
//!
//! Prints a colored status bar whenever Zoom's state changes, one line per
//! publish attempt (`[204] Bob to Everyone: hello`), and the totals footer
//! whenever either of those changes.

use crate::domain::{ApplicationStatus, Dashboard, DomainError, PublishAttempt, PublishEvent};
use crate::ports::{EventStream, EventView};
use async_trait::async_trait;
use crossterm::QueueableCommand;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use std::io::{Write, stdout};
use tracing::error;

const FALLBACK_WIDTH: usize = 80;

#[derive(Debug, Default)]
pub struct ConsoleView;

impl ConsoleView {
    pub fn new() -> Self {
        Self
    }

    fn write_status(&self, board: &Dashboard) -> std::io::Result<()> {
        let width = terminal_width();
        let cell_width = width.saturating_sub(2) / 3;
        let mut out = stdout();

        for (i, (label, ok)) in status_labels(&board.status).into_iter().enumerate() {
            if i > 0 {
                out.queue(Print(" "))?;
            }
            match ok {
                Some(true) => {
                    out.queue(SetForegroundColor(Color::White))?;
                    out.queue(SetBackgroundColor(Color::DarkGreen))?;
                }
                Some(false) => {
                    out.queue(SetForegroundColor(Color::White))?;
                    out.queue(SetBackgroundColor(Color::DarkRed))?;
                }
                None => {
                    out.queue(SetForegroundColor(Color::DarkGrey))?;
                }
            }
            out.queue(Print(center(label, cell_width)))?;
            out.queue(ResetColor)?;
        }
        out.queue(Print("\r\n"))?;
        out.flush()
    }

    fn write_summary(&self, board: &Dashboard) -> std::io::Result<()> {
        let width = terminal_width();
        let mut out = stdout();
        out.queue(SetForegroundColor(Color::Black))?;
        out.queue(SetBackgroundColor(Color::Grey))?;
        out.queue(Print(truncate(&summary_line(board), width)))?;
        out.queue(ResetColor)?;
        out.queue(Print("\r\n"))?;
        out.flush()
    }

    fn write_attempt(&self, attempt: &PublishAttempt) -> std::io::Result<()> {
        let width = terminal_width();
        let (label, ok) = attempt_label(attempt);
        // "[", "]", and a space on each side of the text.
        let max_text = width.saturating_sub(label.chars().count() + 4);
        let text = truncate(&attempt.chat_message.to_string().replace('\n', "⏎"), max_text);

        let mut out = stdout();
        out.queue(Print("["))?;
        out.queue(SetForegroundColor(if ok { Color::Green } else { Color::Red }))?;
        out.queue(Print(label))?;
        out.queue(ResetColor)?;
        out.queue(Print(format!("] {}\r\n", text)))?;
        out.flush()
    }
}

#[async_trait]
impl EventView for ConsoleView {
    async fn render(&self, mut events: EventStream) -> Result<(), DomainError> {
        let mut board = Dashboard::new();
        let mut shown = Shown::default();

        while let Some(event) = events.recv().await {
            board.apply(&event);
            let redraw = shown.update(&board);
            if redraw.status {
                self.write_status(&board)
                    .map_err(|e| DomainError::View(e.to_string()))?;
            }
            if let Ok(PublishEvent::Publish(attempt)) = &event {
                self.write_attempt(attempt)
                    .map_err(|e| DomainError::View(e.to_string()))?;
            }
            if redraw.footer {
                self.write_summary(&board)
                    .map_err(|e| DomainError::View(e.to_string()))?;
            }
        }

        error!("event stream terminated unexpectedly (console view)");
        Ok(())
    }
}

/// What the console last printed.
#[derive(Debug, Default)]
struct Shown {
    status: Option<ApplicationStatus>,
    totals: Option<(u64, u64)>,
}

#[derive(Debug, PartialEq, Eq)]
struct Redraw {
    status: bool,
    footer: bool,
}

impl Shown {
    fn update(&mut self, board: &Dashboard) -> Redraw {
        let totals = (board.success_count, board.total_count());
        let status = self.status != Some(board.status);
        let footer = status || self.totals != Some(totals);
        self.status = Some(board.status);
        self.totals = Some(totals);
        Redraw { status, footer }
    }
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(w, _)| usize::from(w))
        .unwrap_or(FALLBACK_WIDTH)
}

/// Labels for the three status cells; `None` means not applicable.
fn status_labels(status: &ApplicationStatus) -> [(&'static str, Option<bool>); 3] {
    let running = status.is_running();
    let meeting = status.meeting_in_progress();
    let chat = status.chat_open();
    [
        (
            if running { "Zoom Is Running" } else { "Zoom Not Running" },
            Some(running),
        ),
        (
            if meeting == Some(true) {
                "Meeting In Progress"
            } else {
                "No Meeting In Progress"
            },
            meeting,
        ),
        (
            if chat == Some(true) { "Chat Is Open" } else { "Chat Not Open" },
            chat,
        ),
    ]
}

/// Status code, or the error text when the attempt never got a response.
fn attempt_label(attempt: &PublishAttempt) -> (String, bool) {
    match &attempt.result {
        Ok(summary) => (summary.status.to_string(), summary.is_success()),
        Err(e) => (e.to_string(), false),
    }
}

fn summary_line(board: &Dashboard) -> String {
    format!(
        "Up {} | Messages Published: {}/{}",
        format_uptime(board.uptime()),
        board.success_count,
        board.total_count()
    )
}

fn format_uptime(uptime: chrono::Duration) -> String {
    let secs = uptime.num_seconds().max(0);
    let (days, hours, minutes, seconds) = (
        secs / 86_400,
        secs % 86_400 / 3_600,
        secs % 3_600 / 60,
        secs % 60,
    );
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let pad = width - len;
    let before = pad / 2;
    format!("{}{}{}", " ".repeat(before), text, " ".repeat(pad - before))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}
