//! Console plumbing: animated pauses, timed stdin reads, event rendering.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use mindfulness_core::{BreathPhase, Event, LineSource, Pacer, PauseStyle};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
const SPINNER_FRAME: Duration = Duration::from_millis(200);

/// Real-time pauses, animated on stdout when `animate` is set.
pub struct TerminalPacer {
    animate: bool,
}

impl TerminalPacer {
    pub fn new(animate: bool) -> Self {
        Self { animate }
    }

    fn spinner(&self, duration: Duration) {
        let end = Instant::now() + duration;
        let mut out = io::stdout();
        let mut frame = 0;
        while let Some(left) = end.checked_duration_since(Instant::now()).filter(|d| !d.is_zero()) {
            let _ = write!(out, "{}", SPINNER[frame % SPINNER.len()]);
            let _ = out.flush();
            std::thread::sleep(left.min(SPINNER_FRAME));
            let _ = write!(out, "\x08 \x08");
            frame += 1;
        }
        let _ = out.flush();
    }

    fn countdown(&self, duration: Duration) {
        let end = Instant::now() + duration;
        let mut out = io::stdout();
        while let Some(left) = end.checked_duration_since(Instant::now()).filter(|d| !d.is_zero()) {
            let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
            let label = secs.to_string();
            let _ = write!(out, "{label}");
            let _ = out.flush();
            // Sleep down to the next whole second.
            let step = left.saturating_sub(Duration::from_secs(secs - 1));
            std::thread::sleep(step);
            let erase = "\x08".repeat(label.len());
            let _ = write!(out, "{erase}{}{erase}", " ".repeat(label.len()));
        }
        let _ = out.flush();
    }
}

impl Pacer for TerminalPacer {
    fn pause(&self, style: PauseStyle, duration: Duration) {
        match style {
            PauseStyle::Spinner if self.animate => self.spinner(duration),
            PauseStyle::Countdown if self.animate => self.countdown(duration),
            _ => std::thread::sleep(duration),
        }
    }
}

/// Stdin lines delivered over a channel, so reads can time out.
pub struct StdinLines {
    rx: Receiver<String>,
}

impl StdinLines {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Wait for the next line. `None` once stdin is closed.
    pub fn next_line(&self) -> Option<String> {
        self.rx.recv().ok()
    }
}

impl LineSource for StdinLines {
    fn read_line(&self, timeout: Duration) -> Option<String> {
        match self.rx.recv_timeout(timeout) {
            Ok(line) => Some(line),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(timeout);
                None
            }
        }
    }
}

/// Print an event as text, or as one JSON line.
pub fn render(event: &Event, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "event not serializable"),
        }
        return;
    }

    let mut out = io::stdout();
    let _ = match event {
        Event::ActivityStarted {
            name,
            description,
            duration_secs,
            ..
        } => write!(
            out,
            "\n--- {name} ---\n\n{description}\n\nStarting {name} for {duration_secs} seconds.\n"
        ),
        Event::GetReady => write!(out, "\nGet ready... "),
        Event::PromptShown { prompt } => write!(out, "\n\nPrompt:\n  >>> {prompt}\n"),
        Event::ReflectionOpened => {
            write!(out, "\nWhen you are ready, reflect on the following questions:\n")
        }
        Event::QuestionShown { question } => write!(out, "\n - {question} "),
        Event::BreathPhase { phase, .. } => match phase {
            BreathPhase::In => write!(out, "\nBreathe in... "),
            BreathPhase::Out => write!(out, "\nBreathe out... "),
        },
        Event::ThinkingStarted { .. } => {
            write!(out, "\nYou will have a short time to think. Prepare... ")
        }
        Event::ListingOpened => write!(
            out,
            "\n\nStart listing items now (press Enter after each item). \
             The timer will stop when time is up.\n"
        ),
        Event::TimeLeft { remaining_secs } => write!(out, "Time left: {remaining_secs}s > "),
        Event::ItemListed { .. } => Ok(()),
        Event::ListingSummary { items } => {
            let mut text = format!("\n\nYou listed {} item(s):\n", items.len());
            for (i, item) in items.iter().enumerate() {
                text.push_str(&format!("  {}. {item}\n", i + 1));
            }
            write!(out, "{text}")
        }
        Event::WellDone => write!(out, "\n\nWell done! "),
        Event::ActivityCompleted {
            name,
            duration_secs,
            ..
        } => write!(
            out,
            "\nYou have completed the {name} for {duration_secs} seconds. "
        ),
    };
    let _ = out.flush();
}
