use crate::collectors::RecordSource;
use crate::config::Config;
use crate::input::{Action, Input};
use crate::models::disk::{DiskRecord, SizeMode};
use crate::ui::compose::compose_canvas;
use crate::ui::{canvas, theme::Theme};
use anyhow::Result;
use chrono::Local;
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, warn};

const TIMESTAMP_FMT: &str = "%m/%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminated,
}

// ── Session state ─────────────────────────────────────────────────────

/// Everything the interactive loop mutates, owned by the loop alone.
#[derive(Debug)]
pub struct Session {
    pub phase:    Phase,
    pub mode:     SizeMode,
    /// Last status text set by a key ("m": size mode = fill)
    pub status:   String,
    /// Every status / resize message, printed after the canvas is torn down
    pub messages: Vec<String>,
    /// Set while the record source is failing; shown instead of `status`
    pub error:    Option<String>,
    records:      Vec<DiskRecord>,
    last_size:    Option<(u16, u16)>,
    redraw:       bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase:     Phase::Running,
            mode:      SizeMode::default(),
            status:    String::new(),
            messages:  Vec::new(),
            error:     None,
            records:   Vec::new(),
            last_size: None,
            redraw:    true,
        }
    }
}

impl Session {
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Compare the terminal size with the previous cycle's and request a
    /// redraw if it changed.
    pub fn observe_size(&mut self, columns: u16, rows: u16) {
        let now = (columns, rows);
        if let Some(prev) = self.last_size {
            if prev != now {
                self.messages.push(format!("resize to {} x {}", rows, columns));
                self.redraw = true;
            }
        }
        self.last_size = Some(now);
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.phase = Phase::Terminated,
            Action::CycleSizeMode => {
                self.mode   = self.mode.next();
                self.status = format!("\"m\": size mode = {}", self.mode.label());
                self.messages.push(self.status.clone());
                self.redraw = true;
            }
            Action::None => {}
        }
    }

    /// Re-poll the source. On failure the previous records stay on screen
    /// and the redraw stays pending so the next cycle tries again.
    pub fn refresh<S: RecordSource>(&mut self, source: &mut S) {
        match source.query() {
            Ok(records) => {
                debug!(count = records.len(), "records refreshed");
                self.records = records;
                self.error   = None;
                self.redraw  = false;
            }
            Err(e) => {
                warn!(error = %e, "record source failed, retrying next cycle");
                let msg = format!("df failed: {}", e);
                if self.messages.last() != Some(&msg) {
                    self.messages.push(msg.clone());
                }
                self.error = Some(msg);
            }
        }
    }

    pub fn status_text(&self) -> &str {
        self.error.as_deref().unwrap_or(&self.status)
    }

    pub fn records(&self) -> &[DiskRecord] {
        &self.records
    }
}

// ── App ───────────────────────────────────────────────────────────────

pub struct App<S: RecordSource> {
    pub config:  Config,
    pub theme:   Theme,
    pub session: Session,
    source:      S,
}

impl<S: RecordSource> App<S> {
    pub fn new(config: Config, source: S) -> Self {
        Self { config, theme: Theme::default(), session: Session::default(), source }
    }

    // ── Main event loop ───────────────────────────────────────────────

    /// Run until the quit key. Each cycle draws only when something changed,
    /// then blocks on the next input event.
    pub fn run<B: Backend, I: Input>(&mut self, terminal: &mut Terminal<B>, input: &mut I) -> Result<()> {
        while self.session.phase == Phase::Running {
            let size = terminal.size()?;
            self.session.observe_size(size.width, size.height);

            if self.session.needs_redraw() {
                self.session.refresh(&mut self.source);
                let ts = Local::now().format(TIMESTAMP_FMT).to_string();
                let placed = compose_canvas(
                    self.session.records(),
                    size.width,
                    size.height,
                    self.session.mode,
                    &self.config.thresholds,
                    &ts,
                    self.session.status_text(),
                );
                let theme = &self.theme;
                terminal.draw(|f| canvas::render(f, &placed, theme))?;
            }

            let action = input.next_action()?;
            self.session.apply(action);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordSourceError;
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    struct FakeSource {
        records:  Vec<DiskRecord>,
        polls:    usize,
        failures: usize,
    }

    impl FakeSource {
        fn new(failures: usize) -> Self {
            let rec = |mount: &str, size: u64| DiskRecord {
                device_path: format!("/dev/{}", mount.trim_start_matches('/')),
                fstype:      "ext4".into(),
                size,
                used:        size / 4,
                avail:       size - size / 4,
                used_pct:    25,
                root_mount:  mount.into(),
            };
            Self {
                records: vec![rec("/home", 400_000_000_000), rec("/", 100_000_000_000)],
                polls:   0,
                failures,
            }
        }
    }

    impl RecordSource for FakeSource {
        fn query(&mut self) -> Result<Vec<DiskRecord>, RecordSourceError> {
            self.polls += 1;
            if self.polls <= self.failures {
                return Err(RecordSourceError::Malformed { line: 3, reason: "bad row".into() });
            }
            Ok(self.records.clone())
        }
    }

    /// Replays actions, then quits.
    struct Scripted(VecDeque<Action>);

    impl Input for Scripted {
        fn next_action(&mut self) -> Result<Action> {
            Ok(self.0.pop_front().unwrap_or(Action::Quit))
        }
    }

    fn run(actions: &[Action], failures: usize) -> (App<FakeSource>, Terminal<TestBackend>) {
        let mut app  = App::new(Config::default(), FakeSource::new(failures));
        let mut term = Terminal::new(TestBackend::new(100, 12)).unwrap();
        let mut input = Scripted(actions.iter().copied().collect());
        app.run(&mut term, &mut input).unwrap();
        (app, term)
    }

    fn screen_row(term: &Terminal<TestBackend>, y: u16) -> String {
        let buf = term.backend().buffer();
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn first_cycle_draws_once_then_quits() {
        let (app, term) = run(&[], 0);
        assert_eq!(app.source.polls, 1);
        assert_eq!(app.session.phase, Phase::Terminated);
        assert!(app.session.messages.is_empty());
        assert!(screen_row(&term, 2).starts_with("/ "));
        assert!(screen_row(&term, 3).starts_with("/home"));
    }

    #[test]
    fn unrelated_keys_do_not_redraw() {
        let (app, _) = run(&[Action::None, Action::None, Action::None], 0);
        assert_eq!(app.source.polls, 1);
    }

    #[test]
    fn mode_key_cycles_and_redraws() {
        let (app, term) = run(&[Action::CycleSizeMode, Action::None, Action::CycleSizeMode, Action::CycleSizeMode], 0);
        assert_eq!(app.source.polls, 4);
        assert_eq!(app.session.mode, SizeMode::Fill);
        assert_eq!(
            app.session.messages,
            [
                "\"m\": size mode = fill",
                "\"m\": size mode = proportional",
                "\"m\": size mode = fill",
            ]
        );
        assert!(screen_row(&term, 1).contains("fill"));
        assert!(screen_row(&term, 11).starts_with("\"m\": size mode = fill"));
    }

    #[test]
    fn source_failure_retries_next_cycle() {
        let (app, _) = run(&[Action::None, Action::None], 1);
        // failed poll, retry succeeds, then nothing left to redraw
        assert_eq!(app.source.polls, 2);
        assert_eq!(app.session.error, None);
        assert_eq!(app.session.messages.len(), 1);
        assert!(app.session.messages[0].starts_with("df failed"));
        assert_eq!(app.session.records().len(), 2);
    }

    #[test]
    fn failing_source_shows_error_in_status() {
        let (app, term) = run(&[], 5);
        assert!(app.session.records().is_empty());
        assert!(screen_row(&term, 11).starts_with("df failed"));
    }

    #[test]
    fn repeated_failure_is_recorded_once() {
        let (app, _) = run(&[Action::CycleSizeMode, Action::CycleSizeMode, Action::None], 10);
        // one poll per cycle, the quit cycle included
        assert_eq!(app.source.polls, 4);
        let failures = app.session.messages.iter().filter(|m| m.starts_with("df failed")).count();
        // each mode change separates two failures in the log
        assert_eq!(failures, 3);

        let mut s = Session::default();
        let mut src = FakeSource::new(10);
        for _ in 0..4 {
            s.refresh(&mut src);
        }
        assert_eq!(src.polls, 4);
        assert_eq!(s.messages.len(), 1);
        assert!(s.error.is_some());
    }

    #[test]
    fn resize_requests_redraw() {
        let mut s = Session::default();
        s.observe_size(80, 24);
        assert!(s.messages.is_empty());
        s.redraw = false;

        s.observe_size(80, 24);
        assert!(!s.needs_redraw());

        s.observe_size(120, 30);
        assert!(s.needs_redraw());
        assert_eq!(s.messages, ["resize to 30 x 120"]);
    }

    #[test]
    fn quit_terminates() {
        let mut s = Session::default();
        s.apply(Action::None);
        assert_eq!(s.phase, Phase::Running);
        s.apply(Action::Quit);
        assert_eq!(s.phase, Phase::Terminated);
    }
}
