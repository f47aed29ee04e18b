//! Spinner driven by pipeline events.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use photo_canon::events::{DirectoryEvent, Event, EventReceiver, PipelineEvent, SimilarEvent};
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// A visible spinner, or a hidden one that swallows every update
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            let bar = ProgressBar::new_spinner();
            if let Ok(spinner_style) =
                ProgressStyle::default_spinner().template("{spinner:.green} {pos} processed  {msg}")
            {
                bar.set_style(spinner_style);
            }
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { bar }
    }

    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }

    /// Consume events on a background thread until every sender is dropped
    pub fn listen(&self, receiver: EventReceiver, root: PathBuf) -> JoinHandle<()> {
        let bar = self.bar.clone();

        thread::spawn(move || {
            for event in receiver.iter() {
                match event {
                    Event::Pipeline(PipelineEvent::PassStarted { mode, directories }) => {
                        bar.set_message(format!("{} pass, {} directories", mode, directories));
                    }
                    Event::Directory(DirectoryEvent::Entered { mode, path, .. }) => {
                        let relative = path.strip_prefix(&root).unwrap_or(&path);
                        bar.set_message(format!(
                            "{} {}",
                            style(mode).cyan(),
                            relative.display()
                        ));
                    }
                    Event::File(_) => bar.inc(1),
                    Event::Similar(SimilarEvent::PairFound { .. }) => bar.inc(1),
                    Event::Pipeline(PipelineEvent::Cancelled) => {
                        bar.set_message("cancelled");
                    }
                    _ => {}
                }
            }
        })
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Log writer that keeps log lines from tearing the spinner
#[derive(Clone)]
pub struct ProgressWriter {
    bar: ProgressBar,
}

impl ProgressWriter {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bar.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressWriter {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
