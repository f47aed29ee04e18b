//! Quiet runs still log per-file errors.

mod common;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use common::{write_bytes, write_png, Split};
use photo_canon::core::pipeline::{Mode, Pipeline};
use photo_canon::{init_tracing_with_writer, Verbosity};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn quiet_run_logs_failures_but_not_renames() {
    std::env::remove_var("RUST_LOG");
    let captured = Captured::default();
    let writer = captured.clone();
    init_tracing_with_writer(Verbosity::Quiet, move || writer.clone());

    let temp = TempDir::new().unwrap();
    write_bytes(&temp.child("photos/broken.png"), b"this is not a valid image file");
    write_png(&temp.child("photos/good.png"), Split::LeftRight, 20, 230);

    let summary = Pipeline::builder()
        .root(temp.child("photos").path())
        .modes([Mode::Rename])
        .duplicate_dir(temp.child("dupes").path())
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.renamed, 1);

    let output = captured.text();
    assert!(output.contains("There was an error handling"), "{output}");
    assert!(output.contains("broken.png"), "{output}");
    assert!(!output.contains("good.png"), "{output}");
}
