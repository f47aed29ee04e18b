//! # Events Module
//!
//! Progress reporting from the pipeline to whatever drives it.
//!
//! ## Design
//! The core emits events through a channel; the CLI turns them into a
//! spinner and counters. Nothing in the core waits on a listener.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Directory(DirectoryEvent::Entered { path, .. }) = event {
//!             println!("{}", path.display());
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
