//! Watch mode: serve a directory and run a command whenever a watched
//! directory is written to

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tokio::sync::oneshot;

use crate::error::{Error, Result};
use crate::server;

/// What to watch, what to run, and what to serve
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub watch_dir: PathBuf,
    pub command: String,
    pub serve_dir: PathBuf,
    pub addr: String,
}

/// Serve and watch until either fails
pub async fn run(options: WatchOptions) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })?;
    watcher.watch(&options.watch_dir, RecursiveMode::NonRecursive)?;
    tracing::info!("Watching {:?}, running {:?} on change", options.watch_dir, options.command);

    // The event loop blocks on a std channel, so it gets its own thread
    let (done_tx, done_rx) = oneshot::channel();
    let command = options.command.clone();
    thread::spawn(move || {
        // The watcher stops delivering events once dropped
        let _watcher = watcher;
        let _ = done_tx.send(watch_loop(rx, &command));
    });

    tokio::select! {
        res = server::serve(options.serve_dir, &options.addr) => res,
        res = done_rx => res.unwrap_or_else(|_| {
            Err(Error::Watch(notify::Error::generic("watch loop exited")))
        }),
    }
}

/// Run `command` once per write event until the channel closes. Watcher
/// errors end the loop, command failures are only logged.
pub fn watch_loop(rx: Receiver<notify::Result<Event>>, command: &str) -> Result<()> {
    for res in rx {
        let event = res?;
        if !is_write_event(&event) {
            continue;
        }

        for path in &event.paths {
            tracing::info!("modified file: {}", path.display());
        }
        if let Err(e) = run_command(command) {
            tracing::error!("{}", e);
        }
    }

    Ok(())
}

/// Whether an event is a write to a file's contents
pub fn is_write_event(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any)
    )
}

/// Run `command` without arguments and wait for it. A non-zero exit is an
/// error.
pub fn run_command(command: &str) -> Result<()> {
    let to_error = |source| Error::Command {
        command: command.to_string(),
        source,
    };

    let status = Command::new(command).status().map_err(to_error)?;
    if status.success() {
        tracing::debug!("{:?} finished", command);
        Ok(())
    } else {
        Err(to_error(io::Error::new(
            io::ErrorKind::Other,
            format!("exit {}", status),
        )))
    }
}
