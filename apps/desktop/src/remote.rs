use std::io::BufRead;
use std::thread;

use dispatch::{ControlHandle, ControlRequest};

/// `add` or `remove <index>`, one per line.
pub(crate) fn parse_command(line: &str) -> Option<ControlRequest> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next()?;
    let request = match cmd.to_ascii_lowercase().as_str() {
        "add" => ControlRequest::Append,
        "remove" | "rm" => ControlRequest::RemoveAt(parts.next()?.parse().ok()?),
        _ => return None,
    };
    if parts.next().is_some() { return None; }
    Some(request)
}

/// Lets a host process drive the strip over stdin. The reader never
/// touches the list; it only enqueues requests for the UI thread.
pub(crate) fn spawn_stdin_reader(handle: ControlHandle) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break; };
            if line.trim().is_empty() { continue; }
            match parse_command(&line) {
                Some(request) => handle.send(request),
                None => tracing::warn!(line = %line.trim(), "unrecognized remote command"),
            }
        }
        tracing::debug!("stdin closed, remote control reader exiting");
    })
}
