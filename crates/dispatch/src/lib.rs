//! Marshals list mutations from arbitrary threads onto the one context
//! that owns the list.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{sync::Arc, thread};
use strip::{ControlTarget, DismissibleList};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("ui thread panicked")]
    Panicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlRequest {
    Append,
    RemoveAt(usize),
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// External control surface. Calls enqueue and return at once; nothing is
/// reported back.
#[derive(Clone)]
pub struct ControlHandle {
    tx: Sender<ControlRequest>,
    waker: Arc<Mutex<Option<Waker>>>,
}

/// UI side of the channel. Only the owning context drains it.
pub struct UiMailbox {
    rx: Receiver<ControlRequest>,
    waker: Arc<Mutex<Option<Waker>>>,
}

pub fn channel() -> (ControlHandle, UiMailbox) {
    let (tx, rx) = unbounded::<ControlRequest>();
    let waker = Arc::new(Mutex::new(None));
    (ControlHandle { tx, waker: waker.clone() }, UiMailbox { rx, waker })
}

impl ControlHandle {
    pub fn add_item(&self) { self.send(ControlRequest::Append); }

    /// Indices outside the list are dropped when the request is applied.
    pub fn remove(&self, at: usize) { self.send(ControlRequest::RemoveAt(at)); }

    pub fn send(&self, request: ControlRequest) {
        // UI gone: nobody left to apply it
        if self.tx.send(request).is_err() { return; }
        let waker = self.waker.lock().clone();
        if let Some(wake) = waker { wake(); }
    }
}

impl UiMailbox {
    /// Called after every enqueue, from the sender's thread.
    pub fn set_waker(&self, wake: impl Fn() + Send + Sync + 'static) { *self.waker.lock() = Some(Arc::new(wake)); }

    pub fn pending(&self) -> usize { self.rx.len() }

    /// Applies every queued request in arrival order; returns how many
    /// were taken off the queue.
    pub fn drain<T: ControlTarget>(&self, target: &mut T) -> usize {
        let mut n = 0;
        while let Ok(request) = self.rx.try_recv() {
            apply(target, request);
            n += 1;
        }
        if n > 0 { debug!(requests = n, "drained control requests"); }
        n
    }
}

pub fn apply<T: ControlTarget>(target: &mut T, request: ControlRequest) -> bool {
    match request {
        ControlRequest::Append => {
            target.append_item();
            true
        }
        ControlRequest::RemoveAt(index) => target.remove_item(index),
    }
}

/// A dedicated thread acting as the UI context for headless hosts.
pub struct UiThread {
    handle: ControlHandle,
    stop_tx: Sender<()>,
    worker: thread::JoinHandle<DismissibleList>,
}

impl UiThread {
    pub fn spawn(list: DismissibleList) -> Self {
        let (handle, mailbox) = channel();
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let worker = thread::spawn(move || {
            let mut list = list;
            loop {
                crossbeam_channel::select! {
                    recv(mailbox.rx) -> msg => {
                        match msg {
                            Ok(request) => { apply(&mut list, request); }
                            Err(_) => break,
                        }
                    }
                    recv(stop_rx) -> _ => {
                        // everything sent before shutdown still lands
                        mailbox.drain(&mut list);
                        break;
                    }
                }
            }
            list
        });
        UiThread { handle, stop_tx, worker }
    }

    pub fn handle(&self) -> ControlHandle { self.handle.clone() }

    pub fn shutdown(self) -> Result<DismissibleList, DispatchError> {
        let _ = self.stop_tx.send(());
        self.worker.join().map_err(|_| DispatchError::Panicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn requests_wait_for_drain() {
        let (handle, mailbox) = channel();
        let mut list = DismissibleList::default();
        handle.add_item();
        handle.add_item();
        assert_eq!(list.len(), 0);
        assert_eq!(mailbox.pending(), 2);
        assert_eq!(mailbox.drain(&mut list), 2);
        assert_eq!(list.len(), 2);
        assert_eq!(mailbox.drain(&mut list), 0);
    }

    #[test]
    fn drain_applies_in_fifo_order() {
        let (handle, mailbox) = channel();
        let mut list = DismissibleList::default();
        for _ in 0..3 { handle.add_item(); }
        handle.remove(0);
        handle.add_item();
        mailbox.drain(&mut list);
        let ids: Vec<u64> = list.items().iter().map(|it| it.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn out_of_range_remove_is_silent() {
        let (handle, mailbox) = channel();
        let mut list = DismissibleList::default();
        for _ in 0..3 { handle.add_item(); }
        handle.remove(5);
        assert_eq!(mailbox.drain(&mut list), 4);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn waker_fires_per_request() {
        let (handle, mailbox) = channel();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        mailbox.set_waker(move || { counter.fetch_add(1, Ordering::SeqCst); });
        handle.add_item();
        handle.remove(9);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn send_after_ui_dropped_is_ignored() {
        let (handle, mailbox) = channel();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        mailbox.set_waker(move || { counter.fetch_add(1, Ordering::SeqCst); });
        drop(mailbox);
        handle.add_item();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn requests_from_other_threads_reach_ui_context() {
        let (handle, mailbox) = channel();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let h = handle.clone();
                thread::spawn(move || { for _ in 0..25 { h.add_item(); } })
            })
            .collect();
        for w in workers { w.join().unwrap(); }
        let mut list = DismissibleList::default();
        assert_eq!(mailbox.drain(&mut list), 100);
        assert_eq!(list.len(), 100);
    }

    #[test]
    fn ui_thread_applies_everything_before_shutdown() {
        let ui = UiThread::spawn(DismissibleList::default());
        let handle = ui.handle();
        let remote = thread::spawn(move || {
            for _ in 0..10 { handle.add_item(); }
            handle.remove(0);
            handle.remove(42);
        });
        remote.join().unwrap();
        let list = ui.shutdown().unwrap();
        assert_eq!(list.len(), 9);
        assert_eq!(list.items()[0].id.0, 1);
    }
}
