use anyhow::{Context, Result};
use dispatch::{ControlRequest, UiThread};
use strip::{DismissibleList, ListSnapshot};
use tracing::info;

/// Every third request from a caller removes the first cell, the rest
/// append. Each caller's removes trail two of its own appends, so none of
/// them can hit an empty list.
fn request_for(i: usize) -> ControlRequest {
    if i % 3 == 2 { ControlRequest::RemoveAt(0) } else { ControlRequest::Append }
}

pub async fn run(list: DismissibleList, callers: usize, requests: usize) -> Result<ListSnapshot> {
    let ui = UiThread::spawn(list);
    let mut tasks = Vec::with_capacity(callers);
    for _ in 0..callers {
        let handle = ui.handle();
        tasks.push(tokio::spawn(async move {
            for i in 0..requests {
                handle.send(request_for(i));
                if i % 16 == 0 { tokio::task::yield_now().await; }
            }
        }));
    }
    for task in tasks {
        task.await.context("caller task failed")?;
    }
    let list = ui.shutdown()?;
    info!(callers, requests, len = list.len(), "stress run finished");
    Ok(list.snapshot())
}
