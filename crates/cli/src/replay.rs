use anyhow::{Context, Result};
use dispatch::{ControlHandle, UiMailbox};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strip::{DismissibleList, ListSnapshot, ReleaseOutcome};
use tracing::info;

/// One scripted input. Local steps act on the list directly, as user input
/// on the UI context would; remote steps go through a `ControlHandle` from
/// a separate task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Add,
    Tap { index: usize },
    Drag {
        index: usize,
        /// Total translation since the drag began, one entry per movement.
        moves: Vec<(f32, f32)>,
        #[serde(default)]
        cancel: bool,
    },
    RemoteAdd {
        #[serde(default = "one")]
        count: usize,
    },
    RemoteRemove { index: usize },
    Wait { secs: f64 },
}

fn one() -> usize { 1 }

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepResult {
    Appended { index: usize },
    Removed { index: usize, id: u64 },
    Ignored,
    Dismissed { index: usize, id: u64 },
    SnappedBack { index: usize, from: f32 },
    Reset,
    Applied { requests: usize },
    Waited { animating: bool },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepResult>,
    pub final_state: ListSnapshot,
    pub elapsed_secs: f64,
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
}

pub async fn run(steps: &[Step], mut list: DismissibleList) -> Result<ReplayReport> {
    let (handle, mailbox) = dispatch::channel();
    let mut now = 0.0_f64;
    let mut results = Vec::with_capacity(steps.len());
    for step in steps {
        let result = match step {
            Step::Add => StepResult::Appended { index: list.append() },
            Step::Tap { index } => match list.tap(*index) {
                Some(item) => StepResult::Removed { index: *index, id: item.id.0 },
                None => StepResult::Ignored,
            },
            Step::Drag { index, moves, cancel } => drag(&mut list, *index, moves, *cancel, now),
            Step::RemoteAdd { count } => {
                let count = *count;
                remote(&handle, &mailbox, &mut list, move |h| { for _ in 0..count { h.add_item(); } }).await?
            }
            Step::RemoteRemove { index } => {
                let index = *index;
                remote(&handle, &mailbox, &mut list, move |h| h.remove(index)).await?
            }
            Step::Wait { secs } => {
                now += secs.max(0.0);
                StepResult::Waited { animating: list.tick(now) }
            }
        };
        info!(?step, ?result, "step");
        results.push(result);
    }
    Ok(ReplayReport { steps: results, final_state: list.snapshot(), elapsed_secs: now })
}

fn drag(list: &mut DismissibleList, index: usize, moves: &[(f32, f32)], cancel: bool, now: f64) -> StepResult {
    if !list.begin_drag(index) { return StepResult::Ignored; }
    for (dx, dy) in moves { list.update_drag(*dx, *dy); }
    let outcome = if cancel { list.cancel_drag(now) } else { list.end_drag(now) };
    match outcome {
        Some(ReleaseOutcome::Dismissed { index, item }) => StepResult::Dismissed { index, id: item.id.0 },
        Some(ReleaseOutcome::SnappedBack { index, from }) => StepResult::SnappedBack { index, from },
        Some(ReleaseOutcome::Reset) | None => StepResult::Reset,
    }
}

async fn remote<F>(handle: &ControlHandle, mailbox: &UiMailbox, list: &mut DismissibleList, send: F) -> Result<StepResult>
where
    F: FnOnce(&ControlHandle) + Send + 'static,
{
    let h = handle.clone();
    tokio::spawn(async move { send(&h) }).await.context("remote caller task failed")?;
    Ok(StepResult::Applied { requests: mailbox.drain(list) })
}
