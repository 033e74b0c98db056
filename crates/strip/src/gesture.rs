use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recognizer {
    Scroll,
    Tap,
    Pan,
}

/// How the drag-to-dismiss pan is registered against the host's other
/// recognizers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanRegistration {
    simultaneous: Vec<Recognizer>,
}

impl PanRegistration {
    pub fn new() -> Self { Self::default() }

    pub fn simultaneous_with(mut self, recognizer: Recognizer) -> Self {
        if !self.simultaneous.contains(&recognizer) {
            self.simultaneous.push(recognizer);
        }
        self
    }

    pub fn allows_simultaneous(&self, recognizer: Recognizer) -> bool { self.simultaneous.contains(&recognizer) }

    /// A pan may start when every recognizer already in progress is one it
    /// was registered to run alongside.
    pub fn may_begin(&self, active: &[Recognizer]) -> bool {
        active.iter().all(|r| *r == Recognizer::Pan || self.allows_simultaneous(*r))
    }
}
