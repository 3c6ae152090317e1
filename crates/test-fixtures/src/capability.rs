use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chorus_core::errors::CapabilityError;
use chorus_core::models::{ContextSnapshot, RoleType};
use chorus_core::traits::IGenerativeCapability;

/// One scripted response, optionally delayed.
#[derive(Debug, Clone)]
pub struct Step {
    pub delay: Option<Duration>,
    pub result: Result<String, CapabilityError>,
}

impl Step {
    pub fn reply(text: &str) -> Self {
        Self { delay: None, result: Ok(text.to_string()) }
    }

    pub fn fail(error: CapabilityError) -> Self {
        Self { delay: None, result: Err(error) }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Generative capability that replays a script. Once the script runs out,
/// every call gets the fallback step.
#[derive(Debug)]
pub struct ScriptedCapability {
    script: Mutex<VecDeque<Step>>,
    fallback: Step,
    ready: AtomicBool,
    calls: AtomicUsize,
}

impl ScriptedCapability {
    pub fn new(script: Vec<Step>, fallback: Step) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            ready: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always replies with `text`.
    pub fn always(text: &str) -> Self {
        Self::new(Vec::new(), Step::reply(text))
    }

    /// Always fails with a backend error.
    pub fn always_failing() -> Self {
        Self::new(Vec::new(), Step::fail(CapabilityError::Backend("scripted failure".into())))
    }

    /// Delay every response, scripted or fallback, by `delay`.
    pub fn into_slow(mut self, delay: Duration) -> Self {
        self.fallback.delay = Some(delay);
        let script = self.script.get_mut().unwrap_or_else(|e| e.into_inner());
        for step in script.iter_mut() {
            step.delay = Some(delay);
        }
        self
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Calls made so far, including ones that were cancelled or timed out.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_step(&self) -> Step {
        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        script.pop_front().unwrap_or_else(|| self.fallback.clone())
    }
}

impl IGenerativeCapability for ScriptedCapability {
    async fn generate(
        &self,
        _context: &ContextSnapshot,
        _role: RoleType,
    ) -> Result<String, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.next_step();
        if let Some(delay) = step.delay {
            tokio::time::sleep(delay).await;
        }
        step.result
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
