//! Testing utilities for the retry loop.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::drafter::{DraftRequest, Drafter};
use crate::error::{DraftError, DraftResult};

#[derive(Debug, Clone)]
enum Scripted {
    Draft(String),
    Failure(String),
}

/// A drafter that replays scripted replies in order.
///
/// Every request is recorded. Once the script is used up each call fails.
#[derive(Clone, Default)]
pub struct ScriptedDrafter {
    script: Arc<RwLock<VecDeque<Scripted>>>,
    requests: Arc<RwLock<Vec<DraftRequest>>>,
}

impl ScriptedDrafter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful draft.
    pub fn with_draft(self, text: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Scripted::Draft(text.into()));
        self
    }

    /// Queue a drafter failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Scripted::Failure(message.into()));
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<DraftRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

#[async_trait]
impl Drafter for ScriptedDrafter {
    async fn draft(&self, request: &DraftRequest) -> DraftResult<String> {
        self.requests.write().unwrap().push(request.clone());

        match self.script.write().unwrap().pop_front() {
            Some(Scripted::Draft(text)) => Ok(text),
            Some(Scripted::Failure(message)) => Err(DraftError::Drafter(message.into())),
            None => Err(DraftError::Drafter("drafter script exhausted".into())),
        }
    }
}
