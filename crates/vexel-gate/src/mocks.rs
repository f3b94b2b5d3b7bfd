use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use vexel_types::{DesignIntent, SvgDocument};

use crate::error::VisionError;
use crate::vision::{VisionValidator, VisionVerdict};

/// What the mock answers.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    Approve,
    Reject(Vec<String>),
    Fail(VisionError),
    /// Sleep this long, then approve.
    Delay(Duration),
    /// Panic with this message.
    Panic(String),
}

/// Mock vision validator for testing.
///
/// Counts calls so tests can assert whether the vision pass ran at all.
pub struct MockVisionValidator {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockVisionValidator {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn approving() -> Self {
        Self::new(MockBehavior::Approve)
    }

    pub fn rejecting(notes: &[&str]) -> Self {
        Self::new(MockBehavior::Reject(
            notes.iter().map(|n| n.to_string()).collect(),
        ))
    }

    pub fn failing(error: VisionError) -> Self {
        Self::new(MockBehavior::Fail(error))
    }

    pub fn delayed(delay: Duration) -> Self {
        Self::new(MockBehavior::Delay(delay))
    }

    pub fn panicking(message: &str) -> Self {
        Self::new(MockBehavior::Panic(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionValidator for MockVisionValidator {
    fn name(&self) -> &str {
        "mock-vision"
    }

    async fn inspect(
        &self,
        _document: &SvgDocument,
        _intent: &DesignIntent,
    ) -> Result<VisionVerdict, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Approve => Ok(VisionVerdict::approve(0.9)),
            MockBehavior::Reject(notes) => Ok(VisionVerdict::reject(0.8, notes.clone())),
            MockBehavior::Fail(err) => Err(err.clone()),
            MockBehavior::Delay(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(VisionVerdict::approve(0.9))
            }
            MockBehavior::Panic(message) => panic!("{}", message),
        }
    }
}
