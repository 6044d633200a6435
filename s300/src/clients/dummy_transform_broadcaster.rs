use std::sync::Mutex;

use crate::{error::Error, frame::StampedTransform, traits::TransformBroadcaster};

/// Dummy TransformBroadcaster that keeps every sent transform.
#[derive(Debug, Default)]
pub struct DummyTransformBroadcaster {
    transforms: Mutex<Vec<StampedTransform>>,
}

impl DummyTransformBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transforms(&self) -> Vec<StampedTransform> {
        self.transforms.lock().unwrap().clone()
    }
}

impl TransformBroadcaster for DummyTransformBroadcaster {
    fn send_transform(&self, transform: &StampedTransform) -> Result<(), Error> {
        self.transforms.lock().unwrap().push(transform.clone());
        Ok(())
    }
}
