use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use crate::{error::Error, frame::ScanFrame, traits::ScanPublisher};

/// Dummy ScanPublisher that keeps every published scan.
#[derive(Debug, Default)]
pub struct DummyScanPublisher {
    scans: Mutex<Vec<ScanFrame>>,
    fail: AtomicBool,
}

impl DummyScanPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scans(&self) -> Vec<ScanFrame> {
        self.scans.lock().unwrap().clone()
    }

    /// Makes subsequent publishes fail (or succeed again).
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::Relaxed);
    }
}

impl ScanPublisher for DummyScanPublisher {
    fn publish_scan(&self, scan: &ScanFrame) -> Result<(), Error> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(Error::Publish {
                message: "dummy publisher is failing".to_owned(),
            });
        }
        self.scans.lock().unwrap().push(scan.clone());
        Ok(())
    }
}
