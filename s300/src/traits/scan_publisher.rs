use auto_impl::auto_impl;

use crate::{error::Error, frame::ScanFrame};

#[auto_impl(&, Box, Arc)]
pub trait ScanPublisher: Send + Sync {
    fn publish_scan(&self, scan: &ScanFrame) -> Result<(), Error>;
}
