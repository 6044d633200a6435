use auto_impl::auto_impl;

use crate::{error::Error, frame::StampedTransform};

#[auto_impl(&, Box, Arc)]
pub trait TransformBroadcaster: Send + Sync {
    fn send_transform(&self, transform: &StampedTransform) -> Result<(), Error>;
}
