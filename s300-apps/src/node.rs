use s300::{
    AcquisitionLoop, Clock, DeviceLink, PoseBroadcaster, ScanPublisher, TickOutcome, TimeSync,
    TransformBroadcaster,
};

use crate::NodeConfig;

/// Acquisition loop and pose broadcaster driven together, one tick at a time.
#[derive(Debug)]
pub struct Node<D, T, P, B> {
    acquisition: AcquisitionLoop<D, T, P>,
    pose: PoseBroadcaster<B>,
}

impl<D, T, P, B> Node<D, T, P, B>
where
    D: DeviceLink,
    T: TimeSync,
    P: ScanPublisher,
    B: TransformBroadcaster,
{
    pub fn new(config: &NodeConfig, device: D, time_sync: T, publisher: P, broadcaster: B) -> Self {
        Self {
            acquisition: AcquisitionLoop::new(
                config.acquisition_config(),
                device,
                time_sync,
                publisher,
            ),
            pose: PoseBroadcaster::new(config.spatial_offset(), &config.frame_id, broadcaster),
        }
    }

    pub fn with_clock(self, clock: impl Clock + Clone + 'static) -> Self {
        Self {
            acquisition: self.acquisition.with_clock(clock.clone()),
            pose: self.pose.with_clock(clock),
        }
    }

    /// Runs one acquisition cycle, then broadcasts the sensor pose whatever
    /// the cycle's outcome.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.acquisition.update();
        self.pose.broadcast();
        outcome
    }

    pub fn acquisition(&self) -> &AcquisitionLoop<D, T, P> {
        &self.acquisition
    }

    pub fn acquisition_mut(&mut self) -> &mut AcquisitionLoop<D, T, P> {
        &mut self.acquisition
    }

    pub fn pose(&self) -> &PoseBroadcaster<B> {
        &self.pose
    }
}
