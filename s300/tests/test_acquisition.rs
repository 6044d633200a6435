use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use assert_approx_eq::assert_approx_eq;
use s300::{
    to_secs, AcquisitionConfig, AcquisitionLoop, ConnectionState, DummyDeviceLink,
    DummyScanPublisher, FixedClock, TickOutcome, TimeSync,
};

const SYNCED_STAMP: f64 = 1_700_000_123.5;

/// Returns a constant and remembers what it was asked.
#[derive(Default)]
struct TestTimeSync {
    calls: Vec<(f64, f64, u32)>,
}

impl TimeSync for TestTimeSync {
    fn sync(&mut self, nominal_secs: f64, wall_clock_secs: f64, sequence: u32) -> f64 {
        self.calls.push((nominal_secs, wall_clock_secs, sequence));
        SYNCED_STAMP
    }
}

fn wall_clock() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_250)
}

fn new_loop<'a>(
    config: AcquisitionConfig,
    device: DummyDeviceLink,
    time_sync: &'a mut TestTimeSync,
    clock: Arc<FixedClock>,
) -> AcquisitionLoop<DummyDeviceLink, &'a mut TestTimeSync, DummyScanPublisher> {
    AcquisitionLoop::new(config, device, time_sync, DummyScanPublisher::new()).with_clock(clock)
}

#[test]
fn test_read_failure_then_recovery() {
    let clock = Arc::new(FixedClock::new(wall_clock()));
    let mut time_sync = TestTimeSync::default();
    let mut acquisition = new_loop(
        AcquisitionConfig::default(),
        DummyDeviceLink::new(),
        &mut time_sync,
        clock,
    );

    assert_eq!(acquisition.update(), TickOutcome::Published);
    assert_eq!(acquisition.publisher().scans().len(), 1);

    acquisition.device_mut().read_failures = 1;
    acquisition.device_mut().connect_failures = 1;
    assert_eq!(acquisition.update(), TickOutcome::ReadFailed);
    assert_eq!(acquisition.state(), ConnectionState::Disconnected);
    assert_eq!(acquisition.publisher().scans().len(), 1);

    // reconnect is attempted on the next tick, and again after it fails
    assert_eq!(acquisition.update(), TickOutcome::ConnectFailed);
    assert_eq!(acquisition.device().connect_count(), 2);
    assert_eq!(acquisition.update(), TickOutcome::Published);
    assert_eq!(acquisition.device().connect_count(), 3);
    assert_eq!(acquisition.state(), ConnectionState::Connected);
    assert_eq!(acquisition.publisher().scans().len(), 2);

    let stats = acquisition.stats();
    assert_eq!(stats.published, 2);
    assert_eq!(stats.read_failures, 1);
    assert_eq!(stats.connect_attempts, 3);
}

#[test]
fn test_synchronized_stamp() {
    let clock = Arc::new(FixedClock::new(wall_clock()));
    let mut time_sync = TestTimeSync::default();
    let mut device = DummyDeviceLink::new();
    device.scan_number = 99;
    let mut acquisition = new_loop(AcquisitionConfig::default(), device, &mut time_sync, clock);

    assert_eq!(acquisition.update(), TickOutcome::Published);
    let scans = acquisition.publisher().scans();
    assert_approx_eq!(to_secs(scans[0].stamp), SYNCED_STAMP, 1e-6);
    assert_ne!(scans[0].stamp, wall_clock());
    drop(acquisition);

    assert_eq!(time_sync.calls.len(), 1);
    let (nominal, wall, sequence) = time_sync.calls[0];
    assert_eq!(sequence, 100);
    assert_approx_eq!(nominal, 0.04 * 100.0, 1e-12);
    assert_approx_eq!(wall, to_secs(wall_clock()), 1e-6);
}

#[test]
fn test_sync_disabled_uses_wall_clock() {
    let clock = Arc::new(FixedClock::new(wall_clock()));
    let mut time_sync = TestTimeSync::default();
    let config = AcquisitionConfig {
        enable_time_sync: false,
        ..Default::default()
    };
    let mut acquisition = new_loop(config, DummyDeviceLink::new(), &mut time_sync, clock.clone());

    acquisition.update();
    clock.advance(Duration::from_millis(50));
    acquisition.update();
    let scans = acquisition.publisher().scans();
    assert_eq!(scans[0].stamp, wall_clock());
    assert_eq!(scans[1].stamp, wall_clock() + Duration::from_millis(50));
    drop(acquisition);
    assert!(time_sync.calls.is_empty());
}

#[test]
fn test_old_protocol_uses_wall_clock() {
    let clock = Arc::new(FixedClock::new(wall_clock()));
    let mut time_sync = TestTimeSync::default();
    let mut device = DummyDeviceLink::new();
    device.protocol_number = 0x0102;
    let mut acquisition = new_loop(AcquisitionConfig::default(), device, &mut time_sync, clock);

    assert_eq!(acquisition.update(), TickOutcome::Published);
    assert_eq!(acquisition.publisher().scans()[0].stamp, wall_clock());
    drop(acquisition);
    assert!(time_sync.calls.is_empty());
}

#[test]
fn test_windowed_frame() {
    let clock = Arc::new(FixedClock::new(wall_clock()));
    let mut time_sync = TestTimeSync::default();
    let config = AcquisitionConfig {
        field_of_view: 180.0,
        frame_id: "front_laser".to_owned(),
        ..Default::default()
    };
    let mut device = DummyDeviceLink::new();
    device.ranges = (0..540).map(|i| i as f32).collect();
    device.intensities = Some(vec![7.0; 540]);
    let mut acquisition = new_loop(config, device, &mut time_sync, clock);

    assert_eq!(acquisition.window().start(), 90);
    assert_eq!(acquisition.window().end(), 450);
    acquisition.update();
    let scans = acquisition.publisher().scans();
    let scan = &scans[0];
    assert_eq!(scan.frame_id, "front_laser");
    assert_eq!(scan.ranges.len(), 360);
    assert_eq!(scan.ranges.first(), Some(&90.0));
    assert_eq!(scan.ranges.last(), Some(&449.0));
    assert!(scan.intensities.iter().all(|&v| v == 7.0));
    assert_approx_eq!(scan.angle_min, -std::f64::consts::FRAC_PI_2, 1e-9);
    assert_approx_eq!(scan.angle_max, std::f64::consts::FRAC_PI_2, 1e-9);
    assert_eq!(acquisition.frame(), scan);
}

#[test]
fn test_out_of_range_field_of_view() {
    let clock = Arc::new(FixedClock::new(wall_clock()));
    let mut time_sync = TestTimeSync::default();
    let config = AcquisitionConfig {
        field_of_view: 400.0,
        ..Default::default()
    };
    let acquisition = new_loop(config, DummyDeviceLink::new(), &mut time_sync, clock);
    assert_eq!(acquisition.window().start(), 0);
    assert_eq!(acquisition.window().end(), 540);
    assert_eq!(acquisition.frame().ranges.len(), 540);
}
