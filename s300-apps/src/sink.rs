use std::{
    io::Write,
    sync::{Mutex, PoisonError},
};

use s300::{ScanFrame, ScanPublisher, StampedTransform, TransformBroadcaster};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Record<'a> {
    Scan(&'a ScanFrame),
    Transform(&'a StampedTransform),
}

/// Writes every scan and transform as one JSON object per line.
///
/// Scans are written as `{"scan": {...}}` and transforms as
/// `{"transform": {...}}`, so both can share one stream.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_record(&self, record: &Record<'_>) -> Result<(), String> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        serde_json::to_writer(&mut *writer, record).map_err(|e| e.to_string())?;
        writer.write_all(b"\n").map_err(|e| e.to_string())?;
        writer.flush().map_err(|e| e.to_string())
    }
}

impl<W: Write + Send> ScanPublisher for JsonLinesSink<W> {
    fn publish_scan(&self, scan: &ScanFrame) -> Result<(), s300::Error> {
        self.write_record(&Record::Scan(scan)).map_err(|message| s300::Error::Publish { message })
    }
}

impl<W: Write + Send> TransformBroadcaster for JsonLinesSink<W> {
    fn send_transform(&self, transform: &StampedTransform) -> Result<(), s300::Error> {
        self.write_record(&Record::Transform(transform))
            .map_err(|message| s300::Error::Broadcast { message })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        time::{Duration, SystemTime},
    };

    use assert_approx_eq::assert_approx_eq;
    use s300::{Translation3, WindowConfig};

    use super::*;

    #[test]
    fn test_json_lines() {
        let sink = JsonLinesSink::new(Vec::new());
        let mut scan = ScanFrame::new("base_laser_link", &WindowConfig::from_field_of_view(2.0));
        scan.stamp = SystemTime::UNIX_EPOCH + Duration::from_millis(1500);
        scan.ranges = vec![1.0, 2.0, 3.0, 4.0];
        let transform = StampedTransform::from_translation(
            Translation3::new(0.115, 0.0, 0.21),
            scan.stamp,
            "base_link",
            "base_laser_link",
        );
        sink.publish_scan(&scan).unwrap();
        sink.send_transform(&transform).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["scan"]["frame_id"], "base_laser_link");
        assert_eq!(value["scan"]["ranges"].as_array().unwrap().len(), 4);
        let decoded: ScanFrame = serde_json::from_value(value["scan"].clone()).unwrap();
        assert_eq!(decoded.stamp, scan.stamp);
        assert_eq!(decoded.ranges, scan.ranges);
        assert_approx_eq!(decoded.angle_min, scan.angle_min, 1e-12);

        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["transform"]["parent_frame_id"], "base_link");
        let decoded: StampedTransform =
            serde_json::from_value(value["transform"].clone()).unwrap();
        assert_eq!(decoded, transform);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error() {
        let sink = JsonLinesSink::new(BrokenPipe);
        let scan = ScanFrame::new("laser", &WindowConfig::default());
        assert!(matches!(sink.publish_scan(&scan), Err(s300::Error::Publish { .. })));
    }
}
