//! Deserialize tracing log in JSON format

use std::time::{Duration, SystemTime};

use s300::nalgebra;
use serde::Deserialize;

pub type Timestamp = chrono::DateTime<chrono::Utc>;

pub fn from_str(lines: &str) -> Result<Vec<TracingLog>, s300::Error> {
    let mut res = vec![];
    for line in lines.lines() {
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|e| s300::Error::Other(e.into()))?;
        // ignore unrelated line and log for other target (library/binary/module).
        if !matches!(value.get("target"), Some(target) if target == "s300_tracing") {
            continue;
        }
        let Some(fields) = value.get("fields") else {
            continue;
        };
        match fields.get("method") {
            Some(v) if v == "s300::DeviceLink::connect" => {
                let log: ConnectLog =
                    serde_json::from_value(value).map_err(|e| s300::Error::Other(e.into()))?;
                res.push(TracingLog::Connect(log));
            }
            Some(v) if v == "s300::DeviceLink::read_data" => {
                let log: ReadDataLog =
                    serde_json::from_value(value).map_err(|e| s300::Error::Other(e.into()))?;
                res.push(TracingLog::ReadData(log));
            }
            Some(v) if v == "s300::TimeSync::sync" => {
                let log: SyncLog =
                    serde_json::from_value(value).map_err(|e| s300::Error::Other(e.into()))?;
                res.push(TracingLog::Sync(log));
            }
            Some(v) if v == "s300::ScanPublisher::publish_scan" => {
                let log: PublishScanLog =
                    serde_json::from_value(value).map_err(|e| s300::Error::Other(e.into()))?;
                res.push(TracingLog::PublishScan(log));
            }
            Some(v) if v == "s300::TransformBroadcaster::send_transform" => {
                let log: SendTransformLog =
                    serde_json::from_value(value).map_err(|e| s300::Error::Other(e.into()))?;
                res.push(TracingLog::SendTransform(log));
            }
            _ => continue,
        }
    }
    Ok(res)
}

#[derive(Debug)]
#[non_exhaustive]
pub enum TracingLog {
    /// [`s300::DeviceLink::connect`]
    Connect(ConnectLog),
    /// [`s300::DeviceLink::read_data`]
    ReadData(ReadDataLog),

    /// [`s300::TimeSync::sync`]
    Sync(SyncLog),

    /// [`s300::ScanPublisher::publish_scan`]
    PublishScan(PublishScanLog),

    /// [`s300::TransformBroadcaster::send_transform`]
    SendTransform(SendTransformLog),
}

#[derive(Deserialize)]
struct RawTracingLog<Fields> {
    timestamp: Timestamp,
    fields: Fields,
}

fn join_time(secs: u64, nanos: u32) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::new(secs, nanos)
}

// =============================================================================
// s300::DeviceLink

#[derive(Debug)]
#[non_exhaustive]
pub struct ConnectLog {
    pub timestamp: Timestamp,
    pub device_name: String,
    pub baud_rate: u32,
    pub ok: bool,
}

impl<'de> Deserialize<'de> for ConnectLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            device_name: String,
            baud_rate: u32,
            ok: bool,
        }
        let v = RawTracingLog::<Fields>::deserialize(deserializer)?;
        Ok(Self {
            timestamp: v.timestamp,
            device_name: v.fields.device_name,
            baud_rate: v.fields.baud_rate,
            ok: v.fields.ok,
        })
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub struct ReadDataLog {
    pub timestamp: Timestamp,
    pub ok: bool,
    pub scan_number: u32,
    pub protocol_number: u16,
    pub num_ranges: usize,
}

impl<'de> Deserialize<'de> for ReadDataLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            ok: bool,
            scan_number: u32,
            protocol_number: u16,
            num_ranges: usize,
        }
        let v = RawTracingLog::<Fields>::deserialize(deserializer)?;
        Ok(Self {
            timestamp: v.timestamp,
            ok: v.fields.ok,
            scan_number: v.fields.scan_number,
            protocol_number: v.fields.protocol_number,
            num_ranges: v.fields.num_ranges,
        })
    }
}

// =============================================================================
// s300::TimeSync

#[derive(Debug)]
#[non_exhaustive]
pub struct SyncLog {
    pub timestamp: Timestamp,
    pub nominal_secs: f64,
    pub wall_clock_secs: f64,
    pub sequence: u32,
    pub corrected_secs: f64,
}

impl SyncLog {
    /// Corrected stamp minus host time, in seconds.
    pub fn correction(&self) -> f64 {
        self.corrected_secs - self.wall_clock_secs
    }
}

impl<'de> Deserialize<'de> for SyncLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            nominal_secs: f64,
            wall_clock_secs: f64,
            sequence: u32,
            corrected_secs: f64,
        }
        let v = RawTracingLog::<Fields>::deserialize(deserializer)?;
        Ok(Self {
            timestamp: v.timestamp,
            nominal_secs: v.fields.nominal_secs,
            wall_clock_secs: v.fields.wall_clock_secs,
            sequence: v.fields.sequence,
            corrected_secs: v.fields.corrected_secs,
        })
    }
}

// =============================================================================
// s300::ScanPublisher

#[derive(Debug)]
#[non_exhaustive]
pub struct PublishScanLog {
    pub timestamp: Timestamp,
    pub frame_id: String,
    pub stamp: SystemTime,
    pub angle_min: f64,
    pub angle_max: f64,
    pub num_ranges: usize,
}

impl<'de> Deserialize<'de> for PublishScanLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            frame_id: String,
            stamp_secs: u64,
            stamp_nanos: u32,
            angle_min: f64,
            angle_max: f64,
            num_ranges: usize,
        }
        let v = RawTracingLog::<Fields>::deserialize(deserializer)?;
        Ok(Self {
            timestamp: v.timestamp,
            frame_id: v.fields.frame_id,
            stamp: join_time(v.fields.stamp_secs, v.fields.stamp_nanos),
            angle_min: v.fields.angle_min,
            angle_max: v.fields.angle_max,
            num_ranges: v.fields.num_ranges,
        })
    }
}

// =============================================================================
// s300::TransformBroadcaster

#[derive(Debug)]
#[non_exhaustive]
pub struct SendTransformLog {
    pub timestamp: Timestamp,
    pub transform: s300::StampedTransform,
}

impl<'de> Deserialize<'de> for SendTransformLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            parent_frame_id: String,
            child_frame_id: String,
            stamp_secs: u64,
            stamp_nanos: u32,
            translation_x: f64,
            translation_y: f64,
            translation_z: f64,
            rotation_w: f64,
            rotation_i: f64,
            rotation_j: f64,
            rotation_k: f64,
        }
        let v = RawTracingLog::<Fields>::deserialize(deserializer)?;
        Ok(Self {
            timestamp: v.timestamp,
            transform: s300::StampedTransform {
                stamp: join_time(v.fields.stamp_secs, v.fields.stamp_nanos),
                parent_frame_id: v.fields.parent_frame_id,
                child_frame_id: v.fields.child_frame_id,
                transform: s300::Isometry3::from_parts(
                    nalgebra::Translation3::new(
                        v.fields.translation_x,
                        v.fields.translation_y,
                        v.fields.translation_z,
                    ),
                    nalgebra::UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
                        v.fields.rotation_w,
                        v.fields.rotation_i,
                        v.fields.rotation_j,
                        v.fields.rotation_k,
                    )),
                ),
            },
        })
    }
}
