use std::time::SystemTime;

use crate::{error::Error, frame::ScanFrame, window::WindowConfig};

/// Copies the windowed part of a raw sweep into a reusable [`ScanFrame`].
///
/// The frame buffers are sized once from the window and never resized.
#[derive(Debug, Clone)]
pub struct ScanAssembler {
    window: WindowConfig,
    frame: ScanFrame,
}

impl ScanAssembler {
    pub fn new(window: WindowConfig, frame_id: impl Into<String>) -> Self {
        let frame = ScanFrame::new(frame_id, &window);
        Self { window, frame }
    }

    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    pub fn frame(&self) -> &ScanFrame {
        &self.frame
    }

    /// Copies `ranges[start..end]` (and the matching intensities, or zeros
    /// when there are none) into the frame, in increasing angle order.
    ///
    /// On error the frame is left unchanged.
    pub fn copy_window(
        &mut self,
        ranges: &[f32],
        intensities: Option<&[f32]>,
    ) -> Result<(), Error> {
        let window = self.window.range();
        check_len(window.end, ranges.len())?;
        if let Some(intensities) = intensities {
            check_len(window.end, intensities.len())?;
            self.frame.intensities.copy_from_slice(&intensities[window.clone()]);
        } else {
            self.frame.intensities.fill(0.0);
        }
        self.frame.ranges.copy_from_slice(&ranges[window]);
        Ok(())
    }

    pub fn set_stamp(&mut self, stamp: SystemTime) {
        self.frame.stamp = stamp;
    }
}

fn check_len(required: usize, actual: usize) -> Result<(), Error> {
    if actual < required {
        Err(Error::RangeCountMismatch { required, actual })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn sweep() -> Vec<f32> {
        (0..540).map(|i| i as f32).collect()
    }

    #[test]
    fn test_copy_window() {
        let mut assembler = ScanAssembler::new(WindowConfig::from_field_of_view(180.0), "laser");
        assembler.copy_window(&sweep(), None).unwrap();
        let frame = assembler.frame();
        assert_eq!(frame.len(), 360);
        assert_eq!(frame.ranges[0], 90.0);
        assert_eq!(frame.ranges[359], 449.0);
        assert!(frame.intensities.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_copy_intensities() {
        let mut assembler = ScanAssembler::new(WindowConfig::from_field_of_view(1.0), "laser");
        let intensities: Vec<f32> = sweep().iter().map(|v| v * 2.0).collect();
        assembler.copy_window(&sweep(), Some(&intensities)).unwrap();
        assert_eq!(assembler.frame().ranges, vec![269.0, 270.0]);
        assert_eq!(assembler.frame().intensities, vec![538.0, 540.0]);
    }

    #[test]
    fn test_short_sweep_is_rejected() {
        let mut assembler = ScanAssembler::new(WindowConfig::default(), "laser");
        let err = assembler.copy_window(&sweep()[..539], None).unwrap_err();
        assert!(matches!(
            err,
            Error::RangeCountMismatch {
                required: 540,
                actual: 539
            }
        ));
        assert!(assembler.frame().ranges.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_buffer_is_reused() {
        let mut assembler = ScanAssembler::new(WindowConfig::from_field_of_view(10.0), "laser");
        let capacity = assembler.frame().ranges.capacity();
        for offset in 0..3 {
            let ranges: Vec<f32> = sweep().iter().map(|v| v + offset as f32).collect();
            assembler.copy_window(&ranges, None).unwrap();
            assembler.set_stamp(SystemTime::UNIX_EPOCH + Duration::from_secs(offset));
        }
        assert_eq!(assembler.frame().ranges.capacity(), capacity);
        assert_eq!(assembler.frame().ranges[0], 262.0);
        assert_eq!(
            assembler.frame().stamp,
            SystemTime::UNIX_EPOCH + Duration::from_secs(2)
        );
    }
}
