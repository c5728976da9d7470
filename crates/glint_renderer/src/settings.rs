//! Render settings, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// User-facing render configuration.
///
/// Every field has a default, so a settings file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub image_width: u32,
    /// Width over height; the height is derived from it
    pub aspect_ratio: f64,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Distance from the camera to the viewport plane
    pub focal_length: f64,
    /// Jittered samples per pixel when antialiasing is enabled
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per path
    pub max_depth: u32,
    pub antialiasing: bool,
    /// Look speed in radians per unit of look delta per second
    pub sensitivity: f64,
    /// Movement speed in world units per second
    pub move_speed: f64,
    /// Whether look input rotates the camera from the first frame
    pub look_enabled: bool,
    pub camera_position: [f64; 3],
    /// Horizontal and vertical rotation in radians
    pub camera_rotation: [f64; 2],
    /// Worker count; `None` uses the available hardware parallelism
    pub threads: Option<usize>,
    /// Base seed for reproducible renders; `None` draws one from entropy
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            vfov: 45.0,
            focal_length: 1.0,
            samples_per_pixel: 100,
            max_depth: 50,
            antialiasing: true,
            sensitivity: 1.0,
            move_speed: 3.0,
            look_enabled: false,
            camera_position: [0.0, 0.0, 0.0],
            camera_rotation: [0.0, 0.0],
            threads: None,
            seed: None,
        }
    }
}

impl RenderSettings {
    /// Image height derived from width and aspect ratio, at least 1.
    pub fn image_height(&self) -> u32 {
        ((f64::from(self.image_width) / self.aspect_ratio) as u32).max(1)
    }

    /// Worker count to use for this session.
    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Reject settings that would produce a degenerate camera or frame.
    pub fn validate(&self) -> RenderResult<()> {
        if self.image_width == 0 {
            return Err(RenderError::InvalidSettings(
                "image_width must be at least 1".into(),
            ));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::InvalidSettings(format!(
                "aspect_ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::InvalidSettings(format!(
                "vfov must be between 0 and 180 degrees, got {}",
                self.vfov
            )));
        }
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(RenderError::InvalidSettings(format!(
                "focal_length must be positive, got {}",
                self.focal_length
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSettings(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if self.threads == Some(0) {
            return Err(RenderError::InvalidSettings(
                "threads must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_height() {
        let settings = RenderSettings::default();
        assert_eq!(settings.image_width, 400);
        assert_eq!(settings.image_height(), 225);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_height_never_zero() {
        let settings = RenderSettings {
            image_width: 1,
            aspect_ratio: 10.0,
            ..Default::default()
        };
        assert_eq!(settings.image_height(), 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{ "image_width": 64, "seed": 7, "antialiasing": false }"#)
                .unwrap();

        assert_eq!(settings.image_width, 64);
        assert_eq!(settings.seed, Some(7));
        assert!(!settings.antialiasing);
        assert_eq!(settings.max_depth, 50);
        assert_eq!(settings.vfov, 45.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            RenderSettings {
                image_width: 0,
                ..Default::default()
            },
            RenderSettings {
                vfov: 180.0,
                ..Default::default()
            },
            RenderSettings {
                samples_per_pixel: 0,
                ..Default::default()
            },
            RenderSettings {
                aspect_ratio: -1.0,
                ..Default::default()
            },
            RenderSettings {
                threads: Some(0),
                ..Default::default()
            },
        ];
        for settings in bad {
            assert!(matches!(
                settings.validate(),
                Err(RenderError::InvalidSettings(_))
            ));
        }
    }

    #[test]
    fn test_explicit_worker_count() {
        let settings = RenderSettings {
            threads: Some(3),
            ..Default::default()
        };
        assert_eq!(settings.worker_count(), 3);
        assert!(RenderSettings::default().worker_count() >= 1);
    }
}
