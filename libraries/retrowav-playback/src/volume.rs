//! Volume control with logarithmic scaling
//!
//! The session keeps volume as a 0-100% level plus a mute flag. Engines that
//! take a linear gain (the `<audio>` element's `volume`) map the level through
//! [`perceptual_gain`], which spans -60 dB to 0 dB.

/// Bottom of the gain curve in dB (1% sits just above it, 0% is silence)
const FLOOR_DB: f32 = -60.0;

/// Volume controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` to 100
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level, clamped to 0-100
    ///
    /// Returns the stored level.
    pub fn set_level(&mut self, level: i32) -> u8 {
        self.level = clamp_percent(level);
        self.level
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level the engine should actually play at (0 while muted)
    pub fn effective_level(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80)
    }
}

/// Clamp any integer into a 0-100 percentage
pub fn clamp_percent(level: i32) -> u8 {
    level.clamp(0, 100) as u8
}

/// Convert a volume percentage to linear gain
///
/// Formula: gain = 10^((level% - 100) * 0.6 / 20)
/// - 0%   → 0.0 (silence)
/// - 50%  → -30 dB → 0.0316
/// - 80%  → -12 dB → 0.251 (default)
/// - 100% →   0 dB → 1.0 (unity)
pub fn perceptual_gain(percent: u8) -> f32 {
    if percent == 0 {
        return 0.0;
    }

    let percent = percent.min(100);
    let db = FLOOR_DB * (1.0 - f32::from(percent) / 100.0);
    10.0_f32.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_level() {
        assert_eq!(Volume::new(80).level(), 80);
        assert_eq!(Volume::new(200).level(), 100);
    }

    #[test]
    fn set_level_clamps_both_ends() {
        let mut vol = Volume::new(50);
        assert_eq!(vol.set_level(150), 100);
        assert_eq!(vol.set_level(-10), 0);
        assert_eq!(vol.set_level(42), 42);
    }

    #[test]
    fn mute_preserves_level() {
        let mut vol = Volume::new(80);
        vol.mute();
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 80);
        assert_eq!(vol.effective_level(), 0);

        vol.toggle_mute();
        assert!(!vol.is_muted());
        assert_eq!(vol.effective_level(), 80);
    }

    #[test]
    fn gain_calculation() {
        assert_eq!(perceptual_gain(0), 0.0);
        assert!((perceptual_gain(100) - 1.0).abs() < 0.001);
        assert!((perceptual_gain(50) - 0.0316).abs() < 0.001);
        assert!((perceptual_gain(80) - 0.251).abs() < 0.01);
    }

    #[test]
    fn muted_level_is_silent() {
        let mut vol = Volume::new(80);
        assert!(perceptual_gain(vol.effective_level()) > 0.0);
        vol.mute();
        assert_eq!(perceptual_gain(vol.effective_level()), 0.0);
    }

    #[test]
    fn one_percent_sits_near_the_floor() {
        let db = 20.0 * perceptual_gain(1).log10();
        assert!((db - FLOOR_DB * 0.99).abs() < 0.1);
    }
}
