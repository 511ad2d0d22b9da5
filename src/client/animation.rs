//! The clear color animation.
//!
//! Every channel oscillates around a base value with its own frequency, so the
//! color slowly drifts through nearby hues. The color only depends on the frame
//! count, which keeps it reproducible frame for frame.

/// Parameters of the clear color animation.
///
/// A channel is computed as `base + amplitude * sin(frame_count * step * frequency)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    /// The value each channel oscillates around
    pub base: [f32; 3],
    /// How far a channel may move away from its base
    pub amplitude: f32,
    /// Per-channel frequency multipliers
    pub frequencies: [f32; 3],
    /// Animation time advanced per frame
    pub step: f32,
}

impl Default for Animation {
    fn default() -> Self {
        Animation {
            base: [0.45, 0.55, 0.60],
            amplitude: 0.2,
            frequencies: [1.0, 1.3, 1.7],
            step: 0.01,
        }
    }
}

impl Animation {
    /// Computes the color for the given frame.
    pub fn color_at(&self, frame_count: u64) -> AnimatedColor {
        let t = frame_count as f32 * self.step;

        let mut channels = [0.0; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = self.base[i] + self.amplitude * (t * self.frequencies[i]).sin();
        }

        AnimatedColor(channels)
    }

    /// The range a single channel can take, as `(min, max)`.
    pub fn channel_range(&self, channel: usize) -> (f32, f32) {
        (
            self.base[channel] - self.amplitude,
            self.base[channel] + self.amplitude,
        )
    }
}

/// An opaque RGB color produced by the [`Animation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedColor(pub [f32; 3]);

impl AnimatedColor {
    /// Red channel
    pub fn r(&self) -> f32 {
        self.0[0]
    }

    /// Green channel
    pub fn g(&self) -> f32 {
        self.0[1]
    }

    /// Blue channel
    pub fn b(&self) -> f32 {
        self.0[2]
    }
}

impl From<AnimatedColor> for wgpu::Color {
    fn from(color: AnimatedColor) -> Self {
        wgpu::Color {
            r: color.r() as f64,
            g: color.g() as f64,
            b: color.b() as f64,
            a: 1.0,
        }
    }
}
