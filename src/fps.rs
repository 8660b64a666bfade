use std::time::Duration;

use lib_math::Color;

const WINDOW: Duration = Duration::from_millis(500);

/// Frames per second averaged over half-second windows.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: Duration,
    fps: u32,
}

impl FpsCounter {
    pub fn tick(&mut self, delta_time: Duration) {
        self.frames += 1;
        self.elapsed += delta_time;

        if self.elapsed >= WINDOW {
            self.fps = (self.frames as f64 / self.elapsed.as_secs_f64()).round() as u32;
            self.frames = 0;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Zero until the first window completes.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn text(&self) -> String {
        format!("{} FPS", self.fps())
    }

    pub fn color(&self) -> Color {
        fps_color(self.fps())
    }
}

pub fn fps_color(fps: u32) -> Color {
    match fps {
        0..15 => Color::RED,
        15..30 => Color::ORANGE,
        _ => Color::LIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_after_half_a_second() {
        let mut counter = FpsCounter::default();
        let frame = Duration::from_micros(16_667);

        for _ in 0..29 {
            counter.tick(frame);
        }
        assert_eq!(counter.fps(), 0);

        counter.tick(frame);
        assert_eq!(counter.fps(), 60);
        assert_eq!(counter.text(), "60 FPS");
    }

    #[test]
    fn slow_frames_report_low_rates() {
        let mut counter = FpsCounter::default();

        counter.tick(Duration::from_millis(400));
        counter.tick(Duration::from_millis(400));

        // 2 frames over 0.8 s
        assert_eq!(counter.fps(), 3);
        assert_eq!(counter.color(), Color::RED);
    }

    #[test]
    fn color_thresholds() {
        assert_eq!(fps_color(0), Color::RED);
        assert_eq!(fps_color(14), Color::RED);
        assert_eq!(fps_color(15), Color::ORANGE);
        assert_eq!(fps_color(29), Color::ORANGE);
        assert_eq!(fps_color(30), Color::LIME);
        assert_eq!(fps_color(144), Color::LIME);
    }
}
