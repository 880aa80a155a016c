use bevy::prelude::*;

use super::ControllerConfig;
use super::ControllerMode;
use super::MouseController;

/// Button that selects teleport zones and drags the view.
pub const SELECT_BUTTON: MouseButton = MouseButton::Left;

/// One frame of a button: the edges seen since last frame plus the current
/// level. A press and release that both land between two frames show up as
/// `pressed` and `released` with `held` false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonFrame {
    pub pressed:  bool,
    pub held:     bool,
    pub released: bool,
}

impl ButtonFrame {
    pub fn from_input(input: &ButtonInput<MouseButton>, button: MouseButton) -> Self {
        Self {
            pressed:  input.just_pressed(button),
            held:     input.pressed(button),
            released: input.just_released(button),
        }
    }
}

/// Tells short clicks apart from drags.
///
/// Fed the primary button once per idle frame. A press starts the hold timer,
/// holding past the threshold turns the press into a drag, and a release that
/// arrives before that reports a short click for that frame only.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct ClickTracker {
    held_seconds: f32,
    clicking:     bool,
    short_click:  bool,
}

impl ClickTracker {
    /// Advances one frame. Returns `true` when this frame completes a short
    /// click.
    pub fn update(&mut self, button: ButtonFrame, delta_secs: f32, threshold: f32) -> bool {
        if button.pressed {
            self.held_seconds = 0.0;
            self.clicking = true;
        }

        if button.held {
            self.held_seconds += delta_secs;
            if self.held_seconds > threshold {
                self.clicking = false;
            }
        }

        self.short_click = self.clicking && button.released;
        if self.short_click {
            self.clicking = false;
        }

        self.short_click
    }

    /// Drops any click in progress without reporting it, so a press that
    /// started during a jump cannot complete once the controller is idle.
    pub const fn suspend(&mut self) {
        self.clicking = false;
        self.short_click = false;
    }

    pub const fn short_clicked(&self) -> bool { self.short_click }
}

pub(super) fn track_clicks(
    mouse: Res<ButtonInput<MouseButton>>,
    config: Res<ControllerConfig>,
    time: Res<Time>,
    mut controllers: Query<(&ControllerMode, &mut ClickTracker), With<MouseController>>,
) {
    let button = ButtonFrame::from_input(&mouse, SELECT_BUTTON);
    for (mode, mut tracker) in &mut controllers {
        if mode.is_idle() {
            tracker.update(button, time.delta_secs(), config.short_click_threshold);
        } else {
            tracker.suspend();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;
    const THRESHOLD: f32 = 0.15;

    const DOWN: ButtonFrame = ButtonFrame {
        pressed:  true,
        held:     true,
        released: false,
    };
    const HOLD: ButtonFrame = ButtonFrame {
        pressed:  false,
        held:     true,
        released: false,
    };
    const UP: ButtonFrame = ButtonFrame {
        pressed:  false,
        held:     false,
        released: true,
    };
    const IDLE: ButtonFrame = ButtonFrame {
        pressed:  false,
        held:     false,
        released: false,
    };

    /// Holds for `frames` frames (the first one being the press), then
    /// releases. Returns whether the release frame reported a short click.
    fn press_for(tracker: &mut ClickTracker, frames: usize) -> bool {
        for frame in 0..frames {
            let button = if frame == 0 { DOWN } else { HOLD };
            assert!(!tracker.update(button, FRAME, THRESHOLD));
        }
        tracker.update(UP, FRAME, THRESHOLD)
    }

    #[test]
    fn quick_press_and_release_is_a_short_click() {
        let mut tracker = ClickTracker::default();
        assert!(press_for(&mut tracker, 3));
        assert!(tracker.short_clicked());
    }

    #[test]
    fn short_click_is_reported_for_one_frame_only() {
        let mut tracker = ClickTracker::default();
        assert!(press_for(&mut tracker, 1));
        assert!(!tracker.update(IDLE, FRAME, THRESHOLD));
        assert!(!tracker.short_clicked());
    }

    #[test]
    fn holding_past_the_threshold_is_never_a_click() {
        let mut tracker = ClickTracker::default();
        // 12 frames at 60 fps is 0.2s
        assert!(!press_for(&mut tracker, 12));
        assert!(tracker.held_seconds > THRESHOLD);
    }

    #[test]
    fn a_new_press_resets_the_hold_timer() {
        let mut tracker = ClickTracker::default();
        assert!(!press_for(&mut tracker, 20));
        assert!(press_for(&mut tracker, 2));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = ClickTracker::default();
        assert!(!tracker.update(UP, FRAME, THRESHOLD));
        assert!(!tracker.update(IDLE, FRAME, THRESHOLD));
    }

    #[test]
    fn press_and_release_between_frames_is_a_short_click() {
        let mut tracker = ClickTracker::default();
        let tap = ButtonFrame {
            pressed:  true,
            held:     false,
            released: true,
        };
        assert!(tracker.update(tap, FRAME, THRESHOLD));
    }

    #[test]
    fn tap_read_from_button_input_is_a_short_click() {
        let mut input = ButtonInput::<MouseButton>::default();
        input.press(SELECT_BUTTON);
        input.release(SELECT_BUTTON);

        let button = ButtonFrame::from_input(&input, SELECT_BUTTON);
        assert!(button.pressed && button.released && !button.held);

        let mut tracker = ClickTracker::default();
        assert!(tracker.update(button, FRAME, THRESHOLD));
    }

    #[test]
    fn suspended_press_does_not_click_on_release() {
        let mut tracker = ClickTracker::default();
        assert!(!tracker.update(DOWN, FRAME, THRESHOLD));
        tracker.suspend();
        assert!(!tracker.update(UP, FRAME, THRESHOLD));
    }

    #[test]
    fn button_held_through_suspend_is_not_a_new_press() {
        let mut tracker = ClickTracker::default();
        tracker.suspend();
        assert!(!tracker.update(HOLD, FRAME, THRESHOLD));
        assert!(!tracker.update(UP, FRAME, THRESHOLD));
    }
}
