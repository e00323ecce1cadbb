use egui::Vec2;

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = 1.0 - t.clamp(0.0, 1.0);
    1.0 - t * t * t
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationPoll {
    /// Eased progress in `[0, 1)`. Reaching 1 reports [`AnimationPoll::Completed`] instead.
    Running { progress: f32 },
    Completed,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Completed,
    Stopped,
}

/// Snap back of a dragged item whose drag was cancelled. Driven by the frame clock: the owner
/// polls it every frame with the current time (seconds, as in `egui::InputState::time`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnAnimation {
    started_at: f64,
    duration: f32,
    status: Status,
}

impl ReturnAnimation {
    pub fn start(now: f64, duration: f32) -> Self {
        Self {
            started_at: now,
            duration,
            status: Status::Running,
        }
    }

    /// Linear progress in `[0, 1]`, ignoring the stopped state.
    fn linear_progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (((now - self.started_at) / self.duration as f64) as f32).clamp(0.0, 1.0)
    }

    /// Advances the animation to `now`. Reports [`AnimationPoll::Completed`] once the eased
    /// progress reaches 1, which can be a little before the duration has elapsed, and keeps
    /// reporting it afterwards.
    pub fn poll(&mut self, now: f64) -> AnimationPoll {
        match self.status {
            Status::Stopped => AnimationPoll::Stopped,
            Status::Completed => AnimationPoll::Completed,
            Status::Running => {
                let progress = ease_out_cubic(self.linear_progress(now));
                if progress >= 1.0 {
                    self.status = Status::Completed;
                    AnimationPoll::Completed
                } else {
                    AnimationPoll::Running { progress }
                }
            }
        }
    }

    /// Eased progress at `now` without advancing the status.
    pub fn progress(&self, now: f64) -> f32 {
        match self.status {
            Status::Running => ease_out_cubic(self.linear_progress(now)),
            Status::Completed | Status::Stopped => 1.0,
        }
    }

    /// Offset of the returning item at `now`. Decays from `release_offset` to zero.
    pub fn offset(&self, release_offset: Vec2, now: f64) -> Vec2 {
        release_offset * (1.0 - self.progress(now))
    }

    /// Stops the animation. Calling this more than once has no further effect.
    pub fn stop(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Stopped;
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }
}
