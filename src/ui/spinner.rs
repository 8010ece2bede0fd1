const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Ticks per spinner frame
const SPINNER_SPEED_DIVISOR: usize = 2;

/// Busy indicator shown while a lap is running
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    ticks: usize,
}

impl Spinner {
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    pub fn frame_index(&self) -> usize {
        (self.ticks / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()
    }

    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_cycle() {
        let mut spinner = Spinner::default();
        assert_eq!(spinner.frame(), "⠋");
        for _ in 0..SPINNER_FRAMES.len() * SPINNER_SPEED_DIVISOR {
            spinner.tick();
        }
        assert_eq!(spinner.frame_index(), 0);
        for _ in 0..SPINNER_SPEED_DIVISOR {
            spinner.tick();
        }
        assert_eq!(spinner.frame(), "⠙");
    }

    #[test]
    fn frame_holds_for_several_ticks() {
        let mut spinner = Spinner::default();
        for _ in 1..SPINNER_SPEED_DIVISOR {
            spinner.tick();
            assert_eq!(spinner.frame_index(), 0);
        }
        spinner.tick();
        assert_eq!(spinner.frame_index(), 1);
    }

    #[test]
    fn reset_returns_to_first_frame() {
        let mut spinner = Spinner::default();
        spinner.tick();
        spinner.tick();
        spinner.reset();
        assert_eq!(spinner.frame_index(), 0);
    }
}
