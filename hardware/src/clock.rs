use corne::clock::{Clock, Instant};
use rp_pico::hal::Timer;

/// The RP2040 64-bit microsecond timer.
pub struct HalClock<'a>(pub &'a Timer);

impl Clock for HalClock<'_> {
    fn now(&self) -> Instant {
        Instant::from_ticks(self.0.get_counter().ticks())
    }
}
