/// Microsecond ticks, the native unit of the RP2040 timer.
pub type Instant = fugit::TimerInstantU64<1_000_000>;
pub type Duration = fugit::MicrosDurationU64;

pub trait Clock {
    fn now(&self) -> Instant;
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
