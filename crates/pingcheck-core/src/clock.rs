use std::fmt::{Display, Formatter};
use std::time::Instant;

/// The resolution of the tick clock.
pub const TICKS_PER_SECOND: u32 = 100;

/// The duration of a single tick in milliseconds.
pub const MILLIS_PER_TICK: u32 = 1000 / TICKS_PER_SECOND;

/// A timestamp measured in ticks since an arbitrary origin.
///
/// Ticks wrap on overflow and so only differences between nearby timestamps
/// are meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd)]
pub struct Tick(pub u32);

impl Tick {
    /// The number of ticks elapsed since `earlier`.
    ///
    /// Wrapping subtraction, so a measurement taken across the wrap point
    /// remains correct.
    #[must_use]
    pub const fn since(self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

/// A clock which reports the current time as a [`Tick`].
#[cfg_attr(test, mockall::automock)]
pub trait TickClock {
    fn now(&self) -> Tick;
}

/// A [`TickClock`] backed by the monotonic system clock.
#[derive(Debug)]
pub struct SystemTickClock {
    origin: Instant,
}

impl Default for SystemTickClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TickClock for SystemTickClock {
    fn now(&self) -> Tick {
        let millis = self.origin.elapsed().as_millis();
        Tick((millis / u128::from(MILLIS_PER_TICK)) as u32)
    }
}

/// A round trip time measured with tick resolution.
///
/// A delta of zero ticks means the reply arrived within the same tick as the
/// request was sent and so the true round trip time is only known to be below
/// one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rtt {
    /// The round trip completed within a single tick.
    SubTick,
    /// The round trip time in milliseconds.
    Millis(u32),
}

impl Rtt {
    /// The delta may be arbitrarily large as the send timestamp is read back
    /// from the reply payload, so the scaling saturates rather than
    /// overflows.
    #[must_use]
    pub const fn from_tick_delta(delta: u32) -> Self {
        if delta == 0 {
            Self::SubTick
        } else {
            Self::Millis(delta.saturating_mul(MILLIS_PER_TICK))
        }
    }
}

impl Display for Rtt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubTick => write!(f, "rtt<{MILLIS_PER_TICK} ms"),
            Self::Millis(millis) => write!(f, "rtt={millis} ms"),
        }
    }
}
