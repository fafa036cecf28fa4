use std::fmt::{Display, Formatter};

/// Counters accumulated over a single ping run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// The number of echo requests sent.
    pub sent: u32,
    /// The number of matching echo replies received.
    pub received: u32,
}

impl Stats {
    /// The number of requests for which no reply was seen.
    ///
    /// Clamped to zero when more replies than requests were counted, which
    /// can happen when a peer sends duplicate replies.
    #[must_use]
    pub const fn lost(&self) -> u32 {
        self.sent.saturating_sub(self.received)
    }

    /// The loss as a percentage of requests sent.
    #[must_use]
    pub fn loss_percent(&self) -> f64 {
        if self.sent == 0 {
            0.0
        } else {
            f64::from(self.lost()) / f64::from(self.sent) * 100.0
        }
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} packets transmitted, {} received, {}({:.0}%) lost",
            self.sent,
            self.received,
            self.lost(),
            self.loss_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(4, 4 => (0, 0.0); "no loss")]
    #[test_case(4, 3 => (1, 25.0); "partial loss")]
    #[test_case(4, 0 => (4, 100.0); "total loss")]
    #[test_case(0, 0 => (0, 0.0); "nothing sent")]
    #[test_case(1, 2 => (0, 0.0); "duplicate replies clamp to zero")]
    fn test_loss(sent: u32, received: u32) -> (u32, f64) {
        let stats = Stats { sent, received };
        (stats.lost(), stats.loss_percent())
    }

    #[test]
    fn test_display() {
        let stats = Stats {
            sent: 4,
            received: 3,
        };
        assert_eq!("4 packets transmitted, 3 received, 1(25%) lost", stats.to_string());
    }
}
