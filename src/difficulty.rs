use std::time::Duration;

/// Named difficulty tiers; coarser tick interval = slower snake.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn tick_interval(self) -> Duration {
        let ms = match self {
            Difficulty::Easy => 150,
            Difficulty::Medium => 100,
            Difficulty::Hard => 70,
            Difficulty::Expert => 40,
        };
        Duration::from_millis(ms)
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered_fastest_last() {
        let intervals: Vec<Duration> = Difficulty::ALL.iter().map(|d| d.tick_interval()).collect();
        for pair in intervals.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }
}
