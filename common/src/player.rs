use serde::{Deserialize, Serialize};

/// Lifetime record of a registered player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_won: u32,
    pub games_played: u32,
}

impl PlayerStats {
    pub fn record(&mut self, won: bool) {
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_win_and_loss() {
        let mut stats = PlayerStats::default();
        stats.record(true);
        stats.record(false);
        assert_eq!(stats, PlayerStats { games_won: 1, games_played: 2 });
    }
}
