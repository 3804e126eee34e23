use std::collections::HashSet;
use std::time::{Duration, Instant};
use common::games::{Game, GameInstance, GameKind, GameMove};
use common::{MatchSnapshot, SessionId, Username};

use crate::errors::MatchError;

/// Two players bound to one game, plus the end-of-match handshake.
#[derive(Debug)]
pub struct MatchSession {
    id: SessionId,
    players: [Username; 2],
    game: GameInstance,
    acknowledged_by: HashSet<Username>,
    last_activity: Instant,
    closed: bool,
}

impl MatchSession {
    /// `players[0]` is the one who waited longer and moves first.
    pub fn new(id: SessionId, players: [Username; 2], kind: GameKind) -> Self {
        let game = kind.create(players.clone());
        Self {
            id,
            players,
            game,
            acknowledged_by: HashSet::new(),
            last_activity: Instant::now(),
            closed: false,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn players(&self) -> &[Username; 2] {
        &self.players
    }

    pub fn is_participant(&self, username: &Username) -> bool {
        self.players.contains(username)
    }

    pub fn game(&self) -> &GameInstance {
        &self.game
    }

    pub fn is_terminal(&self) -> bool {
        self.game.is_terminal()
    }

    pub fn apply_move(&mut self, mv: &GameMove) -> Result<(), MatchError> {
        if !self.is_participant(mv.username()) {
            return Err(MatchError::NotAParticipant);
        }
        self.game.apply_move(mv)?;
        self.touch();
        Ok(())
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            session_id: self.id.clone(),
            players: self.players.clone(),
            game: self.game.snapshot(),
        }
    }

    /// Records that `username` has seen the final board. Repeats are no-ops.
    pub fn acknowledge_end(&mut self, username: &Username) -> Result<(), MatchError> {
        if !self.is_participant(username) {
            return Err(MatchError::NotAParticipant);
        }
        self.acknowledged_by.insert(username.clone());
        Ok(())
    }

    pub fn both_acknowledged(&self) -> bool {
        self.players.iter().all(|p| self.acknowledged_by.contains(p))
    }

    /// Per-player outcome for stat bookkeeping: `(name, won)`.
    pub fn results(&self) -> [(Username, bool); 2] {
        let winner = self.game.winner();
        self.players
            .clone()
            .map(|name| {
                let won = winner == Some(&name);
                (name, won)
            })
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn is_idle(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() >= timeout
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::grid::{GridMove, Position};

    fn session() -> MatchSession {
        MatchSession::new(
            SessionId::new("ABC123"),
            [Username::new("alice"), Username::new("bob")],
            GameKind::Grid,
        )
    }

    fn grid_move(name: &str, row: usize, col: usize) -> GameMove {
        GameMove::Grid(GridMove::new(Username::new(name), Position::try_new(row, col).unwrap()))
    }

    fn finish_with_alice_winning(session: &mut MatchSession) {
        for (name, row, col) in [("alice", 0, 0), ("bob", 1, 1), ("alice", 0, 1), ("bob", 1, 0), ("alice", 0, 2)] {
            session.apply_move(&grid_move(name, row, col)).unwrap();
        }
    }

    #[test]
    fn test_acknowledge_requires_participant() {
        let mut session = session();
        assert_eq!(
            session.acknowledge_end(&Username::new("carol")),
            Err(MatchError::NotAParticipant)
        );
    }

    #[test]
    fn test_acknowledge_is_idempotent() {
        let mut session = session();
        let alice = Username::new("alice");
        session.acknowledge_end(&alice).unwrap();
        session.acknowledge_end(&alice).unwrap();
        assert!(!session.both_acknowledged());
        session.acknowledge_end(&Username::new("bob")).unwrap();
        assert!(session.both_acknowledged());
    }

    #[test]
    fn test_stranger_move_is_rejected() {
        let mut session = session();
        assert_eq!(
            session.apply_move(&grid_move("carol", 0, 0)),
            Err(MatchError::NotAParticipant)
        );
    }

    #[test]
    fn test_results_after_win() {
        let mut session = session();
        finish_with_alice_winning(&mut session);
        assert!(session.is_terminal());
        let results = session.results();
        assert_eq!(results[0], (Username::new("alice"), true));
        assert_eq!(results[1], (Username::new("bob"), false));
    }

    #[test]
    fn test_results_in_progress_have_no_winner() {
        let session = session();
        assert!(session.results().iter().all(|(_, won)| !won));
    }

    #[test]
    fn test_idle_detection() {
        let session = session();
        assert!(session.is_idle(Duration::ZERO));
        assert!(!session.is_idle(Duration::from_secs(3600)));
    }
}
