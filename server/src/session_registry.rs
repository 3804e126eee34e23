use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use common::games::grid::{GridMove, Position};
use common::games::{Game, GameKind, GameMove, InvalidMoveReason};
use common::id_generator::generate_session_id;
use common::{MatchSnapshot, PlayerStats, SessionId, Username, log, log_debug, log_error, log_warn};

use crate::errors::MatchError;
use crate::match_session::MatchSession;
use crate::matchmaking_queue::MatchmakingQueue;
use crate::user_directory::UserDirectory;

pub type SharedSession = Arc<Mutex<MatchSession>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRequestOutcome {
    Queued,
    Paired(MatchSnapshot),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateQuery {
    InProgress(MatchSnapshot),
    /// Final board, shown until both players have seen it.
    Concluded(MatchSnapshot),
    /// Both players saw the result; stats are recorded and the match is gone.
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RegistryStats {
    pub waiting: usize,
    pub live_sessions: usize,
    pub registered: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub evicted_waiting: Vec<Username>,
    pub finalized: Vec<SessionId>,
    pub discarded: Vec<SessionId>,
}

#[derive(Debug, Default)]
struct MatchIndex {
    queue: MatchmakingQueue,
    sessions: HashMap<SessionId, SharedSession>,
    player_sessions: HashMap<Username, SessionId>,
}

impl MatchIndex {
    fn remove_session(&mut self, session: &MatchSession) {
        self.sessions.remove(session.id());
        for player in session.players() {
            if self.player_sessions.get(player) == Some(session.id()) {
                self.player_sessions.remove(player);
            }
        }
    }
}

/// Owns the waiting queue and every live match.
///
/// Lock order: a session lock may be held while taking the index lock, and
/// the index lock may be held while taking the directory lock. The index
/// lock is never held while waiting for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    users: UserDirectory,
    index: Arc<Mutex<MatchIndex>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub async fn register(&self, username: &Username) -> Result<(), MatchError> {
        self.users.register(username).await
    }

    /// Forgets a player who is not in a match. A stale queue entry is left
    /// behind and evicted lazily by matchmaking or the idle sweep.
    pub async fn unregister(&self, username: &Username) -> Result<(), MatchError> {
        let index = self.index.lock().await;
        if index.player_sessions.contains_key(username) {
            return Err(MatchError::AlreadyInSession);
        }
        self.users.unregister(username).await
    }

    pub async fn list_users(&self) -> BTreeMap<Username, PlayerStats> {
        self.users.list().await
    }

    pub async fn request_match(&self, username: &Username) -> Result<MatchRequestOutcome, MatchError> {
        let mut index = self.index.lock().await;

        if !self.users.exists(username).await {
            return Err(MatchError::Unregistered);
        }

        while let Some(front) = index.queue.front().cloned() {
            if self.users.exists(&front).await {
                break;
            }
            index.queue.pop();
            log_warn!("Evicted unregistered player {} from the queue", front);
        }

        if index.player_sessions.contains_key(username) {
            return Err(MatchError::AlreadyInSession);
        }

        if index.queue.contains(username) {
            return Err(MatchError::AlreadyQueued);
        }

        let Some(other) = index.queue.pop() else {
            index.queue.push(username.clone());
            log!("Player {} is waiting for an opponent", username);
            return Ok(MatchRequestOutcome::Queued);
        };

        if !self.users.exists(&other).await {
            log_warn!("Opponent {} vanished before pairing, {} keeps waiting", other, username);
            index.queue.push(username.clone());
            return Ok(MatchRequestOutcome::Queued);
        }

        let session_id = generate_session_id(|id| index.sessions.contains_key(id));
        let players = [other, username.clone()];
        let kind = GameKind::select_for(&players);
        let session = MatchSession::new(session_id.clone(), players.clone(), kind);
        let snapshot = session.snapshot();

        index.sessions.insert(session_id.clone(), Arc::new(Mutex::new(session)));
        for player in &players {
            index.player_sessions.insert(player.clone(), session_id.clone());
        }

        log!("Match {} created: {} vs {} ({:?})", session_id, players[0], players[1], kind);
        Ok(MatchRequestOutcome::Paired(snapshot))
    }

    async fn session_of(&self, username: &Username) -> Option<SharedSession> {
        let index = self.index.lock().await;
        let session_id = index.player_sessions.get(username)?;
        index.sessions.get(session_id).cloned()
    }

    /// Places a mark for `username`. Coordinates off the grid never reach
    /// the game.
    pub async fn submit_move(&self, username: &Username, row: usize, col: usize) -> Result<MatchSnapshot, MatchError> {
        let position = Position::try_new(row, col)
            .ok_or(MatchError::InvalidMove(InvalidMoveReason::OutOfRange))?;
        let mv = GameMove::Grid(GridMove::new(username.clone(), position));

        let shared = self.session_of(username).await.ok_or(MatchError::NoActiveSession)?;
        let mut session = shared.lock().await;
        if session.is_closed() {
            return Err(MatchError::NoActiveSession);
        }

        if let Err(err) = session.apply_move(&mv) {
            log_debug!("Rejected move by {} in {}: {}", username, session.id(), err);
            return Err(err);
        }
        log_debug!("{} played ({}, {}) in {}", username, row, col, session.id());

        if session.is_terminal() {
            match session.game().winner() {
                Some(winner) => log!("Match {} won by {}", session.id(), winner),
                None => log!("Match {} ended in a draw", session.id()),
            }
        }

        Ok(session.snapshot())
    }

    pub async fn query_state(&self, username: &Username) -> Result<StateQuery, MatchError> {
        let shared = self.session_of(username).await.ok_or(MatchError::NoActiveSession)?;
        let mut session = shared.lock().await;
        if session.is_closed() {
            return Err(MatchError::NoActiveSession);
        }
        session.touch();

        if !session.is_terminal() {
            return Ok(StateQuery::InProgress(session.snapshot()));
        }

        session.acknowledge_end(username)?;
        if !session.both_acknowledged() {
            return Ok(StateQuery::Concluded(session.snapshot()));
        }

        self.finalize(&mut session).await;
        Ok(StateQuery::Cleared)
    }

    /// Records stats and retires a terminal match. Caller holds the session lock.
    async fn finalize(&self, session: &mut MatchSession) {
        session.close();
        self.index.lock().await.remove_session(session);

        for (name, won) in session.results() {
            if let Err(err) = self.users.record_result(&name, won).await {
                log_error!("Failed to record result of {} for {}: {}", session.id(), name, err);
            }
        }

        log!("Match {} finalized", session.id());
    }

    /// Closes matches idle for `session_timeout` and drops players who waited
    /// longer than `queue_timeout`. Finished matches keep their stats; unfinished
    /// ones are discarded.
    pub async fn sweep_idle(&self, session_timeout: Duration, queue_timeout: Duration) -> SweepReport {
        let mut report = SweepReport::default();

        let sessions: Vec<SharedSession> = {
            let mut index = self.index.lock().await;
            report.evicted_waiting = index.queue.evict_idle(queue_timeout);
            index.sessions.values().cloned().collect()
        };

        for shared in sessions {
            let mut session = shared.lock().await;
            if session.is_closed() || !session.is_idle(session_timeout) {
                continue;
            }

            if session.is_terminal() {
                self.finalize(&mut session).await;
                report.finalized.push(session.id().clone());
            } else {
                session.close();
                self.index.lock().await.remove_session(&session);
                log!("Discarded abandoned match {}", session.id());
                report.discarded.push(session.id().clone());
            }
        }

        for username in &report.evicted_waiting {
            log!("Evicted idle player {} from the queue", username);
        }

        report
    }

    pub async fn stats(&self) -> RegistryStats {
        let (waiting, live_sessions) = {
            let index = self.index.lock().await;
            (index.queue.len(), index.sessions.len())
        };
        RegistryStats {
            waiting,
            live_sessions,
            registered: self.users.len().await,
        }
    }

    pub async fn waiting_players(&self) -> Vec<Username> {
        self.index.lock().await.queue.usernames()
    }
}
