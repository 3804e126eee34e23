use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use common::{PlayerStats, Username, log};

use crate::errors::MatchError;

/// Registry of known players. Every mutation happens under one lock, so
/// stat increments for a username can never be lost.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    players: Arc<Mutex<HashMap<Username, PlayerStats>>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, username: &Username) -> Result<(), MatchError> {
        let mut players = self.players.lock().await;
        if players.contains_key(username) {
            return Err(MatchError::AlreadyExists);
        }
        players.insert(username.clone(), PlayerStats::default());
        log!("Player registered: {}", username);
        Ok(())
    }

    pub async fn unregister(&self, username: &Username) -> Result<(), MatchError> {
        let mut players = self.players.lock().await;
        players.remove(username).ok_or(MatchError::Unregistered)?;
        log!("Player unregistered: {}", username);
        Ok(())
    }

    pub async fn exists(&self, username: &Username) -> bool {
        self.players.lock().await.contains_key(username)
    }

    pub async fn get(&self, username: &Username) -> Option<PlayerStats> {
        self.players.lock().await.get(username).copied()
    }

    /// Bumps `games_played`, and `games_won` when `won`. Unknown names are
    /// reported back to the caller.
    pub async fn record_result(&self, username: &Username, won: bool) -> Result<(), MatchError> {
        let mut players = self.players.lock().await;
        let stats = players.get_mut(username).ok_or(MatchError::Unregistered)?;
        stats.record(won);
        Ok(())
    }

    pub async fn list(&self) -> BTreeMap<Username, PlayerStats> {
        let players = self.players.lock().await;
        players.iter().map(|(name, stats)| (name.clone(), *stats)).collect()
    }

    pub async fn len(&self) -> usize {
        self.players.lock().await.len()
    }
}
