//! Session manager - one game engine and one drop timer per connection
//!
//! Every mutation of a session's engine goes through that session's mutex:
//! inbound commands lock it in [`SessionManager::dispatch`], and the drop
//! timer task locks it on each tick. Sessions never share state, so
//! different sessions proceed concurrently.
//!
//! The drop timer is a spawned task owned by the session. Dropping the
//! handle aborts the task, so replacing or clearing `Session::timer` cancels
//! the previous timer before anything else can run against the engine.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::core::{drop_interval, GameEngine, GameSnapshot};
use crate::protocol::{create_error, parse_action, ProtocolError, ServerEvent};
use crate::types::{GameAction, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Outbound half of a client channel
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Opaque player id, sent to the client as `playerId`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// `player_<unix millis>_<9 lowercase alphanumerics>`
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(9)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        Self(format!("player_{}_{}", millis, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-session game settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub board_width: usize,
    pub board_height: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
        }
    }
}

/// Handle to a running drop timer task; aborts the task when dropped.
#[derive(Debug)]
struct DropTimer {
    handle: JoinHandle<()>,
    period: Duration,
}

impl Drop for DropTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug)]
struct Session {
    id: SessionId,
    engine: GameEngine,
    events: EventSender,
    timer: Option<DropTimer>,
}

type SharedSession = Arc<Mutex<Session>>;

impl Session {
    /// Send an event; a closed channel means the client is already gone.
    fn push(&self, event: ServerEvent) {
        let _ = self.events.send(event);
    }

    fn push_state(&self) {
        self.push(ServerEvent::StateUpdate {
            state: self.engine.snapshot(),
        });
    }

    fn cancel_timer(&mut self) {
        self.timer = None;
    }

    /// Replace any running timer with a new one. The period is fixed now
    /// from the current level and is not re-evaluated on level changes.
    fn arm_timer(&mut self, weak: Weak<Mutex<Session>>) {
        self.cancel_timer();
        let period = drop_interval(self.engine.level());
        let handle = tokio::spawn(run_drop_timer(weak, period));
        self.timer = Some(DropTimer { handle, period });
        debug!("Session {} drop timer armed at {:?}", self.id, period);
    }

    /// One automatic drop. Returns false once the timer should stop.
    fn drop_tick(&mut self) -> bool {
        if self.engine.is_game_over() {
            self.cancel_timer();
            return false;
        }

        self.engine.move_down();
        self.push_state();

        if self.engine.is_game_over() {
            self.cancel_timer();
            info!(
                "Session {} game over: score={} lines={}",
                self.id,
                self.engine.score(),
                self.engine.lines_cleared()
            );
            self.push(ServerEvent::GameOver {
                state: self.engine.snapshot(),
            });
            return false;
        }
        true
    }

    fn apply(&mut self, action: GameAction, weak: Weak<Mutex<Session>>) {
        match action {
            GameAction::Start | GameAction::Resume => {
                self.arm_timer(weak);
                info!("Session {} {}", self.id, action.as_str());
                self.push_state();
            }
            GameAction::MoveLeft => {
                self.engine.move_left();
                self.push_state();
            }
            GameAction::MoveRight => {
                self.engine.move_right();
                self.push_state();
            }
            GameAction::MoveDown => {
                self.engine.move_down();
                self.push_state();
            }
            GameAction::Rotate => {
                self.engine.rotate();
                self.push_state();
            }
            GameAction::HardDrop => {
                self.engine.hard_drop();
                self.push_state();
            }
            GameAction::Pause => {
                self.cancel_timer();
                info!("Session {} paused", self.id);
                self.push(ServerEvent::Paused);
            }
            GameAction::Reset => {
                self.cancel_timer();
                self.engine.reset();
                info!("Session {} reset", self.id);
                self.push_state();
            }
        }
    }
}

async fn run_drop_timer(session: Weak<Mutex<Session>>, period: Duration) {
    // First drop happens one full period after arming.
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let Some(shared) = session.upgrade() else {
            break;
        };
        let mut session = shared.lock().await;
        if !session.drop_tick() {
            break;
        }
    }
}

/// Owns every live session, keyed by player id
#[derive(Debug, Default)]
pub struct SessionManager {
    config: SessionConfig,
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Register a new connection with a fresh game and send it `init`
    pub async fn on_connect(&self, events: EventSender) -> SessionId {
        let engine = GameEngine::new(self.config.board_width, self.config.board_height);
        self.on_connect_with_engine(events, engine).await
    }

    /// Register a new connection playing `engine`
    pub async fn on_connect_with_engine(
        &self,
        events: EventSender,
        engine: GameEngine,
    ) -> SessionId {
        let mut sessions = self.sessions.write().await;
        let mut id = SessionId::generate();
        while sessions.contains_key(&id) {
            id = SessionId::generate();
        }

        let session = Session {
            id: id.clone(),
            engine,
            events,
            timer: None,
        };
        session.push(ServerEvent::Init {
            player_id: id.to_string(),
            state: session.engine.snapshot(),
        });

        sessions.insert(id.clone(), Arc::new(Mutex::new(session)));
        info!("Session {} connected ({} active)", id, sessions.len());
        id
    }

    async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Apply one action. Unknown ids are ignored: the connection is gone.
    pub async fn dispatch(&self, id: &SessionId, action: GameAction) {
        let Some(shared) = self.get(id).await else {
            debug!("Dropping {} for unknown session {}", action.as_str(), id);
            return;
        };
        let weak = Arc::downgrade(&shared);
        let mut session = shared.lock().await;
        session.apply(action, weak);
    }

    /// Parse one raw client message and apply it, reporting rejected
    /// messages to the client as `error` events.
    pub async fn dispatch_line(&self, id: &SessionId, line: impl AsRef<[u8]>) {
        match parse_action(line) {
            Ok(action) => self.dispatch(id, action).await,
            Err(err) => self.reject(id, &err).await,
        }
    }

    /// Report a message the session could not use. The game is untouched.
    pub async fn reject(&self, id: &SessionId, err: &ProtocolError) {
        match err {
            ProtocolError::Malformed(e) => debug!("Session {} sent malformed message: {}", id, e),
            ProtocolError::TooLong(limit) => {
                warn!("Session {} sent a message over {} bytes", id, limit)
            }
            ProtocolError::UnknownAction(name) => {
                warn!("Session {} sent unknown action {:?}", id, name)
            }
        }
        if let Some(shared) = self.get(id).await {
            shared.lock().await.push(create_error(err));
        }
    }

    /// Stop the session's timer and forget it
    pub async fn on_disconnect(&self, id: &SessionId) {
        let removed = self.sessions.write().await.remove(id);
        if let Some(shared) = removed {
            shared.lock().await.cancel_timer();
            info!("Session {} disconnected", id);
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the session currently has an armed drop timer
    pub async fn is_dropping(&self, id: &SessionId) -> bool {
        match self.get(id).await {
            Some(shared) => shared.lock().await.timer.is_some(),
            None => false,
        }
    }

    /// Period of the session's armed drop timer
    pub async fn drop_period(&self, id: &SessionId) -> Option<Duration> {
        let shared = self.get(id).await?;
        let session = shared.lock().await;
        session.timer.as_ref().map(|t| t.period)
    }

    pub async fn snapshot(&self, id: &SessionId) -> Option<GameSnapshot> {
        let shared = self.get(id).await?;
        let snapshot = shared.lock().await.engine.snapshot();
        Some(snapshot)
    }
}
