// player.rs - Periodic driver for the Game of Life engine

use crate::life::GameOfLife;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(250);

enum Lifecycle {
    Stopped,
    Running(JoinHandle<()>),
}

/// Arms and disarms the tick timer for a shared engine.
pub struct Player {
    engine: Arc<Mutex<GameOfLife>>,
    period: Duration,
    runtime: Handle,
    state: Lifecycle,
}

impl Player {
    pub fn new(engine: Arc<Mutex<GameOfLife>>, period: Duration, runtime: Handle) -> Self {
        Self {
            engine,
            period,
            runtime,
            state: Lifecycle::Stopped,
        }
    }

    pub fn engine(&self) -> &Arc<Mutex<GameOfLife>> {
        &self.engine
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, Lifecycle::Running(_))
    }

    /// Start ticking if stopped, then reseed the board either way.
    pub fn play(&mut self) {
        if let Lifecycle::Stopped = self.state {
            let engine = Arc::clone(&self.engine);
            let period = self.period;
            let handle = self.runtime.spawn(async move {
                let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    engine.lock().update();
                }
            });
            self.state = Lifecycle::Running(handle);
            info!(period_ms = period.as_millis() as u64, "game of life started");
        }
        self.engine.lock().reset();
    }

    pub fn stop(&mut self) {
        if let Lifecycle::Running(handle) = std::mem::replace(&mut self.state, Lifecycle::Stopped) {
            handle.abort();
            info!("game of life stopped");
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}
