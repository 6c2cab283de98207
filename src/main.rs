// main.rs - Launchpad Mini controller with a Game of Life on the pads
// The window mirrors the board and hosts the controls and the log panel (ui.rs)

use clap::Parser;
use eframe::egui;
use launchpad_life::host::{EchoController, LogPanel};
use launchpad_life::life::{self, GameOfLife};
use launchpad_life::midi::MidirTransport;
use launchpad_life::{AppConfig, Discovery, Launchpad, Player};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

mod ui;

#[derive(Parser, Debug)]
#[command(name = "launchpad-life", version, about = "Game of Life on a Launchpad Mini")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device name prefix to look for
    #[arg(long)]
    device: Option<String>,

    /// Tick period in milliseconds
    #[arg(long)]
    period_ms: Option<u64>,

    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(args: &Args) -> Result<AppConfig, launchpad_life::ConfigError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(device) = &args.device {
        config.device.name = device.clone();
    }
    if let Some(period_ms) = args.period_ms {
        config.life.period_ms = period_ms;
    }
    if args.seed.is_some() {
        config.life.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(device = %config.device.name, rules = ?config.life.rules(), "starting");

    let app = LaunchpadApp::new(&config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launchpad Mini",
        options,
        Box::new(|_cc| Box::new(app)),
    )?;
    Ok(())
}

/// Host state: the link, the engine and its player, and the log panel.
pub struct LaunchpadApp {
    pub link: Arc<Launchpad>,
    pub log: Arc<LogPanel>,
    pub player: Player,
    transport: Arc<MidirTransport>,
    discovery: Option<JoinHandle<Discovery>>,
    runtime: tokio::runtime::Runtime,
}

impl LaunchpadApp {
    fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let runtime = tokio::runtime::Runtime::new()?;

        let log = LogPanel::new();
        let link = Launchpad::new(config.device.name.clone(), EchoController::new(Arc::clone(&log)));
        let engine = GameOfLife::new(
            config.life.rules(),
            link.clone(),
            life::random_source(config.life.seed),
        )?;
        let player = Player::new(
            Arc::new(Mutex::new(engine)),
            config.life.period(),
            runtime.handle().clone(),
        );

        Ok(Self {
            link,
            log,
            player,
            transport: Arc::new(MidirTransport::new(config.device.client_name.clone())),
            discovery: None,
            runtime,
        })
    }

    /// Look for the device, unless a lookup is still running.
    pub fn on_start(&mut self) {
        if self.discovery.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }
        let link = Arc::clone(&self.link);
        let transport = Arc::clone(&self.transport);
        self.discovery = Some(self.runtime.spawn(async move {
            link.discover(transport.as_ref()).await
        }));
    }

    pub fn is_discovering(&self) -> bool {
        self.discovery.as_ref().is_some_and(|task| !task.is_finished())
    }
}
