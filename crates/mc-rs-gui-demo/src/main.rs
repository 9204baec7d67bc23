mod catalog;
mod config;
mod console;

use std::time::Duration;

use config::DemoConfig;
use console::{Console, ConsoleHost};
use mc_rs_gui::Viewer;
use tokio::io::AsyncBufReadExt;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "gui-demo.toml".into());
    let config = match DemoConfig::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("MC-RS GUI demo v{} starting", env!("CARGO_PKG_VERSION"));

    let samples = match catalog::samples(&config.navigation.style()) {
        Ok(samples) => samples,
        Err(e) => {
            error!("Failed to build sample menus: {e}");
            std::process::exit(1);
        }
    };
    let mut viewer = Viewer::new(1, config.demo.viewer_name.as_str());
    viewer.operator = config.demo.operator;
    let mut console = Console::new(ConsoleHost::new(config.demo.json_views), viewer, samples);
    info!("Registered {} sample menus, type `help` for commands", console.manager.len());

    // Console REPL: read lines from stdin
    let (console_tx, mut console_rx) = tokio::sync::mpsc::channel::<String>(32);
    tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let tick = Duration::from_millis(config.demo.tick_millis.max(1));
    let mut tick_interval = tokio::time::interval(tick);
    loop {
        tokio::select! {
            _ = tick_interval.tick() => console.tick(),
            line = console_rx.recv() => match line {
                Some(line) => {
                    if !console.handle_line(&line) {
                        break;
                    }
                }
                None => break, // stdin closed
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    let viewer = console.viewer.clone();
    console.manager.handle_quit(&mut console.host, &viewer);
    info!("Demo shut down.");
}
