use std::time::Duration;

use chrono::{DateTime, Utc};

use botchart_engine::{
    config::settings::Settings,
    engine::registry::ChartRegistry,
    services::bots,
};

fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    println!("Starting botchart monitor…");

    let settings = Settings::new().unwrap_or_else(|e| {
        eprintln!("Failed to load settings: {e}");
        std::process::exit(1);
    });

    let http = reqwest::Client::new();
    let all = bots::fetch_bots(&http, &settings).await?;
    let Some(bot) = all.into_iter().find(|b| b.active) else {
        println!("No active bots to watch.");
        return Ok(());
    };
    println!(
        "Watching bot {} ({} {} / {})",
        bot.id, bot.symbol, bot.interval, bot.strategy_name
    );

    let registry = ChartRegistry::new();
    let subject = bot.id.to_string();
    registry.open(&settings, &bot);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(Duration::from_secs(2)) => {
                let state = registry.channel_state(&subject);
                match registry.latest_candle(&subject) {
                    Some(c) => {
                        let ts = DateTime::<Utc>::from_timestamp(c.time, 0)
                            .map(|t| t.format("%H:%M:%S").to_string())
                            .unwrap_or_else(|| c.time.to_string());
                        println!(
                            "[{ts}] close {:.4}  vol {:.2}  bars {}  markers {}  channel {state:?}",
                            c.close,
                            c.volume,
                            registry.candles(&subject).map_or(0, |v| v.len()),
                            registry.markers(&subject).map_or(0, |v| v.len()),
                        );
                    }
                    None => println!("waiting for data… channel {state:?}"),
                }
            }
        }
    }

    registry.close(&subject);
    Ok(())
}
