use anyhow::Context;
use clap::Parser;
use goldluck_core::domain::pricing::Premium;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Debug, Parser)]
#[command(
    name = "goldluck",
    about = "Landed gold/silver prices with a short-term buy/sell/wait call"
)]
struct Args {
    /// Jeweler premium in percent: 0 to 5 in steps of 0.5.
    #[arg(long, default_value = "0", value_parser = parse_premium)]
    premium: Premium,

    /// Print the full report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn parse_premium(s: &str) -> Result<Premium, String> {
    s.parse::<Premium>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = goldluck_core::config::Settings::from_env()?;
    let sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let advisor = goldluck_core::pipeline::Advisor::from_settings(&settings)
        .context("failed to configure providers")?;

    tracing::info!(premium = args.premium.percent(), "fetching market data");

    let report = match advisor.run(args.premium).await {
        Ok(report) => report,
        Err(err) => {
            let err = anyhow::Error::new(err).context("market data unavailable");
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %format!("{err:#}"), "run aborted");
            eprintln!("{}", render::render_fetch_failure(&err));
            // exit() skips destructors; flush pending events first.
            drop(sentry_guard);
            std::process::exit(1);
        }
    };

    if args.json {
        let out = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{out}");
    } else {
        print!("{}", render::render_report(&report));
    }
    Ok(())
}

fn init_sentry(settings: &goldluck_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
