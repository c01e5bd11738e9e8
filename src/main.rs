// SPDX-License-Identifier: MPL-2.0
use iced_lightbox::app::{self, Flags};
use iced_lightbox::config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: iced_lightbox [--platform touch|remote] [--strategy scroll|page] <DIR>";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return Ok(());
    }

    let platform = args.opt_value_from_str("--platform").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring --platform");
        None
    });
    let strategy = args.opt_value_from_str("--strategy").unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring --strategy");
        None
    });
    let root = args
        .finish()
        .into_iter()
        .next()
        .map(PathBuf::from);

    let (config, warning) = config::load();
    if let Some(warning) = warning {
        tracing::warn!(%warning, "using default configuration");
    }

    app::run(Flags {
        root,
        platform,
        strategy,
        config,
    })
}
