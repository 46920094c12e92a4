// SPDX: CC0-1.0

use anyhow::{anyhow, Context};
use equation_grapher::{
    app::PlotterApp,
    config::{Config, TITLE},
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("unexpected error: {err}");
            let chain = err.chain();
            if chain.len() > 1 {
                eprintln!();
                eprintln!("context:");
                for it in chain.skip(1) {
                    eprintln!("  {it}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,equation_grapher=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting {TITLE} {}", env!("CARGO_PKG_VERSION"));

    let config = Config::default();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.fallback_size)
            .with_title(TITLE),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(PlotterApp::new(config)))
        }),
    )
    .map_err(|err| anyhow!("{err}"))
    .context("failed to run graphics window")?;

    tracing::info!("shutting down");
    Ok(())
}
