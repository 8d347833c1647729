//! Environmental dashboard service.
//!
//! Runs the sampling loop against the demo sensor board, serves the gauges on
//! port 8000 and stops cleanly on Ctrl-C (or when the simulator window is
//! closed).
//!
//! | Build | Panel | Board thermometer | Proximity tap |
//! |-------|-------|-------------------|---------------|
//! | default | headless (frames logged at debug) | `vcgencmd measure_temp` | none |
//! | `--features simulator` | SDL2 window | simulated | `Space` |
//!
//! Logging follows `RUST_LOG`, defaulting to `enviro_dashboard=info`.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::Context;
use enviro_dashboard::Dashboard;
use enviro_dashboard::config::DashboardConfig;
use enviro_dashboard::demo::{TapSignal, demo_sensors};
use enviro_dashboard::display::Display;
use enviro_dashboard::metrics::GaugeRegistry;
use enviro_dashboard::sensors::Sensors;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("enviro_dashboard=info".parse()?))
        .init();

    info!("enviro-dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    // Ctrl-C only signals the loop; the loop decides when to stop
    let (interrupt_tx, interrupt_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        interrupt_tx.send(()).ok();
    })
    .context("installing the interrupt handler")?;

    let config = DashboardConfig::default();
    let registry = GaugeRegistry::new();
    registry
        .serve(config.metrics_addr)
        .with_context(|| format!("binding the metrics exporter to {}", config.metrics_addr))?;

    let tap = TapSignal::new();
    let (sensors, display, sample_interval) = board(&config, tap);
    let mut dashboard = Dashboard::new(config, sensors, display, registry).context("starting the dashboard")?;

    loop {
        match dashboard.tick(Instant::now()) {
            Ok(_) => {}
            Err(e) if e.is_closed() => break,
            Err(e) => return Err(anyhow::Error::new(e).context("dashboard tick failed")),
        }

        match interrupt_rx.recv_timeout(sample_interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!("Shutting down");
    Ok(())
}

/// Headless panel with the Pi's own thermometer.
#[cfg(not(feature = "simulator"))]
fn board(
    config: &DashboardConfig,
    tap: TapSignal,
) -> (Sensors, impl Display, Duration) {
    use enviro_dashboard::display::HeadlessPanel;
    use enviro_dashboard::thermometer::Vcgencmd;

    let sensors = demo_sensors(tap, Box::new(Vcgencmd));
    (sensors, HeadlessPanel::new(), config.sample_interval)
}

/// SDL2 window with a simulated thermometer. The loop runs faster so the
/// window stays responsive.
#[cfg(feature = "simulator")]
fn board(
    _config: &DashboardConfig,
    tap: TapSignal,
) -> (Sensors, impl Display, Duration) {
    use enviro_dashboard::config::SIMULATOR_SAMPLE_INTERVAL;
    use enviro_dashboard::demo::DemoThermometer;
    use enviro_dashboard::display::SimulatorPanel;

    let sensors = demo_sensors(tap.clone(), Box::new(DemoThermometer::new()));
    (sensors, SimulatorPanel::new(tap), SIMULATOR_SAMPLE_INTERVAL)
}
