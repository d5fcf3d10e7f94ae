//! Wiring & DI. Entry point: bootstrap adapters, inject into the controller, run UI.
//! No business logic here.

use dotenv::dotenv;
use nexus_learn::adapters::auth::MockAuthAdapter;
use nexus_learn::adapters::entropy::{SystemClock, SystemEntropy};
use nexus_learn::adapters::store::MemoryStore;
use nexus_learn::adapters::surface::HtmlPage;
use nexus_learn::adapters::ui::tui::TuiInputPort;
use nexus_learn::domain::DomainError;
use nexus_learn::ports::{AuthPort, Clock, DataStorePort, EntropySource, InputPort, RenderSurface};
use nexus_learn::shared::config::AppConfig;
use nexus_learn::usecases::AppController;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    nexus_learn::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });
    if let Some(seed) = cfg.seed {
        info!(seed, "deterministic run");
    }

    // --- Entropy & clock ---
    let entropy: Arc<dyn EntropySource> = Arc::new(SystemEntropy::new(cfg.seed));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // --- Data store (embedded demo dataset) ---
    let store_latency = Duration::from_millis(cfg.store_latency_ms_or_default());
    let store: Arc<dyn DataStorePort> = Arc::new(
        MemoryStore::seeded(Arc::clone(&clock))
            .map_err(|e| anyhow::anyhow!("{}", e))?
            .with_latency(store_latency),
    );

    // --- Auth ---
    let auth_delay_ms = cfg.auth_delay_ms_or_default();
    let signed_in_probability = cfg.signed_in_probability_or_default();
    info!(
        auth_delay_ms,
        signed_in_probability, "mock auth: initial session resolves after {} ms", auth_delay_ms
    );
    let auth: Arc<dyn AuthPort> = Arc::new(
        MockAuthAdapter::new(Arc::clone(&entropy))
            .with_resolve_delay(Duration::from_millis(auth_delay_ms))
            .with_signed_in_probability(signed_in_probability),
    );
    if cfg.auth_token().is_some() {
        info!("token sign-in enabled (NEXUS_LEARN_AUTH_TOKEN)");
    }

    // --- Surface & controller ---
    let surface: Arc<dyn RenderSurface> = Arc::new(HtmlPage::new());
    let controller = Arc::new(
        AppController::new(store, auth, surface, entropy, clock)
            .with_welcome_delay(Duration::from_millis(cfg.welcome_delay_ms_or_default()))
            .with_auth_token(cfg.auth_token()),
    );

    let started = match controller.start().await {
        Ok(()) => true,
        // notice already shown; keep the UI up so it can be read
        Err(e @ DomainError::DataLoad(_)) => {
            error!(error = %e, "startup data load failed");
            false
        }
        Err(e) => return Err(anyhow::anyhow!("{}", e)),
    };

    let output_path = PathBuf::from(cfg.output_path_or_default());
    info!(path = %output_path.display(), "page snapshot path");
    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(controller, output_path).with_session_wait(started));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
