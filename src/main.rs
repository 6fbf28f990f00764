use sda_assistant::config::load_dotenv;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "sda_assistant=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(any(feature = "desktop", feature = "web", feature = "mobile"))]
fn main() {
    load_dotenv();
    init_tracing();
    dioxus::launch(sda_assistant::ui::App);
}

#[cfg(not(any(feature = "desktop", feature = "web", feature = "mobile")))]
fn main() -> anyhow::Result<()> {
    // Env must be settled before the runtime starts its worker threads.
    load_dotenv();
    init_tracing();
    tokio::runtime::Runtime::new()?.block_on(run_console())
}

#[cfg(not(any(feature = "desktop", feature = "web", feature = "mobile")))]
async fn run_console() -> anyhow::Result<()> {
    use sda_assistant::ai::{InferenceClient, WebhookBackend};
    use sda_assistant::config::Config;
    use sda_assistant::render::RenderOptions;
    use sda_assistant::shell::Shell;
    use tokio::io::{BufReader, stdin, stdout};

    let config = Config::from_env();
    tracing::info!(endpoint = %config.endpoint, "starting console shell");
    let backend = WebhookBackend::new(config.endpoint.clone(), config.timeout)?;
    let mut shell = Shell::new(
        InferenceClient::new(backend),
        config,
        RenderOptions { ansi: true },
    );
    shell.run(BufReader::new(stdin()), stdout()).await
}
