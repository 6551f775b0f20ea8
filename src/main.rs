use clap::Parser;
use fchat::app::Application;
use fchat::cli::parser::Args;
use fchat::commands::create_command_registry;
use fchat::config::Config;
use fchat::core::error::ChatError;
use fchat::display;
use fchat::fallback::FallbackDispatcher;
use fchat::providers::openrouter::OpenRouterProvider;
use tracing::Level;

async fn run(args: Args) -> Result<(), ChatError> {
    let mut config = Config::load()?;
    config.apply_env(|name| std::env::var(name).ok());
    let settings = config.resolve(&args)?;

    let provider = OpenRouterProvider::new(
        settings.base_url.clone(),
        settings.api_key.clone(),
        &settings.site_url,
        &settings.site_name,
        settings.timeout,
    )?;
    tracing::debug!(endpoint = provider.endpoint(), "completion provider ready");

    let dispatcher = FallbackDispatcher::new(Box::new(provider), settings.models.clone())
        .with_max_attempts(settings.max_attempts);

    let mut app = Application::new(args, settings, dispatcher, create_command_registry());
    app.run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let level = if args.debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        display::display_error(&e.to_string());
        std::process::exit(1);
    }
}
