use address_validator::utils::{logger, validation::Validate};
use address_validator::{CliConfig, Dispatcher, Listener, ServiceError, ZmqReplyChannel};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = serve(&config).await {
        tracing::error!("❌ Address validator stopped: {} (Category: {:?})", e, e.category());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn serve(config: &CliConfig) -> Result<(), ServiceError> {
    config.validate()?;

    let dispatcher = Dispatcher::from_config(config.service_config())?;
    let channel = ZmqReplyChannel::bind(&config.bind).await?;

    let endpoint = channel.endpoint().to_string();
    let listener = Listener::new(channel, dispatcher);

    tracing::info!(
        "Property Validation Microservice running in {} mode ({} validator) on {}",
        listener.dispatcher().config().mode,
        listener.dispatcher().validator_name(),
        endpoint
    );

    let replies = listener
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Unable to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    tracing::info!("✅ Served {} requests", replies);
    Ok(())
}
