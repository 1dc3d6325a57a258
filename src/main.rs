use roster::{
    configuration::get_configuration,
    startup::Application,
    telementry::{OtlpExport, get_subscriber, init_subscriber, shutdown_telemetry},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration()?;

    let otlp = configuration
        .telemetry
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| OtlpExport {
            endpoint,
            environment: &configuration.application.environment,
        });
    let subscriber = get_subscriber("roster".into(), "info".into(), otlp, std::io::stdout)?;
    init_subscriber(subscriber)?;

    tracing::info!(
        environment = %configuration.application.environment,
        "Starting roster"
    );
    let application = Application::build(&configuration).await?;
    let outcome = application.run_until_stopped().await;
    shutdown_telemetry();
    Ok(outcome?)
}
