// This main function is the entry point when running `cargo run -p web-server`.
// It loads the configuration, sets up logging and hands over to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = configuration::load_config(None)?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;
    web_server::run_server(settings).await
}
