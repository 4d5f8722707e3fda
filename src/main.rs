use gitops_apply::presentation::cli::CliApp;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let app = CliApp::new();

    // Initialize logging
    app.init_logging();

    // Run the CLI application
    app.run().await
}
