#[path = "llm-batch/app.rs"]
mod app;
#[path = "llm-batch/args.rs"]
mod args;
#[path = "llm-batch/logging.rs"]
mod logging;
#[path = "llm-batch/progress.rs"]
mod progress;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
