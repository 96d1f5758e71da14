use clap::Parser;
use tracing::error;

use investment_graph::api::{self, Cli, Command};

#[tokio::main]
async fn main() {
    investment_graph::telemetry::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => {
            if let Err(e) = api::run_http_server(host, port).await {
                error!("server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Render { mode, format } => match api::render_chart(mode.into(), format) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
    }
}
