use clap::{Parser, Subcommand};

mod serve;

use serve::{ServeOptions, run_serve};
use triage_core::LabelRegistry;

#[derive(Parser, Debug)]
#[command(name = "triage", version)]
#[command(about = "Symptom triage service - disease prediction over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP prediction service
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:5000")]
        bind: String,
        /// Text-classification inference endpoint
        #[arg(long)]
        model_url: String,
        /// Inference request timeout in seconds
        #[arg(long, default_value_t = 120)]
        inference_timeout: u64,
        /// Disable the OpenAPI document and Swagger UI
        #[arg(long)]
        no_openapi: bool,
    },
    /// Print the disease classes the model distinguishes
    Diseases,
}

fn main() {
    // Initialize JSON logging once.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter, // fallback to default if parsing fails
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            model_url,
            inference_timeout,
            no_openapi,
        } => {
            if let Err(e) = run_serve(ServeOptions {
                bind,
                model_url,
                inference_timeout_secs: inference_timeout,
                no_openapi,
            }) {
                tracing::error!(error = %e, "server exited with an error");
                std::process::exit(1);
            }
        }
        Commands::Diseases => {
            let registry = LabelRegistry::new();
            for name in registry.all_names() {
                println!("{}", name);
            }
        }
    }
}
