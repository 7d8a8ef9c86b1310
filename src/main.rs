use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prepwise::{app, Config, GenerateRequest, HttpQuestionGenerator, QuestionGenerator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prepwise", version, about = "Voice-driven mock interview service")]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(long, global = true, default_value = "config/prepwise")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve,
    /// Generate and store one interview, printing its ID
    Generate {
        #[arg(long)]
        role: String,
        #[arg(long)]
        level: String,
        /// Comma-separated technologies
        #[arg(long)]
        techstack: String,
        #[arg(long)]
        amount: u32,
        /// Behavioural/technical focus
        #[arg(long = "type", default_value = "mixed")]
        interview_type: String,
        #[arg(long)]
        user_id: String,
        /// Call a running service at this base URL instead of generating in-process
        #[arg(long)]
        remote: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,prepwise=debug")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Serve => serve(cfg).await,
        Command::Generate {
            role,
            level,
            techstack,
            amount,
            interview_type,
            user_id,
            remote,
        } => {
            let req = GenerateRequest {
                interview_type,
                role,
                level,
                techstack,
                amount: amount.to_string(),
                userid: user_id,
            };
            let id = match remote {
                Some(url) => HttpQuestionGenerator::new(&url).generate_questions(&req).await,
                None => app::build_state(&cfg).generator.generate(&req).await,
            }
            .context("Failed to generate interview")?;
            println!("{}", id);
            Ok(())
        }
    }
}

async fn serve(cfg: Config) -> Result<()> {
    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let state = app::build_state(&cfg);
    let router = prepwise::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, router)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
