use clap::Parser;
use folio_rag::cli::commands::{Cli, Commands};
use folio_rag::config::Config;
use folio_rag::domain::error::DomainError;
use folio_rag::domain::values::portfolio::PortfolioAnalysis;
use folio_rag::infrastructure::parsers::HoldingsParsers;
use folio_rag::logging::init_logging;
use folio_rag::FolioRag;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Analysis needs no index
    if let Commands::Analyze { file } = &cmd {
        let (name, content) = read_file(file)?;
        let records = HoldingsParsers::default().parse_upload(&name, &content)?;
        let analysis = PortfolioAnalysis::from_records(records)?;
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let app = FolioRag::from_config(&config).await?;

    match cmd {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.bind_addr.clone());
            folio_rag::server::serve(Arc::new(app), &bind).await?;
        }
        Commands::Search { query, top_k, threshold } => {
            let result = app.search_news(&query, top_k, threshold).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Company { name, top_k } => {
            let result = app.company_news(&name, top_k).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Topic { topic, top_k } => {
            let result = app.topic_news(&topic, top_k).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Ask { file, question } => {
            let (name, content) = read_file(&file)?;
            let answer = app.ask_portfolio(&name, &content, &question).await?;
            println!("{answer}");
        }
        Commands::Analyze { .. } => {}
    }
    Ok(())
}

fn read_file(path: &str) -> Result<(String, Vec<u8>), DomainError> {
    let content = std::fs::read(path)
        .map_err(|e| DomainError::InvalidInput(format!("cannot read {path}: {e}")))?;
    let name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string();
    Ok((name, content))
}
