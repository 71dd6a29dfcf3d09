use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "folio-rag", about = "Portfolio analytics with semantic news retrieval")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the news index and serve the HTTP API
    Serve {
        /// Address to bind (overrides FOLIO_BIND)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Free-text news search
    Search {
        query: String,
        #[arg(long, default_value = "5")]
        top_k: usize,
        /// Maximum squared L2 distance (exclusive)
        #[arg(long, default_value = "2.0")]
        threshold: f32,
    },
    /// News about a company, using the engine's default threshold
    Company {
        name: String,
        #[arg(long, default_value = "5")]
        top_k: usize,
    },
    /// News about a topic (e.g. earnings, dividend), using the default threshold
    Topic {
        topic: String,
        #[arg(long, default_value = "5")]
        top_k: usize,
    },
    /// Analyze a portfolio file (CSV or JSON)
    Analyze {
        file: String,
    },
    /// Ask the language model a question about a portfolio file
    Ask {
        file: String,
        question: String,
    },
}
