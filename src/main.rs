use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use lang_quiz::config::DEFAULT_LOAD_TIMEOUT;
use lang_quiz::data::DEFAULT_QUESTIONS_PATH;
use lang_quiz::protocol::DEFAULT_PORT;
use lang_quiz::ServerConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve quizzes over HTTP and WebSocket
    Serve {
        /// Address to bind
        #[arg(long, env = "QUIZ_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, env = "QUIZ_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// JSON file to load the questions from
        #[arg(short, long, env = "QUIZ_QUESTIONS", default_value = DEFAULT_QUESTIONS_PATH)]
        questions: PathBuf,

        /// Reuse the parsed questions until the file changes
        #[arg(long, env = "QUIZ_CACHE")]
        cache: bool,

        /// Give up on loading the questions after this many milliseconds
        #[arg(long, env = "QUIZ_LOAD_TIMEOUT_MS", default_value_t = DEFAULT_LOAD_TIMEOUT.as_millis() as u64)]
        load_timeout_ms: u64,
    },

    /// Take a quiz in the terminal
    Play {
        /// Language to be quizzed on
        #[arg(short, long)]
        language: String,

        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Server port
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Serve {
            host,
            port,
            questions,
            cache,
            load_timeout_ms,
        } => {
            init_logging();
            let config = ServerConfig {
                host,
                port,
                questions,
                cache,
                load_timeout: Duration::from_millis(load_timeout_ms),
            };
            lang_quiz::server::run(config).await
        }
        Command::Play {
            language,
            host,
            port,
        } => lang_quiz::client::run(host, port, language).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lang_quiz=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
