use clap::Parser;
use pkg_publisher::config::{DEFAULT_BROKER, DEFAULT_TOPIC};
use pkg_publisher::Config;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "pkg-publisher")]
#[command(about = "Publishes one protobuf Package record to Kafka", long_about = None)]
struct Args {
    #[arg(short, long, value_delimiter = ',', default_value = DEFAULT_BROKER, help = "Seed broker addresses (host:port)")]
    brokers: Vec<String>,

    #[arg(short, long, default_value = DEFAULT_TOPIC, help = "Topic to publish to")]
    topic: String,

    #[arg(short, long, help = "Enable JSON output for logs")]
    json_logs: bool,

    #[arg(short, long, help = "Verbose logging")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.json_logs, args.verbose);

    let config = Config::new(args.brokers, args.topic);

    info!(
        kafka_brokers = ?config.kafka.brokers,
        topic = %config.topic.name,
        "Starting pkg-publisher"
    );

    match pkg_publisher::run(&config, &mut rand::thread_rng()).await {
        Ok(summary) => {
            info!(
                id = %summary.package.id,
                topic_status = ?summary.topic_status,
                "Publish complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(category = e.category(), "{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(json: bool, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("pkg_publisher=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pkg_publisher=info,warn"))
    };

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
