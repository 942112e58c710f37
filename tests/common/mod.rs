use pkg_publisher::config::Config;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use std::env;

/// Get test configuration from environment variables
pub fn get_test_config() -> Config {
    let brokers = env::var("TEST_KAFKA_BROKERS")
        .unwrap_or_else(|_| "localhost:19092".to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();

    let mut config = Config::new(brokers, format!("test_pkg_{}", std::process::id()));
    config.kafka.metadata_timeout_secs = 10;
    config
}

/// Consumer reading `topic` from the beginning with a throwaway group.
pub fn create_test_consumer(config: &Config, topic: &str) -> StreamConsumer {
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", config.kafka.brokers.join(","))
        .set("group.id", format!("test_group_{}_{}", std::process::id(), topic))
        .set("auto.offset.reset", "earliest")
        .set("enable.auto.commit", "false")
        .create()
        .expect("Failed to create consumer");

    consumer
        .subscribe(&[topic])
        .expect("Failed to subscribe to topic");

    consumer
}
