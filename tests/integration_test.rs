mod common;

use chrono::Utc;
use pkg_publisher::kafka::{ProtobufSerializer, TopicStatus};
use pkg_publisher::{Error, Package};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rdkafka::Message;
use std::time::Duration;
use tokio::time::timeout;

async fn consume_packages(
    config: &pkg_publisher::Config,
    expected: usize,
) -> Vec<(Vec<u8>, Package)> {
    let consumer = common::create_test_consumer(config, &config.topic.name);
    let mut received = Vec::new();

    let timeout_duration = Duration::from_secs(15);
    let start = tokio::time::Instant::now();

    while received.len() < expected && start.elapsed() < timeout_duration {
        if let Ok(Ok(message)) = timeout(Duration::from_secs(1), consumer.recv()).await {
            let key = message.key().unwrap_or_default().to_vec();
            let payload = message.payload().expect("record without value");
            let package = ProtobufSerializer::deserialize(payload).unwrap();
            received.push((key, package));
        }
    }

    received
}

#[tokio::test]
#[ignore] // Run with: cargo test --ignored integration_test::test_end_to_end_publish
async fn test_end_to_end_publish() {
    tracing_subscriber::fmt()
        .with_env_filter("pkg_publisher=debug,rdkafka=info")
        .try_init()
        .ok();

    let mut config = common::get_test_config();
    config.topic.name = format!("{}_e2e", config.topic.name);

    let before = Utc::now();
    let summary = pkg_publisher::run(&config, &mut StdRng::from_entropy())
        .await
        .unwrap();
    let after = Utc::now();

    assert_eq!(summary.topic_status, TopicStatus::Created);

    let received = consume_packages(&config, 1).await;
    assert_eq!(received.len(), 1);

    let (key, package) = &received[0];
    assert!(!key.is_empty());
    assert_eq!(key.as_slice(), summary.package.id.as_bytes());
    assert_eq!(package.id, summary.package.id);
    assert_eq!(package.status_code(), summary.package.status_code());

    let created_at = package.created_at_utc().unwrap();
    assert!(created_at >= before && created_at <= after);
}

#[tokio::test]
#[ignore] // Run with: cargo test --ignored integration_test::test_existing_topic_is_reused
async fn test_existing_topic_is_reused() {
    let mut config = common::get_test_config();
    config.topic.name = format!("{}_reuse", config.topic.name);

    let first = pkg_publisher::run(&config, &mut StdRng::from_entropy())
        .await
        .unwrap();
    let second = pkg_publisher::run(&config, &mut StdRng::from_entropy())
        .await
        .unwrap();

    assert_eq!(first.topic_status, TopicStatus::Created);
    assert_eq!(second.topic_status, TopicStatus::AlreadyExists);
    assert_ne!(first.package.id, second.package.id);

    let received = consume_packages(&config, 2).await;
    let ids: Vec<&str> = received.iter().map(|(_, p)| p.id.as_str()).collect();
    assert!(ids.contains(&first.package.id.as_str()));
    assert!(ids.contains(&second.package.id.as_str()));
}

#[tokio::test]
async fn test_unreachable_broker_fails() {
    let mut config = pkg_publisher::Config::new(vec!["127.0.0.1:1".to_string()], "never");
    config.kafka.metadata_timeout_secs = 2;

    let result = pkg_publisher::run(&config, &mut StdRng::seed_from_u64(1)).await;

    match result {
        Err(e) => {
            assert!(matches!(e, Error::Kafka(_)), "unexpected error: {:?}", e);
            assert_eq!(e.category(), "admin");
        }
        Ok(summary) => panic!("published {} without a broker", summary.package.id),
    }
}

#[tokio::test]
async fn test_malformed_broker_fails_before_connecting() {
    let config = pkg_publisher::Config::new(vec!["localhost".to_string()], "never");

    let result = pkg_publisher::run(&config, &mut StdRng::seed_from_u64(1)).await;

    assert!(matches!(result, Err(Error::Config(_))));
}
