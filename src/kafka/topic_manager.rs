use crate::config::TopicConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopicRequest {
    pub name: String,
    pub partitions: i32,
    pub replication_factor: i32,
}

/// Per-topic outcome of a create request: the topic name, or the name and
/// the broker's reason for rejecting it.
pub type CreateTopicResult = std::result::Result<String, (String, String)>;

/// Cluster metadata operations needed to ensure a topic exists.
#[async_trait]
pub trait TopicAdmin: Send + Sync {
    async fn list_topics(&self) -> Result<Vec<String>>;

    async fn create_topics(&self, topics: &[NewTopicRequest]) -> Result<Vec<CreateTopicResult>>;
}

/// rdkafka admin client plus the bound applied to its metadata requests.
pub struct KafkaTopicAdmin<'a> {
    admin_client: &'a AdminClient<DefaultClientContext>,
    timeout: Duration,
}

impl<'a> KafkaTopicAdmin<'a> {
    pub fn new(admin_client: &'a AdminClient<DefaultClientContext>, timeout: Duration) -> Self {
        Self {
            admin_client,
            timeout,
        }
    }
}

#[async_trait]
impl<'a> TopicAdmin for KafkaTopicAdmin<'a> {
    async fn list_topics(&self) -> Result<Vec<String>> {
        let metadata = self
            .admin_client
            .inner()
            .fetch_metadata(None, Timeout::After(self.timeout))?;

        Ok(metadata
            .topics()
            .iter()
            .map(|topic| topic.name().to_string())
            .collect())
    }

    async fn create_topics(&self, topics: &[NewTopicRequest]) -> Result<Vec<CreateTopicResult>> {
        let new_topics: Vec<NewTopic<'_>> = topics
            .iter()
            .map(|topic| {
                NewTopic::new(
                    &topic.name,
                    topic.partitions,
                    TopicReplication::Fixed(topic.replication_factor),
                )
            })
            .collect();

        let opts = AdminOptions::new().operation_timeout(Some(self.timeout));

        let results = self.admin_client.create_topics(&new_topics, &opts).await?;

        Ok(results
            .into_iter()
            .map(|result| result.map_err(|(topic, code)| (topic, code.to_string())))
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicStatus {
    Created,
    AlreadyExists,
}

pub struct TopicManager<A> {
    admin: A,
    default_partitions: i32,
    default_replication_factor: i32,
}

impl<A: TopicAdmin> TopicManager<A> {
    pub fn new(admin: A, partitions: i32, replication_factor: i32) -> Self {
        Self {
            admin,
            default_partitions: partitions,
            default_replication_factor: replication_factor,
        }
    }

    pub fn from_config(admin: A, config: &TopicConfig) -> Self {
        Self::new(admin, config.partitions, config.replication_factor)
    }

    /// Creates `topic_name` unless the cluster already lists it.
    #[instrument(skip(self), fields(topic = %topic_name))]
    pub async fn ensure_topic_exists(&self, topic_name: &str) -> Result<TopicStatus> {
        let topics = self.admin.list_topics().await.map_err(|e| {
            warn!("Failed to list topics: {}", e);
            e
        })?;
        debug!("Cluster reports {} topics", topics.len());

        if topics.iter().any(|topic| topic == topic_name) {
            info!("topic {} already exists.", topic_name);
            return Ok(TopicStatus::AlreadyExists);
        }

        self.create_topic(topic_name).await?;
        info!("topic {} created.", topic_name);
        Ok(TopicStatus::Created)
    }

    async fn create_topic(&self, topic_name: &str) -> Result<()> {
        let request = NewTopicRequest {
            name: topic_name.to_string(),
            partitions: self.default_partitions,
            replication_factor: self.default_replication_factor,
        };

        let results = self.admin.create_topics(&[request]).await?;

        for result in results {
            match result {
                Ok(topic) => {
                    debug!("Broker accepted topic: {}", topic);
                }
                Err((topic, reason)) => {
                    return Err(Error::TopicCreation { topic, reason });
                }
            }
        }

        Ok(())
    }
}
