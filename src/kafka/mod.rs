pub mod client;
pub mod producer;
pub mod serializer;
pub mod topic_manager;


pub use client::KafkaClients;
pub use producer::{Delivery, KafkaProducer, OutboundRecord, RecordSink};
pub use serializer::ProtobufSerializer;
pub use topic_manager::{KafkaTopicAdmin, NewTopicRequest, TopicAdmin, TopicManager, TopicStatus};
