// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rdkafka-backed `Reader`/`Writer` implementations.

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::{Message, Offset, TopicPartitionList};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::capability::{Reachability, Reader, Writer};
use crate::error::BrokerError;
use crate::message::BrokerMessage;

/// Where a reader without a consumer group should start: the cache
/// hydration reader always starts at the earliest offset; grouped readers
/// (cleaner, packer) let the broker track position via the consumer group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPosition {
    Earliest,
    GroupManaged,
}

/// Configuration for a Kafka-backed reader.
#[derive(Debug, Clone)]
pub struct KafkaReaderConfig {
    pub brokers: String,
    pub topic: String,
    /// `None` for the cache's one-shot hydration reader: read-only, no
    /// consumer group, no offset commits.
    pub group_id: Option<String>,
    pub start: StartPosition,
}

/// A `Reader` backed by `rdkafka::consumer::StreamConsumer`.
pub struct KafkaReader {
    consumer: StreamConsumer,
    topic: String,
}

impl KafkaReader {
    pub fn connect(cfg: KafkaReaderConfig) -> Result<Self, BrokerError> {
        let mut client_config = ClientConfig::new();
        client_config.set("bootstrap.servers", &cfg.brokers);
        client_config.set("enable.auto.commit", "true");
        client_config.set(
            "auto.offset.reset",
            match cfg.start {
                StartPosition::Earliest => "earliest",
                StartPosition::GroupManaged => "latest",
            },
        );
        if let Some(group_id) = &cfg.group_id {
            client_config.set("group.id", group_id);
        } else {
            // Hydration reads without a consumer group: assign the topic's
            // partitions directly instead of joining a group.
            client_config.set("group.id", "dvln-cache-hydration");
        }

        let consumer: StreamConsumer = client_config
            .create()
            .map_err(|e| BrokerError::ReadMessage(format!("connect: {e}")))?;

        if cfg.group_id.is_none() {
            assign_all_partitions_from_earliest(&consumer, &cfg.topic)?;
        } else {
            consumer
                .subscribe(&[&cfg.topic])
                .map_err(|e| BrokerError::ReadMessage(format!("subscribe: {e}")))?;
        }

        Ok(Self { consumer, topic: cfg.topic })
    }
}

fn assign_all_partitions_from_earliest(
    consumer: &StreamConsumer,
    topic: &str,
) -> Result<(), BrokerError> {
    let metadata = consumer
        .fetch_metadata(Some(topic), Duration::from_secs(5))
        .map_err(|e| BrokerError::ReadMessage(format!("fetch_metadata: {e}")))?;
    let mut assignment = TopicPartitionList::new();
    for t in metadata.topics() {
        for p in t.partitions() {
            assignment.add_partition_offset(topic, p.id(), Offset::Beginning).map_err(|e| {
                BrokerError::ReadMessage(format!("add_partition_offset: {e}"))
            })?;
        }
    }
    consumer
        .assign(&assignment)
        .map_err(|e| BrokerError::ReadMessage(format!("assign: {e}")))
}

#[async_trait]
impl Reader for KafkaReader {
    async fn read_message(&self, cancel: &CancellationToken) -> Result<BrokerMessage, BrokerError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(BrokerError::Cancelled),
            result = self.consumer.recv() => {
                match result {
                    Ok(msg) => Ok(BrokerMessage::new(
                        msg.key().unwrap_or_default(),
                        msg.payload().unwrap_or_default(),
                    )),
                    Err(KafkaError::NoMessageReceived) => Err(BrokerError::ReadMessage(
                        "no message received".to_string(),
                    )),
                    Err(e) => Err(BrokerError::ReadMessage(e.to_string())),
                }
            }
        }
    }

    fn lag(&self) -> i64 {
        let Ok(assignment) = self.consumer.assignment() else {
            return 0;
        };
        let mut total = 0i64;
        for elem in assignment.elements() {
            let (low, high) = match self.consumer.fetch_watermarks(
                &self.topic,
                elem.partition(),
                Duration::from_secs(5),
            ) {
                Ok(bounds) => bounds,
                Err(e) => {
                    warn!(error = %e, "failed to fetch watermarks for lag calculation");
                    continue;
                }
            };
            let position = match self.consumer.position() {
                Ok(tpl) => tpl
                    .find_partition(&self.topic, elem.partition())
                    .and_then(|p| p.offset().to_raw())
                    .unwrap_or(low),
                Err(_) => low,
            };
            total += (high - position).max(0);
        }
        total
    }

    async fn close(&self) {
        // StreamConsumer closes its connection on drop; nothing to do here
        // beyond giving processors a symmetric `close()` to call.
    }
}

/// A `Writer` backed by `rdkafka::producer::FutureProducer`.
pub struct KafkaWriter {
    producer: FutureProducer,
    topic: String,
}

impl KafkaWriter {
    pub fn connect(brokers: &str, topic: impl Into<String>) -> Result<Self, BrokerError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("acks", "all")
            .set("enable.idempotence", "true")
            .set("retries", "10")
            .set("retry.backoff.ms", "1000")
            .create()
            .map_err(|e| BrokerError::WriteMessage(format!("connect: {e}")))?;
        Ok(Self { producer, topic: topic.into() })
    }
}

#[async_trait]
impl Writer for KafkaWriter {
    async fn write_messages(
        &self,
        cancel: &CancellationToken,
        messages: Vec<BrokerMessage>,
    ) -> Result<(), BrokerError> {
        for message in messages {
            let send = self.producer.send(
                FutureRecord::to(&self.topic).key(&message.key).payload(&message.value),
                Duration::from_secs(10),
            );
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(BrokerError::Cancelled),
                result = send => {
                    result.map_err(|(e, _)| BrokerError::WriteMessage(e.to_string()))?;
                }
            }
        }
        Ok(())
    }

    async fn close(&self) {
        // FutureProducer flushes in-flight deliveries on drop.
    }
}

/// `Reachability` backed by repeated Kafka metadata fetches against a
/// configured broker address.
pub struct KafkaReachability {
    brokers: String,
}

impl KafkaReachability {
    pub fn new(brokers: impl Into<String>) -> Self {
        Self { brokers: brokers.into() }
    }
}

#[async_trait]
impl Reachability for KafkaReachability {
    async fn wait_ready(&self, deadline: Duration, interval: Duration) -> Result<(), BrokerError> {
        wait_for_broker(&self.brokers, deadline, interval).await
    }
}

/// Probe broker reachability by fetching cluster metadata, retrying every
/// `interval` up to `deadline`.
pub async fn wait_for_broker(
    brokers: &str,
    deadline: Duration,
    interval: Duration,
) -> Result<(), BrokerError> {
    let client_config: ClientConfig = {
        let mut c = ClientConfig::new();
        c.set("bootstrap.servers", brokers);
        c
    };
    let consumer: std::sync::Arc<StreamConsumer> = std::sync::Arc::new(
        client_config
            .create()
            .map_err(|e| BrokerError::ReadMessage(format!("probe connect: {e}")))?,
    );

    let start = tokio::time::Instant::now();
    loop {
        let probe = {
            let consumer = consumer.clone();
            tokio::task::spawn_blocking(move || consumer.fetch_metadata(None, interval))
        };
        match probe.await {
            Ok(Ok(_metadata)) => return Ok(()),
            Ok(Err(e)) => warn!(%brokers, error = %e, "broker not ready"),
            Err(e) => warn!(%brokers, error = %e, "broker probe task failed"),
        }
        if start.elapsed() >= deadline {
            return Err(BrokerError::BrokerUnreachable);
        }
        tokio::time::sleep(interval).await;
    }
}
