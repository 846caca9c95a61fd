// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The process orchestrator: store init, cache hydrate, construct
//! processors, install signal handlers, run concurrently, wait, close.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use dvln_broker::{
    KafkaReachability, KafkaReader, KafkaReaderConfig, KafkaWriter, Reader, StartPosition, Writer,
};
use dvln_cache::Cache;
use dvln_core::Config;
use dvln_pipeline::{Cleaner, Packer};
use dvln_store::Store;
use dvln_worker::Worker;

use crate::error::DaemonError;
use crate::tasks::run_tasks;

const CLEANER_GROUP_ID: &str = "cleaner-group";
const PACKER_GROUP_ID: &str = "packer-group";

/// Run the whole process: boot the cache, cleaner, packer, and query API
/// concurrently under a shared cancellation signal, wait for all on
/// shutdown.
pub async fn run(config: Config) -> Result<(), DaemonError> {
    info!("starting service");

    let store = Store::init(&config.db_conn_string()).await?;

    let cache = Arc::new(Cache::new());
    let cancel = CancellationToken::new();

    hydrate_cache(&cache, &config, &cancel).await?;
    cache.dump();
    info!("cache hydrated with initial data");

    let cleaner_reader = KafkaReader::connect(KafkaReaderConfig {
        brokers: config.kafka_broker.clone(),
        topic: config.kafka_device_events_topic.clone(),
        group_id: Some(CLEANER_GROUP_ID.to_string()),
        start: StartPosition::GroupManaged,
    })?;
    let cleaned_writer =
        KafkaWriter::connect(&config.kafka_broker, config.kafka_device_events_cleaned_topic.clone())?;
    let cleaner_reader: Arc<dyn Reader> = Arc::new(cleaner_reader);
    let cleaned_writer: Arc<dyn Writer> = Arc::new(cleaned_writer);
    let cleaner = Worker::new(
        "cleaner",
        Cleaner::new(cleaner_reader.clone(), cleaned_writer.clone(), cache),
    );

    let packer_reader = KafkaReader::connect(KafkaReaderConfig {
        brokers: config.kafka_broker.clone(),
        topic: config.kafka_device_events_cleaned_topic.clone(),
        group_id: Some(PACKER_GROUP_ID.to_string()),
        start: StartPosition::GroupManaged,
    })?;
    let compacted_writer = KafkaWriter::connect(
        &config.kafka_broker,
        config.kafka_device_events_cleaned_compacted_topic.clone(),
    )?;
    let packer_reader: Arc<dyn Reader> = Arc::new(packer_reader);
    let compacted_writer: Arc<dyn Writer> = Arc::new(compacted_writer);
    let packer = Worker::new("packer", Packer::new(packer_reader.clone(), compacted_writer.clone()));

    crate::signal::install(cancel.clone());

    let api_cancel = cancel.clone();
    let http_addr = config.http_addr.clone();
    let api = async move { dvln_api::serve(&http_addr, store, api_cancel).await };

    run_tasks(cleaner, packer, api, cancel).await;

    cleaner_reader.close().await;
    cleaned_writer.close().await;
    packer_reader.close().await;
    compacted_writer.close().await;

    info!("daemon stopped");
    Ok(())
}

async fn hydrate_cache(cache: &Cache, config: &Config, cancel: &CancellationToken) -> Result<(), DaemonError> {
    let reader = KafkaReader::connect(KafkaReaderConfig {
        brokers: config.kafka_broker.clone(),
        topic: config.kafka_device_events_cleaned_compacted_topic.clone(),
        group_id: None,
        start: StartPosition::Earliest,
    })?;
    let reachability = KafkaReachability::new(config.kafka_broker.clone());

    cache.hydrate(&reader, &reachability, cancel).await?;
    reader.close().await;
    Ok(())
}
