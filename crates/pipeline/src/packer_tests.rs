// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use dvln_broker::{BrokerMessage, FakeTopic};
use tokio_util::sync::CancellationToken;

use super::*;

#[tokio::test]
async fn republishes_message_verbatim_with_same_key_and_value() {
    let cleaned = FakeTopic::new();
    let compacted = FakeTopic::new();
    cleaned.push(BrokerMessage::new(b"A".to_vec(), b"{\"some\":\"bytes\"}".to_vec()));

    let packer = Packer::new(Arc::new(cleaned.reader()), Arc::new(compacted.writer()));
    let cancel = CancellationToken::new();

    packer.process_message(&cancel).await.unwrap();

    let published = compacted.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].key, b"A");
    assert_eq!(published[0].value, b"{\"some\":\"bytes\"}");
}

#[tokio::test]
async fn write_failure_is_surfaced_as_an_error() {
    let cleaned = FakeTopic::new();
    cleaned.push(BrokerMessage::new(b"A".to_vec(), b"v".to_vec()));

    let packer = Packer::new(Arc::new(cleaned.reader()), Arc::new(dvln_broker::FailingWriter));
    let cancel = CancellationToken::new();

    let result = packer.process_message(&cancel).await;

    assert!(matches!(result, Err(PackerError::WriteMessage(_))));
}
