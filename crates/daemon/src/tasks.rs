// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrent task driver for the three long-lived tasks: the cleaner
//! loop, the packer loop, and the HTTP server, fanned out onto a
//! `tokio::task::JoinSet`.

use std::future::Future;

use dvln_worker::{Processor, Worker};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Run the cleaner worker, the packer worker, and the HTTP server
/// concurrently, returning only once all three have stopped.
pub async fn run_tasks<C, P, F>(cleaner: Worker<C>, packer: Worker<P>, api: F, cancel: CancellationToken)
where
    C: Processor + Send + Sync + 'static,
    P: Processor + Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let mut tasks: JoinSet<()> = JoinSet::new();

    let cleaner_cancel = cancel.clone();
    tasks.spawn(async move { cleaner.run(&cleaner_cancel).await });

    let packer_cancel = cancel.clone();
    tasks.spawn(async move { packer.run(&packer_cancel).await });

    tasks.spawn(api);

    while tasks.join_next().await.is_some() {}
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
