// Streaming service - Pushes KPI collection changes to long-lived clients
use crate::application::kpi_store::KpiStore;
use crate::domain::kpi::KpiRecord;
use crate::domain::summary::{SummaryStats, summarize};
use crate::domain::view::{KpiFilter, apply_filter};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

const STREAM_BUFFER: usize = 16;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamMessage {
    /// Current state, sent once when the stream opens
    Snapshot {
        kpis: Vec<KpiRecord>,
        summary: SummaryStats,
    },
    /// Sent after every store replacement
    Update {
        sequence: u64,
        kpis: Vec<KpiRecord>,
        summary: SummaryStats,
    },
}

#[derive(Clone)]
pub struct StreamingService {
    store: KpiStore,
    shutdown: Arc<watch::Sender<bool>>,
}

impl StreamingService {
    pub fn new(store: KpiStore) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            store,
            shutdown: Arc::new(shutdown),
        }
    }

    /// End every open stream, and any opened later, after its snapshot.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
        tracing::info!("Closing KPI streams");
    }

    /// Open a stream of filtered collections.
    ///
    /// The store subscription is released once the receiver is dropped or
    /// the service shuts down.
    pub fn stream_updates(&self, filter: KpiFilter) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);

        // Subscribe before reading the snapshot so no replacement falls in between
        let (update_tx, mut update_rx) = mpsc::unbounded_channel();
        let subscription = self.store.subscribe(move |records| {
            let _ = update_tx.send(records.clone());
        });

        let records = self.store.get_all();
        let snapshot = StreamMessage::Snapshot {
            kpis: apply_filter(&records, filter),
            summary: summarize(&records),
        };
        // The channel is fresh, so the first message always fits
        let _ = tx.try_send(snapshot);

        tracing::debug!(
            ?filter,
            subscribers = self.store.subscriber_count(),
            "Opened KPI stream"
        );

        let mut shutdown = self.shutdown.subscribe();
        tokio::spawn(async move {
            let _subscription = subscription;
            let mut sequence = 0u64;
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    _ = async { let _ = shutdown.wait_for(|stopped| *stopped).await; } => break,
                    next = update_rx.recv() => {
                        let Some(records) = next else {
                            break;
                        };
                        sequence += 1;
                        let msg = StreamMessage::Update {
                            sequence,
                            kpis: apply_filter(&records, filter),
                            summary: summarize(&records),
                        };
                        if tx.send(msg).await.is_err() {
                            break;
                        }
                        tracing::debug!(sequence, ?filter, "Streamed KPI update");
                    }
                }
            }
            tracing::debug!(updates = sequence, "KPI stream closed");
        });

        rx
    }
}
