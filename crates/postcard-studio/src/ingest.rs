//! Upload ingestion pipeline
//!
//! A batch of selected files becomes a batch of placeholders in one store
//! call, so the gallery shows every photo immediately and in selection order.
//! Each file is then decoded into a data URI on its own worker thread. The
//! workers report `(id, result)` pairs over a channel and the store owner
//! applies them by id when it polls or waits on the [`PendingBatch`].
//!
//! Completion order never affects display order. A result whose asset was
//! removed in the meantime is dropped. A failed decode removes its own
//! placeholder and nothing else.

use postcard_core::{AssetId, DataUri, ImageAsset, PostcardError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use crate::store::{AssetPatch, AssetStore};

/// Where a blob's bytes live
#[derive(Debug, Clone)]
pub enum BlobContent {
    Memory(Vec<u8>),
    /// Read on the decode worker
    Path(PathBuf),
}

/// One selected file
#[derive(Debug, Clone)]
pub struct FileBlob {
    pub name: String,
    pub content: BlobContent,
}

impl FileBlob {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content: BlobContent::Memory(bytes),
        }
    }

    /// A blob backed by a file on disk, named after the file
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            content: BlobContent::Path(path.to_path_buf()),
        }
    }
}

/// Turns a blob into a data URI. Runs on a worker thread.
pub trait BlobDecoder: Send + Sync + 'static {
    fn decode(&self, blob: &FileBlob) -> Result<DataUri>;
}

/// Reads the blob and base64-encodes it under its sniffed MIME type
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUriDecoder;

impl BlobDecoder for DataUriDecoder {
    fn decode(&self, blob: &FileBlob) -> Result<DataUri> {
        let fail = |reason: String| PostcardError::Decode {
            name: blob.name.clone(),
            reason,
        };

        let owned;
        let bytes: &[u8] = match &blob.content {
            BlobContent::Memory(bytes) => bytes,
            BlobContent::Path(path) => {
                owned = std::fs::read(path)
                    .map_err(|e| fail(format!("cannot read {}: {}", path.display(), e)))?;
                &owned
            }
        };

        if bytes.is_empty() {
            return Err(fail("file is empty".to_string()));
        }

        let mime = sniff_mime(&blob.name, bytes)
            .ok_or_else(|| fail("unsupported image format".to_string()))?;
        Ok(DataUri::from_bytes(mime, bytes))
    }
}

/// MIME type from the content signature, falling back to the file extension
pub fn sniff_mime(name: &str, bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .and_then(format_mime)
        .or_else(|| {
            image::ImageFormat::from_path(name)
                .ok()
                .and_then(format_mime)
        })
}

fn format_mime(format: image::ImageFormat) -> Option<&'static str> {
    match format {
        image::ImageFormat::Png => Some("image/png"),
        image::ImageFormat::Jpeg => Some("image/jpeg"),
        image::ImageFormat::WebP => Some("image/webp"),
        image::ImageFormat::Gif => Some("image/gif"),
        image::ImageFormat::Bmp => Some("image/bmp"),
        _ => None,
    }
}

/// Starts upload batches against a store
#[derive(Clone)]
pub struct Ingestor {
    decoder: Arc<dyn BlobDecoder>,
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}

impl Ingestor {
    pub fn new() -> Self {
        Self::with_decoder(DataUriDecoder)
    }

    pub fn with_decoder<D: BlobDecoder>(decoder: D) -> Self {
        Self {
            decoder: Arc::new(decoder),
        }
    }

    /// Append one placeholder per blob, then start decoding them all.
    ///
    /// When this returns the store already holds the placeholders, in blob
    /// order. Results are applied by the returned batch.
    pub fn ingest(&self, store: &mut AssetStore, blobs: Vec<FileBlob>) -> PendingBatch {
        let placeholders: Vec<ImageAsset> = blobs
            .iter()
            .map(|blob| ImageAsset::placeholder(blob.name.clone()))
            .collect();
        let ids: Vec<AssetId> = placeholders.iter().map(|a| a.id).collect();
        store.add(placeholders);

        let (tx, rx) = mpsc::channel();
        let mut pending = HashMap::with_capacity(blobs.len());

        for (id, blob) in ids.iter().copied().zip(blobs) {
            pending.insert(id, blob.name.clone());
            self.spawn_decode(id, blob, tx.clone());
        }
        drop(tx);

        log::info!("Ingesting {} file(s)", ids.len());

        PendingBatch {
            ids,
            pending,
            rx,
            report: BatchReport::default(),
        }
    }

    fn spawn_decode(&self, id: AssetId, blob: FileBlob, tx: Sender<DecodeOutcome>) {
        let decoder = Arc::clone(&self.decoder);
        let fallback_tx = tx.clone();
        let name = blob.name.clone();

        let spawned = std::thread::Builder::new()
            .name(format!("decode-{}", id))
            .spawn(move || {
                let result = decoder.decode(&blob);
                // Receiver gone means the batch was abandoned; nothing to do
                let _ = tx.send(DecodeOutcome { id, result });
            });

        if let Err(e) = spawned {
            let _ = fallback_tx.send(DecodeOutcome {
                id,
                result: Err(PostcardError::Decode {
                    name,
                    reason: format!("could not start decode worker: {}", e),
                }),
            });
        }
    }
}

struct DecodeOutcome {
    id: AssetId,
    result: Result<DataUri>,
}

/// A decode that failed; its placeholder has been removed
#[derive(Debug)]
pub struct DecodeFailure {
    pub id: AssetId,
    pub name: String,
    pub error: PostcardError,
}

/// What happened to each file of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Placeholders filled with their decoded payload
    pub decoded: Vec<AssetId>,
    /// Results that arrived after their asset was removed
    pub dropped: Vec<AssetId>,
    pub failed: Vec<DecodeFailure>,
}

/// Decodes still in flight for one upload batch
pub struct PendingBatch {
    ids: Vec<AssetId>,
    pending: HashMap<AssetId, String>,
    rx: Receiver<DecodeOutcome>,
    report: BatchReport,
}

impl PendingBatch {
    /// Placeholder ids, in selection order
    pub fn ids(&self) -> &[AssetId] {
        &self.ids
    }

    /// Number of files not yet settled
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn report(&self) -> &BatchReport {
        &self.report
    }

    /// Apply every result that has already arrived, without blocking.
    ///
    /// Returns how many results were applied by this call.
    pub fn poll(&mut self, store: &mut AssetStore) -> usize {
        let mut applied = 0;
        while !self.pending.is_empty() {
            match self.rx.try_recv() {
                Ok(outcome) => {
                    self.apply(store, outcome);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.fail_unreported(store);
                    break;
                }
            }
        }
        applied
    }

    /// Block until every file has settled, applying results as they arrive
    pub fn wait(mut self, store: &mut AssetStore) -> BatchReport {
        while !self.pending.is_empty() {
            match self.rx.recv() {
                Ok(outcome) => self.apply(store, outcome),
                Err(_) => self.fail_unreported(store),
            }
        }
        self.report
    }

    fn apply(&mut self, store: &mut AssetStore, outcome: DecodeOutcome) {
        let Some(name) = self.pending.remove(&outcome.id) else {
            return;
        };

        match outcome.result {
            Ok(data) => {
                if store.update_by_id(outcome.id, AssetPatch::decoded(data)) {
                    log::debug!("Decoded {} ({})", name, outcome.id);
                    self.report.decoded.push(outcome.id);
                } else {
                    log::warn!("Dropped decode of {}: asset {} was removed", name, outcome.id);
                    self.report.dropped.push(outcome.id);
                }
            }
            Err(error) => {
                log::warn!("{}", error);
                store.remove(outcome.id);
                self.report.failed.push(DecodeFailure {
                    id: outcome.id,
                    name,
                    error,
                });
            }
        }
    }

    /// Every worker is gone; whatever has not reported never will
    fn fail_unreported(&mut self, store: &mut AssetStore) {
        for (id, name) in self.pending.drain() {
            log::warn!("Decode worker for {} exited without a result", name);
            store.remove(id);
            self.report.failed.push(DecodeFailure {
                id,
                error: PostcardError::Decode {
                    name: name.clone(),
                    reason: "decode worker exited without a result".to_string(),
                },
                name,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

    /// Decoder whose calls block until the test opens that file's gate
    struct GatedDecoder {
        gates: Mutex<HashMap<String, Receiver<()>>>,
    }

    impl GatedDecoder {
        fn new(names: &[&str]) -> (Self, HashMap<String, Sender<()>>) {
            let mut gates = HashMap::new();
            let mut openers = HashMap::new();
            for name in names {
                let (tx, rx) = mpsc::channel();
                gates.insert(name.to_string(), rx);
                openers.insert(name.to_string(), tx);
            }
            (
                Self {
                    gates: Mutex::new(gates),
                },
                openers,
            )
        }
    }

    impl BlobDecoder for GatedDecoder {
        fn decode(&self, blob: &FileBlob) -> Result<DataUri> {
            let gate = self.gates.lock().unwrap().remove(&blob.name);
            if let Some(gate) = gate {
                let _ = gate.recv();
            }
            if blob.name.starts_with("bad") {
                return Err(PostcardError::Decode {
                    name: blob.name.clone(),
                    reason: "corrupt".to_string(),
                });
            }
            Ok(DataUri::from_base64("image/png", &blob.name))
        }
    }

    struct PanickingDecoder;

    impl BlobDecoder for PanickingDecoder {
        fn decode(&self, _blob: &FileBlob) -> Result<DataUri> {
            panic!("decoder bug");
        }
    }

    fn blobs(names: &[&str]) -> Vec<FileBlob> {
        names
            .iter()
            .map(|n| FileBlob::from_bytes(*n, PNG_MAGIC.to_vec()))
            .collect()
    }

    fn poll_until(
        batch: &mut PendingBatch,
        store: &mut AssetStore,
        mut done: impl FnMut(&AssetStore) -> bool,
    ) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(store) {
            assert!(Instant::now() < deadline, "timed out waiting for decodes");
            batch.poll(store);
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_placeholders_appear_immediately_in_order() {
        let (decoder, openers) = GatedDecoder::new(&["a.png", "b.png", "c.png"]);
        let ingestor = Ingestor::with_decoder(decoder);
        let mut store = AssetStore::new();

        let batch = ingestor.ingest(&mut store, blobs(&["a.png", "b.png", "c.png"]));

        let names: Vec<_> = store.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
        assert!(store.iter().all(|a| a.is_processing));
        assert!(store.iter().all(|a| a.original_data.is_empty() && a.current_data.is_empty()));
        assert_eq!(batch.ids(), store.ids().as_slice());

        for tx in openers.values() {
            tx.send(()).unwrap();
        }
        let report = batch.wait(&mut store);
        assert_eq!(report.decoded.len(), 3);
    }

    #[test]
    fn test_out_of_order_completion_keeps_order() {
        let names = ["a.png", "b.png", "c.png"];
        let (decoder, openers) = GatedDecoder::new(&names);
        let ingestor = Ingestor::with_decoder(decoder);
        let mut store = AssetStore::new();
        let mut batch = ingestor.ingest(&mut store, blobs(&names));
        let ids_before = store.ids();

        // Finish c first; it is revealed while a and b are still loading
        openers["c.png"].send(()).unwrap();
        let c = ids_before[2];
        poll_until(&mut batch, &mut store, |s| !s.get(c).unwrap().is_processing);
        assert!(store.get(ids_before[0]).unwrap().is_processing);
        assert_eq!(batch.remaining(), 2);

        openers["b.png"].send(()).unwrap();
        openers["a.png"].send(()).unwrap();
        let report = batch.wait(&mut store);

        assert_eq!(store.ids(), ids_before);
        for (asset, name) in store.iter().zip(names) {
            assert!(!asset.is_processing);
            assert!(!asset.original_data.is_empty());
            assert_eq!(asset.original_data, asset.current_data);
            assert_eq!(asset.current_data, DataUri::from_base64("image/png", name));
        }
        assert_eq!(report.decoded.len(), 3);
        assert!(report.failed.is_empty());
    }

    #[test]
    fn test_removed_before_decode_is_not_resurrected() {
        let names = ["a.png", "b.png"];
        let (decoder, openers) = GatedDecoder::new(&names);
        let ingestor = Ingestor::with_decoder(decoder);
        let mut store = AssetStore::new();
        let batch = ingestor.ingest(&mut store, blobs(&names));
        let a = batch.ids()[0];

        store.remove(a);
        for tx in openers.values() {
            tx.send(()).unwrap();
        }
        let report = batch.wait(&mut store);

        assert_eq!(store.len(), 1);
        assert!(!store.contains(a));
        assert_eq!(report.dropped, vec![a]);
        assert_eq!(store.as_slice()[0].name, "b.png");
        assert!(!store.as_slice()[0].is_processing);
    }

    #[test]
    fn test_reset_during_decode_drops_every_update() {
        let names = ["a.png", "b.png", "c.png"];
        let (decoder, openers) = GatedDecoder::new(&names);
        let ingestor = Ingestor::with_decoder(decoder);
        let mut store = AssetStore::new();
        let batch = ingestor.ingest(&mut store, blobs(&names));

        store.reset();
        for tx in openers.values() {
            tx.send(()).unwrap();
        }
        let report = batch.wait(&mut store);
        assert!(store.is_empty());
        assert_eq!(report.dropped.len(), 3);
    }

    #[test]
    fn test_failed_decode_removes_only_its_placeholder() {
        let names = ["a.png", "bad.png", "c.png"];
        let (decoder, openers) = GatedDecoder::new(&names);
        let ingestor = Ingestor::with_decoder(decoder);
        let mut store = AssetStore::new();
        let batch = ingestor.ingest(&mut store, blobs(&names));
        let bad = batch.ids()[1];

        for tx in openers.values() {
            tx.send(()).unwrap();
        }
        let report = batch.wait(&mut store);

        let names: Vec<_> = store.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);
        assert!(store.iter().all(|a| !a.is_processing));
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, bad);
        assert_eq!(report.failed[0].name, "bad.png");
    }

    #[test]
    fn test_panicking_worker_counts_as_failure() {
        let ingestor = Ingestor::with_decoder(PanickingDecoder);
        let mut store = AssetStore::new();
        let batch = ingestor.ingest(&mut store, blobs(&["a.png", "b.png"]));

        let report = batch.wait(&mut store);
        assert!(store.is_empty());
        assert_eq!(report.failed.len(), 2);
    }

    #[test]
    fn test_later_batch_appends_after_earlier_one() {
        let ingestor = Ingestor::new();
        let mut store = AssetStore::new();
        let first = ingestor.ingest(&mut store, blobs(&["a.png", "b.png"]));
        let second = ingestor.ingest(&mut store, blobs(&["c.png"]));

        second.wait(&mut store);
        first.wait(&mut store);

        let names: Vec<_> = store.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_empty_batch_is_settled() {
        let mut store = AssetStore::new();
        let mut batch = Ingestor::new().ingest(&mut store, Vec::new());
        assert!(batch.is_settled());
        assert_eq!(batch.poll(&mut store), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_data_uri_decoder_sniffs_content() {
        let decoder = DataUriDecoder;

        let png = decoder
            .decode(&FileBlob::from_bytes("photo", PNG_MAGIC.to_vec()))
            .unwrap();
        assert_eq!(png.mime_type(), Some("image/png"));
        assert_eq!(png.decode_bytes().unwrap(), PNG_MAGIC);

        // Content wins over a misleading extension
        let jpeg = decoder
            .decode(&FileBlob::from_bytes("photo.png", JPEG_MAGIC.to_vec()))
            .unwrap();
        assert_eq!(jpeg.mime_type(), Some("image/jpeg"));

        let by_ext = decoder
            .decode(&FileBlob::from_bytes("photo.webp", vec![1, 2, 3]))
            .unwrap();
        assert_eq!(by_ext.mime_type(), Some("image/webp"));
    }

    #[test]
    fn test_data_uri_decoder_rejects_unusable_blobs() {
        let decoder = DataUriDecoder;
        assert!(matches!(
            decoder.decode(&FileBlob::from_bytes("empty.png", Vec::new())),
            Err(PostcardError::Decode { .. })
        ));
        assert!(matches!(
            decoder.decode(&FileBlob::from_bytes("notes.txt", b"hello".to_vec())),
            Err(PostcardError::Decode { .. })
        ));
        let missing = std::env::temp_dir().join(format!("postcard_missing_{}.png", uuid::Uuid::new_v4()));
        assert!(decoder.decode(&FileBlob::from_path(&missing)).is_err());
    }

    #[test]
    fn test_decode_from_path() {
        let dir = std::env::temp_dir().join(format!("postcard_ingest_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("beach.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let mut store = AssetStore::new();
        let batch = Ingestor::new().ingest(&mut store, vec![FileBlob::from_path(&path)]);
        let report = batch.wait(&mut store);

        assert_eq!(report.decoded.len(), 1);
        let asset = &store.as_slice()[0];
        assert_eq!(asset.name, "beach.png");
        assert_eq!(asset.current_data.mime_type(), Some("image/png"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
