use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use n2k_store::{open_store, KvStore, StoreConfig};
use n2k_types::AvatarRecord;

use crate::error::{ImportError, ImportResult};
use crate::sniff::open_detected;

/// Tuning knobs for a bulk-import run.
#[derive(Clone, Debug)]
pub struct ImportOptions {
    /// Rows per batch before a commit. The bigger, the faster, but the more
    /// memory the open batch consumes.
    pub batch_block: usize,
    /// Emit a progress log line every this many rows.
    pub progress_every: usize,
    /// Grid label stamped on every imported record. Vendor exports all come
    /// from the main grid.
    pub grid: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_block: 100_000,
            progress_every: 1_000,
            grid: "Production".to_string(),
        }
    }
}

/// What a completed run did: rows read and wall-clock time taken.
///
/// Reaching end-of-input is always success; failures abort the run with an
/// [`ImportError`](crate::ImportError) instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows: u64,
    pub elapsed: Duration,
}

/// Open the configured store and load the export at `path` into it.
///
/// The store handle is held for the whole run (the one exception to the
/// open-per-operation rule) and dropped, closing it, when the run ends
/// either way.
pub fn import_path(
    config: &StoreConfig,
    path: &Path,
    opts: &ImportOptions,
) -> ImportResult<ImportSummary> {
    let store = open_store(config)?;
    let reader = open_detected(path)?;
    import_into(store.as_ref(), reader, opts)
}

/// Stream CSV rows from `reader` into `store`.
///
/// Each row `(key, avatar_name)` is serialized once and staged twice into
/// the open batch, under the name and under the key, so the dual-index
/// invariant is established atomically when the batch commits. Every
/// `batch_block` rows the batch is committed, the store gets a maintenance
/// hint, and a fresh batch is opened; the tail batch is committed at
/// end-of-input if it holds anything.
pub fn import_into(
    store: &dyn KvStore,
    reader: impl Read,
    opts: &ImportOptions,
) -> ImportResult<ImportSummary> {
    let started = Instant::now();
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: u64 = 0;
    let mut staged = 0usize;
    let mut batch = store.batch()?;

    for result in csv_reader.records() {
        let record = result?;
        if record.len() != 2 {
            return Err(ImportError::MalformedRow {
                line: record.position().map_or(0, |p| p.line()),
                fields: record.len(),
            });
        }
        // First column is the avatar key, second the avatar name.
        let (key, name) = (&record[0], &record[1]);
        let avatar = AvatarRecord::new(name, key, &opts.grid);
        match avatar.to_json() {
            Ok(json) => {
                batch.put(name.as_bytes(), &json)?;
                batch.put(key.as_bytes(), &json)?;
                staged += 1;
            }
            // Encoding-only failure, independent of the CSV structure:
            // skip the row rather than abort the run.
            Err(e) => warn!(row = rows, name, key, error = %e, "skipping unencodable record"),
        }

        rows += 1;
        if opts.progress_every > 0 && rows % opts.progress_every as u64 == 0 {
            debug!(rows, "import progress");
        }
        if opts.batch_block > 0 && rows % opts.batch_block as u64 == 0 {
            batch.commit()?;
            store.maintain()?;
            batch = store.batch()?;
            staged = 0;
        }
    }

    // Commit the partial tail, if any rows landed in it.
    if staged > 0 {
        batch.commit()?;
    }

    let elapsed = started.elapsed();
    info!(rows, ?elapsed, "import complete");
    Ok(ImportSummary { rows, elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use n2k_store::{KvBatch, StoreResult};
    use n2k_types::NULL_KEY;

    const CSV_3_ROWS: &str = "\
11111111-1111-4111-8111-111111111111,Alice
22222222-2222-4222-8222-222222222222,Bob
33333333-3333-4333-8333-333333333333,Carol
";

    /// Map-backed store that counts batch commits and maintenance hints.
    #[derive(Default, Debug)]
    struct MockStore {
        data: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
        commits: AtomicUsize,
        maintains: AtomicUsize,
    }

    impl MockStore {
        fn commits(&self) -> usize {
            self.commits.load(Ordering::SeqCst)
        }

        fn snapshot(&self) -> HashMap<Vec<u8>, Vec<u8>> {
            self.data.lock().unwrap().clone()
        }
    }

    impl KvStore for MockStore {
        fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
            Ok(self.data.lock().unwrap().get(key).cloned())
        }

        fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
            self.data.lock().unwrap().insert(key.to_vec(), value.to_vec());
            Ok(())
        }

        fn batch(&self) -> StoreResult<Box<dyn KvBatch + '_>> {
            Ok(Box::new(MockBatch {
                store: self,
                pending: Vec::new(),
            }))
        }

        fn maintain(&self) -> StoreResult<()> {
            self.maintains.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct MockBatch<'a> {
        store: &'a MockStore,
        pending: Vec<(Vec<u8>, Vec<u8>)>,
    }

    impl KvBatch for MockBatch<'_> {
        fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
            self.pending.push((key.to_vec(), value.to_vec()));
            Ok(())
        }

        fn commit(self: Box<Self>) -> StoreResult<()> {
            let mut data = self.store.data.lock().unwrap();
            for (key, value) in self.pending {
                data.insert(key, value);
            }
            self.store.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn opts(batch_block: usize) -> ImportOptions {
        ImportOptions {
            batch_block,
            ..ImportOptions::default()
        }
    }

    fn lookup(store: &MockStore, key: &str) -> AvatarRecord {
        let bytes = store.get(key.as_bytes()).unwrap().expect("record present");
        AvatarRecord::from_json(&bytes).unwrap()
    }

    // -----------------------------------------------------------------------
    // Batching behavior
    // -----------------------------------------------------------------------

    #[test]
    fn three_rows_block_two() {
        let store = MockStore::default();
        let summary = import_into(&store, CSV_3_ROWS.as_bytes(), &opts(2)).unwrap();

        assert_eq!(summary.rows, 3);
        // One commit at row 2, one tail flush at end-of-input.
        assert_eq!(store.commits(), 2);
        assert_eq!(
            lookup(&store, "Bob").key,
            "22222222-2222-4222-8222-222222222222"
        );
    }

    #[test]
    fn exact_multiple_skips_empty_tail_commit() {
        let csv = format!("{CSV_3_ROWS}44444444-4444-4444-8444-444444444444,Dave\n");
        let store = MockStore::default();
        let summary = import_into(&store, csv.as_bytes(), &opts(2)).unwrap();

        assert_eq!(summary.rows, 4);
        assert_eq!(store.commits(), 2);
    }

    #[test]
    fn maintenance_hint_follows_each_block() {
        let store = MockStore::default();
        import_into(&store, CSV_3_ROWS.as_bytes(), &opts(1)).unwrap();
        assert_eq!(store.maintains.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn single_batch_when_block_exceeds_input() {
        let store = MockStore::default();
        let summary = import_into(&store, CSV_3_ROWS.as_bytes(), &opts(100_000)).unwrap();
        assert_eq!(summary.rows, 3);
        assert_eq!(store.commits(), 1);
    }

    // -----------------------------------------------------------------------
    // Dual-index contents
    // -----------------------------------------------------------------------

    #[test]
    fn both_keys_hold_identical_payloads() {
        let store = MockStore::default();
        import_into(&store, CSV_3_ROWS.as_bytes(), &opts(2)).unwrap();

        let by_name = store.get(b"Alice").unwrap().unwrap();
        let by_key = store
            .get(b"11111111-1111-4111-8111-111111111111")
            .unwrap()
            .unwrap();
        assert_eq!(by_name, by_key);

        let record = lookup(&store, "Alice");
        assert_eq!(record.avatar_name, "Alice");
        assert_eq!(record.grid, "Production");
        assert_ne!(record.key, NULL_KEY);
    }

    #[test]
    fn grid_label_is_configurable() {
        let store = MockStore::default();
        let options = ImportOptions {
            grid: "OSGrid".to_string(),
            ..ImportOptions::default()
        };
        import_into(&store, CSV_3_ROWS.as_bytes(), &options).unwrap();
        assert_eq!(lookup(&store, "Carol").grid, "OSGrid");
    }

    // -----------------------------------------------------------------------
    // Fatal rows
    // -----------------------------------------------------------------------

    #[test]
    fn wrong_column_count_is_fatal() {
        let csv = "11111111-1111-4111-8111-111111111111,Alice,extra\n";
        let store = MockStore::default();
        let err = import_into(&store, csv.as_bytes(), &opts(2)).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MalformedRow { fields: 3, .. }
        ));
    }

    #[test]
    fn one_column_row_is_fatal_mid_stream() {
        let csv = "11111111-1111-4111-8111-111111111111,Alice\njust-a-key\n";
        let store = MockStore::default();
        let err = import_into(&store, csv.as_bytes(), &opts(100)).unwrap_err();
        assert!(matches!(err, ImportError::MalformedRow { fields: 1, line: 2 }));
        // The failing run never committed its open batch.
        assert_eq!(store.commits(), 0);
        assert!(store.get(b"Alice").unwrap().is_none());
    }

    #[test]
    fn empty_input_is_success_with_zero_rows() {
        let store = MockStore::default();
        let summary = import_into(&store, "".as_bytes(), &opts(2)).unwrap();
        assert_eq!(summary.rows, 0);
        assert_eq!(store.commits(), 0);
    }

    // -----------------------------------------------------------------------
    // Compression-agnostic end-to-end runs
    // -----------------------------------------------------------------------

    #[test]
    fn plain_gzip_and_bzip2_yield_identical_stores() {
        use bzip2::write::BzEncoder;
        use flate2::write::GzEncoder;

        let dir = tempfile::tempdir().unwrap();

        let plain_path = dir.path().join("export.csv");
        std::fs::write(&plain_path, CSV_3_ROWS).unwrap();

        let gz_path = dir.path().join("export.gz");
        let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(CSV_3_ROWS.as_bytes()).unwrap();
        std::fs::write(&gz_path, enc.finish().unwrap()).unwrap();

        let bz_path = dir.path().join("export.bz2");
        let mut enc = BzEncoder::new(Vec::new(), bzip2::Compression::default());
        enc.write_all(CSV_3_ROWS.as_bytes()).unwrap();
        std::fs::write(&bz_path, enc.finish().unwrap()).unwrap();

        let mut snapshots = Vec::new();
        for path in [&plain_path, &gz_path, &bz_path] {
            let store = MockStore::default();
            let reader = open_detected(path).unwrap();
            let summary = import_into(&store, reader, &opts(2)).unwrap();
            assert_eq!(summary.rows, 3);
            snapshots.push(store.snapshot());
        }
        assert_eq!(snapshots[0], snapshots[1]);
        assert_eq!(snapshots[1], snapshots[2]);
    }

    #[test]
    fn import_path_runs_against_a_real_backend() {
        use n2k_store::BackendKind;

        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("export.csv");
        std::fs::write(&csv_path, CSV_3_ROWS).unwrap();

        let config = StoreConfig::new(BackendKind::Sled, dir.path().join("db"));
        let summary = import_path(&config, &csv_path, &opts(2)).unwrap();
        assert_eq!(summary.rows, 3);

        // Reopen and check both directions of one row.
        let store = open_store(&config).unwrap();
        let bytes = store.get(b"Bob").unwrap().expect("name key present");
        let record = AvatarRecord::from_json(&bytes).unwrap();
        assert_eq!(record.key, "22222222-2222-4222-8222-222222222222");
        let bytes = store
            .get(record.key.as_bytes())
            .unwrap()
            .expect("avatar key present");
        assert_eq!(AvatarRecord::from_json(&bytes).unwrap().avatar_name, "Bob");
    }
}
