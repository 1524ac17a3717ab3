// Lists or deletes the objects in a bucket
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use crate::common::{
    ClientConfig,
    ClientMode,
    Color,
    FailedDeletion,
    HumanSize,
    ObjectRecord,
    ObjectStore,
    COLOR_RESET,
};
use std::collections::HashSet;
use std::fmt;
use std::io::{
    self,
    Write,
};
use tracing::{
    debug,
    info,
    warn,
};

/// Maximum number of keys accepted by a single DeleteObjects request.
pub const MAX_DELETE_KEYS: usize = 1000;

/// ANSI sequence that clears the current line and returns the cursor to its
/// start.
const CLEAR_LINE: &str = "\x1b[2K\r";

/// Width that formatted sizes are right aligned to.
const SIZE_WIDTH: usize = 9;

/// Totals for the objects printed by `list_objects`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ListSummary {
    /// Number of objects printed.
    pub count: u64,

    /// Sum of the sizes of the printed objects.
    pub bytes: u64,
}

/// Running totals across every page deleted so far.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DeletionTotals {
    /// Number of objects deleted.
    pub count: u64,

    /// Sum of the sizes of the deleted objects.
    pub bytes: u64,
}

impl DeletionTotals {
    /// Add the objects in `batch` to the totals, skipping any that the store
    /// reported as `failed`.
    pub fn record(&mut self, batch: &DeletionBatch<'_>, failed: &[FailedDeletion]) {
        let failed: HashSet<&str> = failed.iter()
            .map(|f| f.key.as_str())
            .collect();

        for record in batch.records {
            if failed.contains(record.key.as_str()) {
                continue;
            }

            self.count += 1;
            self.bytes += record.size;
        }
    }
}

/// Displays as the delete mode progress line.
impl fmt::Display for DeletionTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deleted {} objects / {}",
            self.count,
            self.bytes.humansize(),
        )
    }
}

/// The objects handed to one DeleteObjects request.
#[derive(Debug)]
pub struct DeletionBatch<'a> {
    records: &'a [ObjectRecord],
}

impl<'a> DeletionBatch<'a> {
    /// Returns a batch holding every object in `records`.
    pub fn new(records: &'a [ObjectRecord]) -> Self {
        Self {
            records,
        }
    }

    /// Number of objects in the batch.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns the keys to send in the DeleteObjects request.
    pub fn keys(&self) -> Vec<String> {
        self.records.iter().map(|r| r.key.clone()).collect()
    }
}

/// Returns `true` if `err` was caused by writing to a closed pipe.
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|e| e.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

/// Format the output line for `record`.
///
/// When `colorize` is set the line is wrapped in the colour for the object's
/// size and a colour reset.
pub fn format_line(
    config: &ClientConfig,
    record: &ObjectRecord,
    colorize: bool,
) -> String {
    let line = format!(
        "{:>width$} {} {} {}",
        record.size.humansize(),
        record.last_modified_string(),
        record.storage_class,
        config.display_key(&record.key),
        width = SIZE_WIDTH,
    );

    if colorize {
        format!("{}{}{}", Color::for_size(record.size), line, COLOR_RESET)
    }
    else {
        line
    }
}

/// Run in the mode selected by `config`, writing to `out`.
pub async fn run<S, W>(
    store: &S,
    config: &ClientConfig,
    out: &mut W,
    colorize: bool,
) -> Result<()>
where
    S: ObjectStore + Sync,
    W: Write,
{
    match config.mode {
        ClientMode::List => {
            // A closed pipe, eg. `s3ls ... | head`, just ends the listing.
            match list_objects(store, config, out, colorize).await {
                Err(e) if is_broken_pipe(&e) => {
                    debug!("run: Output closed, stopping listing");
                },
                ret => {
                    ret?;
                },
            }
        },
        ClientMode::Delete => {
            if !config.filter.is_empty() {
                warn!("Filters are ignored when deleting, every listed object will be deleted");
            }

            delete_objects(store, out).await?;
        },
    }

    Ok(())
}

/// Print every object in the listing that passes the configured filter.
pub async fn list_objects<S, W>(
    store: &S,
    config: &ClientConfig,
    out: &mut W,
    colorize: bool,
) -> Result<ListSummary>
where
    S: ObjectStore + Sync,
    W: Write,
{
    let mut continuation_token = None;
    let mut summary            = ListSummary::default();

    // Loop until all pages are processed.
    loop {
        let page = store.list_objects(continuation_token)
            .await
            .context("Failed to list objects")?;

        debug!("list_objects: Processing {} objects", page.objects.len());

        for record in page.objects.iter().filter(|r| config.filter.matches(r)) {
            writeln!(out, "{}", format_line(config, record, colorize))?;

            summary.count += 1;
            summary.bytes += record.size;
        }

        match page.continuation_token {
            Some(next) => continuation_token = Some(next),
            None       => break,
        }
    }

    info!(
        "Listed {} objects totalling {}",
        summary.count,
        summary.bytes.humansize(),
    );

    Ok(summary)
}

/// Delete every object in the listing, one DeleteObjects request per page
/// (or per `MAX_DELETE_KEYS` objects), printing progress after each page.
pub async fn delete_objects<S, W>(
    store: &S,
    out: &mut W,
) -> Result<DeletionTotals>
where
    S: ObjectStore + Sync,
    W: Write,
{
    let mut continuation_token = None;
    let mut totals             = DeletionTotals::default();

    loop {
        let page = store.list_objects(continuation_token)
            .await
            .context("Failed to list objects")?;

        for chunk in page.objects.chunks(MAX_DELETE_KEYS) {
            let batch = DeletionBatch::new(chunk);

            debug!("delete_objects: Deleting batch of {}", batch.len());

            let failed = store.delete_objects(batch.keys())
                .await
                .context("Failed to delete objects")?;

            for failure in &failed {
                warn!("Failed to delete '{}': {}", failure.key, failure.message);
            }

            totals.record(&batch, &failed);
        }

        write!(out, "{}{}", CLEAR_LINE, totals)?;
        out.flush()?;

        match page.continuation_token {
            Some(next) => continuation_token = Some(next),
            None       => break,
        }
    }

    writeln!(out)?;

    info!("{}", totals);

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::{
        TimeZone,
        Utc,
    };
    use crate::common::{
        parse_size,
        ObjectFilter,
        ObjectPage,
        SizeRange,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    // An in-memory store, continuation tokens are page indexes.
    #[derive(Default)]
    struct MockStore {
        pages:       Vec<Vec<ObjectRecord>>,
        locked_keys: Vec<String>,
        fail_delete: bool,
        fail_list:   bool,
        deleted:     Mutex<Vec<Vec<String>>>,
    }

    impl MockStore {
        fn new(pages: Vec<Vec<ObjectRecord>>) -> Self {
            Self {
                pages,
                ..Default::default()
            }
        }

        fn deleted(&self) -> Vec<Vec<String>> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ObjectStore for MockStore {
        async fn list_objects(
            &self,
            continuation_token: Option<String>,
        ) -> Result<ObjectPage> {
            if self.fail_list {
                return Err(anyhow!("access denied"));
            }

            let index: usize = match continuation_token {
                Some(token) => token.parse()?,
                None        => 0,
            };

            let objects = self.pages.get(index).cloned().unwrap_or_default();

            let continuation_token = if index + 1 < self.pages.len() {
                Some((index + 1).to_string())
            }
            else {
                None
            };

            Ok(ObjectPage {
                objects,
                continuation_token,
            })
        }

        async fn delete_objects(
            &self,
            keys: Vec<String>,
        ) -> Result<Vec<FailedDeletion>> {
            if self.fail_delete {
                return Err(anyhow!("service unavailable"));
            }

            let failed = keys.iter()
                .filter(|k| self.locked_keys.contains(k))
                .map(|k| {
                    FailedDeletion {
                        key:     k.clone(),
                        message: "Access Denied".into(),
                    }
                })
                .collect();

            self.deleted.lock().unwrap().push(keys);

            Ok(failed)
        }
    }

    fn record(key: &str, size: u64) -> ObjectRecord {
        ObjectRecord {
            key:           key.into(),
            size:          size,
            last_modified: Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap(),
            storage_class: "STANDARD".into(),
        }
    }

    fn config() -> ClientConfig {
        ClientConfig {
            bucket_name: "test-bucket".into(),
            ..Default::default()
        }
    }

    fn output(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_line() {
        let config = config();

        let tests = vec![
            (record("a", 100),           "    100 B 2023-04-05 06:07:08 STANDARD a"),
            (record("b", 2_000_000),     "   1.9 MB 2023-04-05 06:07:08 STANDARD b"),
            (record("c", 1_234_567_890), "   1.1 GB 2023-04-05 06:07:08 STANDARD c"),
        ];

        for test in tests {
            assert_eq!(format_line(&config, &test.0, false), test.1);
        }
    }

    #[test]
    fn test_format_line_full_path() {
        let config = ClientConfig {
            full_path: true,
            ..config()
        };

        let ret = format_line(&config, &record("dir/a", 1), false);

        assert_eq!(ret, "      1 B 2023-04-05 06:07:08 STANDARD s3://test-bucket/dir/a");
    }

    #[test]
    fn test_format_line_colorized() {
        let config = config();

        let tests = vec![
            (
                record("a", 100),
                "\x1b[38;2;255;255;255m    100 B 2023-04-05 06:07:08 STANDARD a\x1b[0m",
            ),
            (
                record("b", 2_000_000),
                "\x1b[38;2;254;253;253m   1.9 MB 2023-04-05 06:07:08 STANDARD b\x1b[0m",
            ),
            (
                record("c", 500 * 1024 * 1024),
                "\x1b[38;2;220;0;0m 500.0 MB 2023-04-05 06:07:08 STANDARD c\x1b[0m",
            ),
        ];

        for test in tests {
            assert_eq!(format_line(&config, &test.0, true), test.1);
        }
    }

    #[tokio::test]
    async fn test_list_objects_min_size() {
        let store = MockStore::new(vec![
            vec![record("a", 100), record("b", 2_000_000)],
        ]);

        let config = ClientConfig {
            filter: ObjectFilter {
                key:        String::new(),
                size_range: SizeRange {
                    min: Some(parse_size("1MB").unwrap()),
                    max: None,
                },
            },
            ..config()
        };

        let mut out = Vec::new();
        let summary = list_objects(&store, &config, &mut out, false)
            .await
            .unwrap();

        assert_eq!(
            output(out),
            "   1.9 MB 2023-04-05 06:07:08 STANDARD b\n",
        );
        assert_eq!(summary, ListSummary { count: 1, bytes: 2_000_000 });
    }

    #[tokio::test]
    async fn test_list_objects_across_pages() {
        let store = MockStore::new(vec![
            vec![record("logs/1", 1), record("data/2", 2)],
            vec![],
            vec![record("logs/3", 3)],
        ]);

        let config = ClientConfig {
            filter: ObjectFilter {
                key:        "logs".into(),
                size_range: SizeRange::default(),
            },
            ..config()
        };

        let mut out = Vec::new();
        let summary = list_objects(&store, &config, &mut out, false)
            .await
            .unwrap();

        let keys: Vec<String> = output(out)
            .lines()
            .map(|l| l.rsplit(' ').next().unwrap().to_string())
            .collect();

        assert_eq!(keys, vec!["logs/1", "logs/3"]);
        assert_eq!(summary.count, 2);
        assert!(store.deleted().is_empty());
    }

    #[tokio::test]
    async fn test_list_objects_err() {
        let store = MockStore {
            fail_list: true,
            ..Default::default()
        };

        let mut out = Vec::new();
        let ret = list_objects(&store, &config(), &mut out, false).await;

        assert!(ret.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_delete_objects() {
        let store = MockStore::new(vec![
            vec![record("a", 1), record("b", 20), record("c", 300)],
            vec![record("d", 4000), record("e", 50000)],
        ]);

        let mut out = Vec::new();
        let totals = delete_objects(&store, &mut out).await.unwrap();

        let expected_bytes: u64 = 1 + 20 + 300 + 4000 + 50000;

        assert_eq!(totals, DeletionTotals { count: 5, bytes: expected_bytes });

        let expected_output = format!(
            "{clear}Deleted 3 objects / 321 B{clear}Deleted 5 objects / {}\n",
            expected_bytes.humansize(),
            clear = CLEAR_LINE,
        );

        assert_eq!(output(out), expected_output);

        let expected_deleted = vec![
            vec!["a", "b", "c"],
            vec!["d", "e"],
        ];

        assert_eq!(store.deleted(), expected_deleted);
    }

    #[tokio::test]
    async fn test_delete_objects_splits_large_pages() {
        let page: Vec<ObjectRecord> = (0..MAX_DELETE_KEYS + 5)
            .map(|i| record(&i.to_string(), 1))
            .collect();

        let store = MockStore::new(vec![page]);

        let mut out = Vec::new();
        let totals = delete_objects(&store, &mut out).await.unwrap();

        let batch_sizes: Vec<usize> = store.deleted()
            .iter()
            .map(|b| b.len())
            .collect();

        assert_eq!(batch_sizes, vec![MAX_DELETE_KEYS, 5]);
        assert_eq!(totals.count, MAX_DELETE_KEYS as u64 + 5);
    }

    #[tokio::test]
    async fn test_delete_objects_empty_page_skips_request() {
        let store = MockStore::new(vec![vec![]]);

        let mut out = Vec::new();
        let totals = delete_objects(&store, &mut out).await.unwrap();

        assert_eq!(totals, DeletionTotals::default());
        assert!(store.deleted().is_empty());
        assert_eq!(output(out), format!("{}Deleted 0 objects / 0 B\n", CLEAR_LINE));
    }

    #[tokio::test]
    async fn test_delete_objects_excludes_failures() {
        let store = MockStore {
            pages:       vec![vec![record("a", 10), record("locked", 20)]],
            locked_keys: vec!["locked".into()],
            ..Default::default()
        };

        let mut out = Vec::new();
        let totals = delete_objects(&store, &mut out).await.unwrap();

        assert_eq!(totals, DeletionTotals { count: 1, bytes: 10 });
    }

    #[tokio::test]
    async fn test_delete_objects_err() {
        let store = MockStore {
            pages:       vec![vec![record("a", 10)]],
            fail_delete: true,
            ..Default::default()
        };

        let mut out = Vec::new();
        let ret = delete_objects(&store, &mut out).await;

        assert!(ret.is_err());
    }

    #[tokio::test]
    async fn test_run_delete_ignores_filter() {
        let store = MockStore::new(vec![
            vec![record("keep", 1), record("other", 2_000_000)],
        ]);

        let config = ClientConfig {
            mode:   ClientMode::Delete,
            filter: ObjectFilter {
                key:        "keep".into(),
                size_range: SizeRange {
                    min: Some(1024),
                    max: None,
                },
            },
            ..config()
        };

        let mut out = Vec::new();
        run(&store, &config, &mut out, true).await.unwrap();

        assert_eq!(store.deleted(), vec![vec!["keep", "other"]]);
    }

    #[tokio::test]
    async fn test_run_list() {
        let store = MockStore::new(vec![vec![record("a", 1)]]);

        let mut out = Vec::new();
        run(&store, &config(), &mut out, false).await.unwrap();

        assert_eq!(output(out), "      1 B 2023-04-05 06:07:08 STANDARD a\n");
        assert!(store.deleted().is_empty());
    }

    // Writer whose reader has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[tokio::test]
    async fn test_run_list_closed_pipe() {
        let store = MockStore::new(vec![
            vec![record("a", 1), record("b", 2)],
            vec![record("c", 3)],
        ]);

        let ret = run(&store, &config(), &mut ClosedPipe, false).await;

        assert!(ret.is_ok());
    }

    #[tokio::test]
    async fn test_run_delete_closed_pipe_is_err() {
        let store = MockStore::new(vec![vec![record("a", 1)]]);

        let config = ClientConfig {
            mode: ClientMode::Delete,
            ..config()
        };

        let ret = run(&store, &config, &mut ClosedPipe, false).await;

        assert!(ret.is_err());
    }

    #[test]
    fn test_is_broken_pipe() {
        let tests = vec![
            (io::ErrorKind::BrokenPipe,       true),
            (io::ErrorKind::PermissionDenied, false),
        ];

        for test in tests {
            let err = anyhow::Error::from(io::Error::from(test.0))
                .context("Failed to write");

            assert_eq!(is_broken_pipe(&err), test.1);
        }

        assert!(!is_broken_pipe(&anyhow!("access denied")));
    }

    #[test]
    fn test_deletion_batch() {
        let records = vec![
            record("a", 10),
            record("locked", 20),
            record("c", 30),
        ];

        let batch = DeletionBatch::new(&records);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.keys(), vec!["a", "locked", "c"]);

        let failed = vec![
            FailedDeletion {
                key:     "locked".into(),
                message: "Access Denied".into(),
            },
        ];

        let mut totals = DeletionTotals::default();
        totals.record(&batch, &failed);
        totals.record(&batch, &[]);

        assert_eq!(totals, DeletionTotals { count: 5, bytes: 100 });
    }
}
