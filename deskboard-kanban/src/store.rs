//! Board store: the single source of truth for every board.
//!
//! Boards live in memory behind an async lock and are persisted as one JSON
//! array under a single blob key. Mutations apply immediately in memory; the
//! blob write is debounced through [`DebouncedWriter`].

use crate::defaults;
use crate::error::{KanbanError, Result};
use crate::storage::{BlobStore, DebouncedWriter};
use crate::types::{Board, BoardId};
use deskboard_common::Pretty;
use deskboard_config::{
    DeskboardConfig, InsertPolicy, DEFAULT_DEBOUNCE_MS, DEFAULT_STORAGE_KEY,
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};

/// Settings the store needs from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings {
    /// Blob key holding the board array
    pub key: String,
    /// Quiescence window before a snapshot is written
    pub debounce: Duration,
    /// Placement of moved cards
    pub insert_policy: InsertPolicy,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            insert_policy: InsertPolicy::default(),
        }
    }
}

impl StoreSettings {
    pub fn from_config(config: &DeskboardConfig) -> Self {
        Self {
            key: config.storage.key.clone(),
            debounce: config.persistence.debounce(),
            insert_policy: config.moves.insert_policy,
        }
    }

    pub fn with_insert_policy(mut self, policy: InsertPolicy) -> Self {
        self.insert_policy = policy;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// All boards, persisted through a debounced blob write
pub struct BoardStore {
    boards: RwLock<Vec<Board>>,
    blob: Arc<dyn BlobStore>,
    writer: DebouncedWriter,
    settings: StoreSettings,
}

#[derive(Debug, Serialize)]
struct BoardSummary<'a> {
    id: &'a str,
    title: &'a str,
    cards: usize,
}

impl BoardStore {
    /// Create an empty store; call [`init`](Self::init) to load persisted boards
    pub fn new(blob: Arc<dyn BlobStore>, settings: StoreSettings) -> Self {
        let writer = DebouncedWriter::new(Arc::clone(&blob), settings.key.clone(), settings.debounce);
        Self {
            boards: RwLock::new(Vec::new()),
            blob,
            writer,
            settings,
        }
    }

    /// Create and load in one step
    pub async fn open(blob: Arc<dyn BlobStore>, settings: StoreSettings) -> Result<Self> {
        let store = Self::new(blob, settings);
        store.init().await?;
        Ok(store)
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn insert_policy(&self) -> InsertPolicy {
        self.settings.insert_policy
    }

    /// Load the board array from the blob store, seeding the sample board
    /// when nothing has been stored yet.
    pub async fn init(&self) -> Result<()> {
        let loaded = match self.blob.read(&self.settings.key).await? {
            Some(raw) => parse_boards(&self.settings.key, &raw)?,
            None => Vec::new(),
        };

        let mut boards = self.boards.write().await;
        *boards = loaded;

        if boards.is_empty() {
            self.seed(&mut boards)?;
        } else {
            let summary: Vec<BoardSummary<'_>> = boards
                .iter()
                .map(|b| BoardSummary {
                    id: b.id.as_str(),
                    title: &b.title,
                    cards: b.card_count(),
                })
                .collect();
            debug!(key = %self.settings.key, "Loaded boards{}", Pretty(&summary));
        }
        Ok(())
    }

    /// All boards in insertion order. Seeds the sample board when none exist.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        {
            let boards = self.boards.read().await;
            if !boards.is_empty() {
                return Ok(boards.clone());
            }
        }

        let mut boards = self.boards.write().await;
        if boards.is_empty() {
            self.seed(&mut boards)?;
        }
        Ok(boards.clone())
    }

    pub async fn get_board(&self, board_id: &BoardId) -> Result<Board> {
        self.boards
            .read()
            .await
            .iter()
            .find(|b| &b.id == board_id)
            .cloned()
            .ok_or_else(|| board_not_found(board_id))
    }

    /// Insert or replace a board by id, then schedule persistence.
    ///
    /// The board is validated first; an invalid board leaves the store
    /// untouched. Persistence failures are reported after the in-memory
    /// state has already changed.
    pub async fn save_board(&self, board: Board) -> Result<()> {
        board.validate()?;

        let mut boards = self.boards.write().await;
        match boards.iter_mut().find(|b| b.id == board.id) {
            Some(existing) => *existing = board,
            None => boards.push(board),
        }
        self.persist(&boards)
    }

    /// Create an empty board with the built-in columns
    pub async fn create_board(
        &self,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<Board> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(KanbanError::invalid_value("title", "must not be empty"));
        }

        let mut board = Board::new(title.trim()).with_columns(defaults::default_columns());
        board.description = description.filter(|d| !d.trim().is_empty());

        let mut boards = self.boards.write().await;
        boards.push(board.clone());
        info!(board = %board.id, title = %board.title, "Created board");
        self.persist(&boards)?;
        Ok(board)
    }

    /// Remove a board, returning it
    pub async fn delete_board(&self, board_id: &BoardId) -> Result<Board> {
        let mut boards = self.boards.write().await;
        let index = boards
            .iter()
            .position(|b| &b.id == board_id)
            .ok_or_else(|| board_not_found(board_id))?;
        let removed = boards.remove(index);
        info!(board = %removed.id, "Deleted board");
        self.persist(&boards)?;
        Ok(removed)
    }

    /// All-or-nothing mutation of one board.
    ///
    /// `f` runs against a copy and returns whether it changed anything. The
    /// copy replaces the stored board only when `f` succeeds and reports a
    /// change, in which case the board's `updated_at` is refreshed and a
    /// write is scheduled. Returns the resulting board and the change flag.
    ///
    /// A persistence failure after the commit is returned as
    /// [`KanbanError::Unpersisted`] carrying the committed board.
    pub async fn update_board<F>(&self, board_id: &BoardId, f: F) -> Result<(Board, bool)>
    where
        F: FnOnce(&mut Board) -> Result<bool>,
    {
        let mut boards = self.boards.write().await;
        let slot = boards
            .iter_mut()
            .find(|b| &b.id == board_id)
            .ok_or_else(|| board_not_found(board_id))?;

        let mut draft = slot.clone();
        if !f(&mut draft)? {
            trace!(board = %board_id, "Update left board unchanged");
            return Ok((slot.clone(), false));
        }

        draft.touch();
        *slot = draft.clone();
        if let Err(e) = self.persist(&boards) {
            return Err(KanbanError::Unpersisted {
                board: Box::new(draft),
                source: Box::new(e),
            });
        }
        Ok((draft, true))
    }

    /// Write any pending snapshot now
    pub async fn flush(&self) -> Result<()> {
        let pending = self.writer.has_pending();
        self.writer.flush().await?;
        if pending {
            info!(key = %self.settings.key, "Flushed pending board snapshot");
        }
        Ok(())
    }

    /// True while a snapshot is waiting for the debounce window
    pub fn has_pending_write(&self) -> bool {
        self.writer.has_pending()
    }

    fn seed(&self, boards: &mut Vec<Board>) -> Result<()> {
        let board = defaults::seed_board();
        info!(board = %board.id, title = %board.title, "Seeding default board");
        boards.push(board);
        self.persist(boards)
    }

    /// Serialize the full board array and hand it to the debounced writer
    fn persist(&self, boards: &[Board]) -> Result<()> {
        let payload = serde_json::to_string(boards)?;
        trace!(bytes = payload.len(), "Scheduling board snapshot");
        self.writer.schedule(payload);

        if let Some(err) = self.writer.take_error() {
            warn!("Earlier board snapshot was not persisted: {}", err);
            return Err(err);
        }
        Ok(())
    }
}

fn board_not_found(board_id: &BoardId) -> KanbanError {
    KanbanError::BoardNotFound {
        id: board_id.to_string(),
    }
}

/// Parse and check a stored board array
fn parse_boards(key: &str, raw: &str) -> Result<Vec<Board>> {
    let boards: Vec<Board> =
        serde_json::from_str(raw).map_err(|e| KanbanError::InvalidStructure {
            board: key.to_string(),
            message: format!("stored boards are not readable: {e}"),
        })?;

    let mut seen = HashSet::new();
    for board in &boards {
        if !seen.insert(&board.id) {
            return Err(KanbanError::invalid_structure(
                &board.id,
                "board id appears more than once",
            ));
        }
        board.validate()?;
    }
    Ok(boards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;
    use crate::types::{Card, ColumnId};

    fn settings() -> StoreSettings {
        StoreSettings::default().with_debounce(Duration::from_millis(300))
    }

    async fn setup() -> (Arc<MemoryBlobStore>, BoardStore) {
        let blob = Arc::new(MemoryBlobStore::new());
        let store = BoardStore::open(blob.clone(), settings()).await.unwrap();
        (blob, store)
    }

    #[tokio::test(start_paused = true)]
    async fn test_init_seeds_and_persists_once() {
        let (blob, store) = setup().await;

        let boards = store.list_boards().await.unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].title, defaults::SEED_BOARD_TITLE);

        tokio::time::sleep(Duration::from_millis(301)).await;
        assert_eq!(blob.write_count(), 1);

        let stored: Vec<Board> =
            serde_json::from_str(&blob.get(DEFAULT_STORAGE_KEY).await.unwrap()).unwrap();
        assert_eq!(stored, boards);
    }

    #[tokio::test]
    async fn test_init_loads_existing_boards() {
        let blob = Arc::new(MemoryBlobStore::new());
        let board = Board::new("Existing").with_columns(defaults::default_columns());
        blob.write(DEFAULT_STORAGE_KEY, &serde_json::to_string(&vec![board.clone()]).unwrap())
            .await
            .unwrap();

        let store = BoardStore::open(blob.clone(), settings()).await.unwrap();
        assert_eq!(store.list_boards().await.unwrap(), vec![board]);
        assert!(!store.has_pending_write());
    }

    #[tokio::test]
    async fn test_init_rejects_malformed_blob() {
        let blob = Arc::new(MemoryBlobStore::new());
        blob.write(DEFAULT_STORAGE_KEY, "{not json").await.unwrap();

        let result = BoardStore::open(blob, settings()).await;
        assert!(matches!(result, Err(KanbanError::InvalidStructure { .. })));
    }

    #[tokio::test]
    async fn test_init_rejects_status_mismatch() {
        let blob = Arc::new(MemoryBlobStore::new());
        let mut columns = defaults::default_columns();
        columns[1].cards.push(Card::new("Wrong", ColumnId::Done));
        let board = Board::new("Broken").with_columns(columns);
        blob.write(DEFAULT_STORAGE_KEY, &serde_json::to_string(&vec![board]).unwrap())
            .await
            .unwrap();

        let err = BoardStore::open(blob, settings()).await.err().unwrap();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidStructure);
    }

    #[tokio::test]
    async fn test_get_missing_board() {
        let (_blob, store) = setup().await;
        let result = store.get_board(&BoardId::from("nope")).await;
        assert!(matches!(result, Err(KanbanError::BoardNotFound { .. })));
    }

    #[tokio::test]
    async fn test_save_board_upserts() {
        let (_blob, store) = setup().await;

        let mut board = store.list_boards().await.unwrap().remove(0);
        board.title = "Renamed".into();
        store.save_board(board.clone()).await.unwrap();
        assert_eq!(store.get_board(&board.id).await.unwrap().title, "Renamed");

        let other = Board::new("Second").with_columns(defaults::default_columns());
        store.save_board(other.clone()).await.unwrap();
        let boards = store.list_boards().await.unwrap();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[1].id, other.id);
    }

    #[tokio::test]
    async fn test_save_board_rejects_invalid_board() {
        let (_blob, store) = setup().await;
        let mut board = store.list_boards().await.unwrap().remove(0);
        let original = board.clone();
        board.columns[0].cards.push(Card::new("Stray", ColumnId::Done));

        let result = store.save_board(board).await;
        assert!(matches!(result, Err(KanbanError::InvalidStructure { .. })));
        assert_eq!(store.get_board(&original.id).await.unwrap(), original);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_saves_coalesce() {
        let (blob, store) = setup().await;
        store.flush().await.unwrap();
        assert_eq!(blob.write_count(), 1);

        let mut board = store.list_boards().await.unwrap().remove(0);
        for i in 1..=5 {
            board.title = format!("Title {i}");
            store.save_board(board.clone()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        assert_eq!(blob.write_count(), 1);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(blob.write_count(), 2);
        let stored: Vec<Board> =
            serde_json::from_str(&blob.get(DEFAULT_STORAGE_KEY).await.unwrap()).unwrap();
        assert_eq!(stored[0].title, "Title 5");
    }

    #[tokio::test]
    async fn test_create_and_delete_board() {
        let (_blob, store) = setup().await;

        let board = store
            .create_board("  Hiring  ", Some("Open roles".into()))
            .await
            .unwrap();
        assert_eq!(board.title, "Hiring");
        assert_eq!(board.columns.len(), 5);
        assert_eq!(store.list_boards().await.unwrap().len(), 2);

        let removed = store.delete_board(&board.id).await.unwrap();
        assert_eq!(removed.id, board.id);
        assert_eq!(store.list_boards().await.unwrap().len(), 1);

        let again = store.delete_board(&board.id).await;
        assert!(matches!(again, Err(KanbanError::BoardNotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_board_requires_title() {
        let (_blob, store) = setup().await;
        let result = store.create_board("   ", None).await;
        assert!(matches!(result, Err(KanbanError::InvalidValue { .. })));
    }

    #[tokio::test]
    async fn test_list_reseeds_after_last_board_deleted() {
        let (_blob, store) = setup().await;
        let seeded = store.list_boards().await.unwrap().remove(0);
        store.delete_board(&seeded.id).await.unwrap();

        let boards = store.list_boards().await.unwrap();
        assert_eq!(boards.len(), 1);
        assert_ne!(boards[0].id, seeded.id);
    }

    #[tokio::test]
    async fn test_update_board_is_all_or_nothing() {
        let (_blob, store) = setup().await;
        let board = store.list_boards().await.unwrap().remove(0);

        let result = store
            .update_board(&board.id, |b| {
                b.title = "half-applied".into();
                Err(KanbanError::invalid_value("title", "rejected"))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(store.get_board(&board.id).await.unwrap(), board);

        let (updated, changed) = store
            .update_board(&board.id, |b| {
                b.title = "Applied".into();
                Ok(true)
            })
            .await
            .unwrap();
        assert!(changed);
        assert!(updated.updated_at > board.updated_at);
        assert_eq!(store.get_board(&board.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_unchanged_update_does_not_touch() {
        let (_blob, store) = setup().await;
        store.flush().await.unwrap();
        let board = store.list_boards().await.unwrap().remove(0);

        let (after, changed) = store.update_board(&board.id, |_| Ok(false)).await.unwrap();
        assert!(!changed);
        assert_eq!(after, board);
        assert!(!store.has_pending_write());
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_failure_surfaces_on_next_save() {
        // room for the seed but not for much more
        let seed_len = serde_json::to_string(&vec![defaults::seed_board()])
            .unwrap()
            .len();
        let blob = Arc::new(MemoryBlobStore::with_quota(
            DEFAULT_STORAGE_KEY.len() + seed_len + 512,
        ));
        let store = BoardStore::open(blob.clone(), settings()).await.unwrap();
        store.flush().await.unwrap();

        let mut board = store.list_boards().await.unwrap().remove(0);
        board.description = Some("x".repeat(4096));
        store.save_board(board.clone()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(301)).await;

        // in-memory state kept the change even though the write failed
        assert_eq!(
            store.get_board(&board.id).await.unwrap().description,
            board.description
        );

        let err = store.save_board(board).await.unwrap_err();
        assert!(err.is_persistence_failure());
        assert!(err.committed_board().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_after_failed_write_returns_committed_board() {
        let seed_len = serde_json::to_string(&vec![defaults::seed_board()])
            .unwrap()
            .len();
        let blob = Arc::new(MemoryBlobStore::with_quota(
            DEFAULT_STORAGE_KEY.len() + seed_len + 512,
        ));
        let store = BoardStore::open(blob.clone(), settings()).await.unwrap();
        store.flush().await.unwrap();

        let mut board = store.list_boards().await.unwrap().remove(0);
        board.description = Some("x".repeat(4096));
        store.save_board(board.clone()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(301)).await;

        let err = store
            .update_board(&board.id, |b| {
                b.title = "Renamed".into();
                Ok(true)
            })
            .await
            .unwrap_err();

        assert!(err.is_persistence_failure());
        let committed = err.committed_board().unwrap();
        assert_eq!(committed.title, "Renamed");
        assert_eq!(&store.get_board(&board.id).await.unwrap(), committed);
    }
}
