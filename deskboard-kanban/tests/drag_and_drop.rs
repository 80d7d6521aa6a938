//! End-to-end drag and drop against a file-backed store

use deskboard_kanban::{
    defaults::default_columns,
    drag::{DragController, DropOutcome, RecordingRenderer},
    Board, BoardId, BoardStore, Card, CardId, ColumnId, FileBlobStore, OperationOutcome,
    OperationProcessor, StoreSettings,
};
use std::sync::Arc;
use tempfile::TempDir;

async fn setup() -> (TempDir, Arc<OperationProcessor>, Board) {
    let temp = TempDir::new().unwrap();
    let blob = Arc::new(FileBlobStore::new(temp.path().join(".deskboard")));
    let store = BoardStore::open(blob, StoreSettings::default()).await.unwrap();

    let mut columns = default_columns();
    columns[1]
        .cards
        .push(Card::new("Card A", ColumnId::Todo).with_id("card-a"));
    let board = Board::new("Team").with_id("team").with_columns(columns);
    store.save_board(board.clone()).await.unwrap();

    (temp, Arc::new(OperationProcessor::new(Arc::new(store))), board)
}

#[test_log::test(tokio::test)]
async fn test_drag_todo_to_done_persists() {
    let (temp, processor, board) = setup().await;
    let renderer = Arc::new(RecordingRenderer::new());
    let mut controller = DragController::with_renderer(processor.clone(), renderer.clone());

    assert!(controller.on_drag_start(&board, &CardId::from("card-a"), ColumnId::Todo));
    assert!(controller.on_drag_over(ColumnId::InProgress));
    assert!(controller.on_drag_over(ColumnId::Done));
    let outcome = controller.on_drop(ColumnId::Done, None).await;
    assert!(outcome.is_moved());

    let moved = outcome.board().unwrap();
    assert!(moved.column(ColumnId::Todo).unwrap().is_empty());
    let done = &moved.column(ColumnId::Done).unwrap().cards;
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id.as_str(), "card-a");
    assert_eq!(done[0].status, ColumnId::Done);

    assert!(!controller.is_dragging());
    assert!(renderer.highlighted().is_empty());

    // the move reaches disk after a flush, and a fresh store reads it back
    processor.store().flush().await.unwrap();
    let reopened = BoardStore::open(
        Arc::new(FileBlobStore::new(temp.path().join(".deskboard"))),
        StoreSettings::default(),
    )
    .await
    .unwrap();
    assert_eq!(&reopened.get_board(&BoardId::from("team")).await.unwrap(), moved);

    let activity = processor.activity(None);
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].op, "move card");
    assert_eq!(activity[0].outcome, OperationOutcome::Applied);
}

#[tokio::test]
async fn test_cancelled_drag_changes_nothing() {
    let (_temp, processor, board) = setup().await;
    let mut controller = DragController::new(processor.clone());

    controller.on_drag_start(&board, &CardId::from("card-a"), ColumnId::Todo);
    controller.on_drag_over(ColumnId::Review);
    assert!(controller.on_drag_end());
    // the pointer-up that ended the drag is not a click
    assert!(!controller.on_card_click());

    assert_eq!(
        processor.store().get_board(&board.id).await.unwrap(),
        board
    );
    assert!(processor.activity(None).is_empty());
}

#[tokio::test]
async fn test_drop_on_own_column_is_a_no_op() {
    let (_temp, processor, board) = setup().await;
    let mut controller = DragController::new(processor.clone());

    controller.on_drag_start(&board, &CardId::from("card-a"), ColumnId::Todo);
    let outcome = controller.on_drop(ColumnId::Todo, Some(0)).await;

    assert!(matches!(outcome, DropOutcome::Unchanged(_)));
    assert!(!outcome.is_moved());
    assert_eq!(
        processor.store().get_board(&board.id).await.unwrap().updated_at,
        board.updated_at
    );
    assert_eq!(processor.activity(None)[0].outcome, OperationOutcome::Unchanged);
}

#[tokio::test]
async fn test_drop_of_vanished_card_fails_cleanly() {
    let (_temp, processor, board) = setup().await;
    let mut controller = DragController::new(processor.clone());

    assert!(controller.on_drag_start(&board, &CardId::from("card-a"), ColumnId::Todo));

    // someone else deletes the card mid-drag
    processor
        .process(&deskboard_kanban::card::DeleteCard::new("team", "card-a"))
        .await
        .unwrap();
    let before = processor.store().get_board(&board.id).await.unwrap();

    let outcome = controller.on_drop(ColumnId::Done, None).await;
    assert!(matches!(outcome, DropOutcome::Failed(ref e) if e.is_not_found()));
    assert!(!controller.is_dragging());
    assert_eq!(processor.store().get_board(&board.id).await.unwrap(), before);
}
