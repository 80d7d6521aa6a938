//! Command handlers against a file-backed store in a temp directory

use deskboard::{dispatch, App, BoardAction, CardAction, ColumnAction, Commands};
use deskboard_config::{DeskboardConfig, StorageBackend};
use deskboard_kanban::ColumnId;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> DeskboardConfig {
    let mut config = DeskboardConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.directory = dir.path().to_path_buf();
    config
}

async fn open(dir: &TempDir) -> App {
    App::open(config_in(dir), true).await.unwrap()
}

#[tokio::test]
async fn test_add_then_move_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir).await;

    dispatch(
        &app,
        Commands::Cards {
            action: CardAction::Add {
                board: "project board".into(),
                column: "todo".into(),
                title: "Approve leave requests".into(),
                description: None,
                priority: Some("high".into()),
                due: Some("2026-11-02".into()),
                tags: vec!["hr".into()],
            },
        },
    )
    .await
    .unwrap();

    let board = app.resolve_board("Project Board").await.unwrap();
    let card = board
        .column(ColumnId::Todo)
        .unwrap()
        .cards
        .last()
        .unwrap()
        .clone();
    assert_eq!(card.title, "Approve leave requests");

    // source column is looked up when --from is omitted
    dispatch(
        &app,
        Commands::Cards {
            action: CardAction::Move {
                board: board.id.to_string(),
                card: card.id.to_string(),
                to: "review".into(),
                from: None,
                index: None,
            },
        },
    )
    .await
    .unwrap();
    app.close().await.unwrap();

    let reopened = open(&dir).await;
    let board = reopened.resolve_board(board.id.as_str()).await.unwrap();
    let review = board.column(ColumnId::Review).unwrap();
    let moved = review.cards.last().unwrap();
    assert_eq!(moved.id, card.id);
    assert_eq!(moved.status, ColumnId::Review);

    let activity = reopened.processor.activity(None);
    assert_eq!(activity[0].op, "move card");
    assert_eq!(activity[1].op, "add card");
}

#[tokio::test]
async fn test_unknown_board_and_column_are_errors() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir).await;

    let err = app.resolve_board("Nope").await.unwrap_err();
    assert!(err.to_string().contains("Nope"));

    let result = dispatch(
        &app,
        Commands::Column {
            action: ColumnAction::Edit {
                board: "Project Board".into(),
                column: "icebox".into(),
                title: Some("Ice".into()),
                color: None,
            },
        },
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_duplicate_titles_need_an_id() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir).await;

    for _ in 0..2 {
        dispatch(
            &app,
            Commands::Boards {
                action: BoardAction::Create {
                    title: "Hiring".into(),
                    description: None,
                },
            },
        )
        .await
        .unwrap();
    }

    let err = app.resolve_board("hiring").await.unwrap_err();
    assert!(err.to_string().contains("2 boards"));
}

#[tokio::test]
async fn test_column_edit_and_window() {
    let dir = TempDir::new().unwrap();
    let app = open(&dir).await;

    dispatch(
        &app,
        Commands::Column {
            action: ColumnAction::Edit {
                board: "Project Board".into(),
                column: "done".into(),
                title: Some("Shipped".into()),
                color: None,
            },
        },
    )
    .await
    .unwrap();

    let board = app.resolve_board("Project Board").await.unwrap();
    assert_eq!(board.column(ColumnId::Done).unwrap().title, "Shipped");

    dispatch(
        &app,
        Commands::Window {
            board: "Project Board".into(),
            column: "todo".into(),
            scroll: -10.0,
            viewport: 600.0,
            row_height: None,
            overscan: None,
        },
    )
    .await
    .unwrap();
}
