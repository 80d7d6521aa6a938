//! `deskboard cards` - add, move, update and delete cards

use anyhow::{Context, Result};
use chrono::NaiveDate;
use deskboard_kanban::card::{AddCard, DeleteCard, GetCard, MoveCard, MoveOutcome, UpdateCard};
use deskboard_kanban::{Assignee, Card, Priority};

use crate::app::{parse_column, App};
use crate::cli::CardAction;

pub async fn run_cards(app: &App, action: CardAction) -> Result<()> {
    match action {
        CardAction::Add {
            board,
            column,
            title,
            description,
            priority,
            due,
            tags,
        } => {
            let board = app.resolve_board(&board).await?;
            let mut command = AddCard::new(board.id, parse_column(&column)?, title);
            if let Some(description) = description {
                command = command.with_description(description);
            }
            if let Some(priority) = priority {
                command = command.with_priority(parse_priority(&priority)?);
            }
            if let Some(due) = due {
                command = command.with_due_date(parse_date(&due)?);
            }
            if !tags.is_empty() {
                command = command.with_tags(tags);
            }

            let card = app.processor.process(&command).await?;
            app.emit(&card, || {
                println!("Added '{}' to {} ({})", card.title, card.status, card.id)
            })
        }

        CardAction::Move {
            board,
            card,
            to,
            from,
            index,
        } => {
            let board = app.resolve_board(&board).await?;
            let dest = parse_column(&to)?;
            let source = match from {
                Some(from) => parse_column(&from)?,
                None => {
                    app.processor
                        .process(&GetCard::new(board.id.clone(), card.as_str()))
                        .await?
                        .column
                }
            };

            let mut command = MoveCard::new(board.id, card.as_str(), source, dest);
            if let Some(index) = index {
                command = command.at_index(index);
            }

            let outcome = app.processor.process(&command).await?;
            app.emit(&outcome, || match &outcome {
                MoveOutcome::Moved(_) => println!("Moved {card} from {source} to {dest}"),
                MoveOutcome::Unchanged(_) => println!("{card} is already in place in {dest}"),
            })
        }

        CardAction::Update {
            board,
            card,
            title,
            description,
            priority,
            due,
            clear_due,
            tags,
            assignee_id,
            assignee_name,
            clear_assignee,
        } => {
            let board = app.resolve_board(&board).await?;
            let mut command = UpdateCard::new(board.id, card.as_str());
            if let Some(title) = title {
                command = command.with_title(title);
            }
            if let Some(description) = description {
                command = command.with_description(description);
            }
            if let Some(priority) = priority {
                command = command.with_priority(parse_priority(&priority)?);
            }
            if let Some(due) = due {
                command = command.with_due_date(parse_date(&due)?);
            }
            if clear_due {
                command = command.clearing_due_date();
            }
            if let Some(tags) = tags {
                command = command.with_tags(tags);
            }
            if let (Some(id), Some(name)) = (assignee_id, assignee_name) {
                command = command.with_assignee(Assignee::new(id, name));
            }
            if clear_assignee {
                command = command.clearing_assignee();
            }

            let updated = app.processor.process(&command).await?;
            app.emit(&updated, || print_card(&updated))
        }

        CardAction::Delete { board, card } => {
            let board = app.resolve_board(&board).await?;
            let removed = app
                .processor
                .process(&DeleteCard::new(board.id, card.as_str()))
                .await?;
            app.emit(&removed, || {
                println!("Deleted '{}' from {}", removed.title, removed.status)
            })
        }
    }
}

fn print_card(card: &Card) {
    println!("{} ({})", card.title, card.id);
    println!("  status:   {}", card.status);
    println!("  priority: {}", card.priority);
    if let Some(due) = card.due_date {
        println!("  due:      {due}");
    }
    if let Some(assignee) = &card.assignee {
        println!("  assignee: {} ({})", assignee.name, assignee.id);
    }
    if !card.tags.is_empty() {
        println!("  tags:     {}", card.tags.join(", "));
    }
    if let Some(description) = &card.description {
        println!("\n{description}");
    }
}

pub(crate) fn parse_priority(value: &str) -> Result<Priority> {
    Ok(value.parse::<Priority>()?)
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}' (expected YYYY-MM-DD)"))
}
