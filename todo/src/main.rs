//! Scripted CLI demo for the to-do list core.
//!
//! Walks through the full intent vocabulary against a file-backed
//! store, so state survives across runs: run it twice and the first
//! run's surviving items load back in.

use std::sync::Arc;

use todolist::{bootstrap, visible_items, Filter, ToDoAction, ToDoEnvironment, ToDoId};
use todolist_core::environment::RandomIdGenerator;
use todolist_storage::kv::FileStorage;
use tracing_subscriber::EnvFilter;

fn print_items(label: &str, items: &[&todolist::ToDoItem]) {
    println!("{label}");
    if items.is_empty() {
        println!("  (nothing)");
    }
    for item in items {
        let status = if item.done { "x" } else { " " };
        println!("  [{}] {}", status, item.text);
    }
}

fn data_dir() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("todolist")
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Todolist Demo ===\n");

    let env = ToDoEnvironment::new(Arc::new(RandomIdGenerator));
    let store = bootstrap(FileStorage::new(data_dir()), env);

    let loaded = store.state(|s| visible_items(s).into_iter().cloned().collect::<Vec<_>>()).await;
    let loaded_refs: Vec<_> = loaded.iter().collect();
    print_items("Loaded from last run:", &loaded_refs);

    // The dispatcher trims input before constructing the intent
    for raw in ["buy milk", "  write report  ", "water plants"] {
        store
            .send(ToDoAction::AddToDo {
                text: raw.trim().to_string(),
            })
            .await;
    }

    let snapshot = store.state(Clone::clone).await;
    let all: Vec<_> = visible_items(&snapshot);
    print_items("\nAfter adding three items:", &all);

    // Toggle the first undone item
    let target: Option<ToDoId> = snapshot
        .to_do_items
        .values()
        .find(|item| !item.done)
        .map(|item| item.id.clone());

    if let Some(id) = target {
        store.send(ToDoAction::ToggleToDo { id: id.clone() }).await;
        println!("\nToggled one item done.");

        store
            .send(ToDoAction::UpdateToDoText {
                id,
                text: "buy oat milk".to_string(),
            })
            .await;
    }

    store
        .send(ToDoAction::SetFilter {
            filter: Filter::Done,
        })
        .await;
    let snapshot = store.state(Clone::clone).await;
    print_items("\nVisible under 'done':", &visible_items(&snapshot));

    store
        .send(ToDoAction::SetFilter {
            filter: Filter::Undone,
        })
        .await;
    let snapshot = store.state(Clone::clone).await;
    print_items("\nVisible under 'undone':", &visible_items(&snapshot));

    // Remove everything that is done, back to an undone-only list
    for id in snapshot
        .to_do_items
        .values()
        .filter(|item| item.done)
        .map(|item| item.id.clone())
        .collect::<Vec<_>>()
    {
        store.send(ToDoAction::RemoveToDo { id }).await;
    }

    store
        .send(ToDoAction::SetFilter {
            filter: Filter::All,
        })
        .await;
    let snapshot = store.state(Clone::clone).await;
    print_items("\nPersisted for next run:", &visible_items(&snapshot));

    println!("\n=== Demo Complete ===");
}
