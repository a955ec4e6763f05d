use draftmark_editor::{snapshot, EditorConfig, EditorSurface, MemoryStore};
use stress_test::stress_test_typing;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    demo_session();

    // Test 1: short sessions
    let stats = stress_test_typing(50, 200, 7);
    stats.print();

    // Test 2: long sessions
    let stats = stress_test_typing(5, 5_000, 42);
    stats.print();

    println!("\n✓ All runs completed successfully!");
}

/// Type a short document using every trigger, save it and restore it.
fn demo_session() {
    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║            DEMO SESSION                                     ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    let config = EditorConfig::default();
    let mut editor = EditorSurface::new(config.clone());
    println!("Placeholder: {}", editor.placeholder().unwrap_or_default());

    editor.type_text("# Shopping list");
    editor.press_return();
    editor.type_text("* Bread and milk");
    editor.press_return();
    editor.type_text("** Out of coffee");
    editor.press_return();
    editor.type_text("*** Pay at the counter");

    println!("\nHTML:\n{}", editor.html());

    let mut store = MemoryStore::new();
    let notice = editor.save(&mut store);
    println!("\nSave: {}", notice);

    let restored = EditorSurface::restore(config, &store);
    match snapshot::to_json(restored.content()) {
        Ok(json) => println!("\nRestored snapshot:\n{}", json),
        Err(e) => println!("\nRestored content could not be serialized: {}", e),
    }

    let notice = editor.save(&mut MemoryStore::unavailable());
    println!("\nSave without storage: {}", notice);
}
