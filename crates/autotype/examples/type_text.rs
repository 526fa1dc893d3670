//! Types a greeting into whichever window has focus.
//!
//! Run, then click into a text field within three seconds:
//!
//! ```text
//! cargo run --example type_text
//! ```

use std::thread;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use autotype::{ActiveWindowArgs, AutoType, KeyCode, Modifier};

fn main() -> autotype::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut at = AutoType::new()?;

    if let Some(window) = at.active_window(&ActiveWindowArgs {
        get_window_title: true,
        get_browser_url: false,
    }) {
        println!("focused: {} (pid {})", window.app_name, window.pid);
        if let Some(title) = &window.title {
            println!("title:   {title}");
        }
    }

    println!("typing in 3 seconds, focus a text field...");
    thread::sleep(Duration::from_secs(3));

    // Refuse to type while the user is still holding a modifier from
    // launching the command.
    at.ensure_modifier_not_pressed()?;
    at.text("Hello from autotype! ünïcødé too", Modifier::NONE)?;
    at.key_press(None, Some(KeyCode::Enter), Modifier::NONE)?;
    Ok(())
}
