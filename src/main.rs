//! Console driver for the connection state store
//!
//! Reads one command per line from stdin and prints every state
//! transition as a JSON line. Run with: cargo run --features cli --bin connstate-cli

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use connection_state::core::{initial_state, Command, ConnectionStateStore, StateChangeListener, StateTransition};
    use std::rc::Rc;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tracing::{error, info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,connection_state=debug"));
    // Logs go to stderr so stdout stays machine-readable
    fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();

    let initial = initial_state(std::env::var("CONNSTATE_INITIAL").ok().as_deref())?;

    let store = ConnectionStateStore::new(initial);
    let printer: StateChangeListener = Rc::new(|previous, current| {
        match serde_json::to_string(&StateTransition { previous, current }) {
            Ok(line) => println!("{}", line),
            Err(e) => error!(error = %e, "Failed to serialize transition"),
        }
    });
    store.add_state_change_listener(&printer);

    info!(state = %store.state(), "Reading commands from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut commands = 0u64;
    let mut stats_interval = tokio::time::interval(std::time::Duration::from_secs(5));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        commands += 1;
                        if let Some(snapshot) = command.apply(&store) {
                            println!("{}", serde_json::to_string(&snapshot)?);
                        }
                    }
                    Err(e) => warn!(error = %e, line = %line, "Ignoring command"),
                }
            }
            _ = stats_interval.tick() => {
                info!(
                    state = %store.state(),
                    loading = store.loading_count(),
                    online = store.is_online(),
                    commands,
                    "stats"
                );
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    store.remove_state_change_listener(&printer);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
