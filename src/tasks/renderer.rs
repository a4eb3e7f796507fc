//! Terminal display surface

use std::io::{self, Write};
use tokio::sync::watch;
use tracing::warn;

use crate::api::View;

/// Redraw the status line whenever the view changes
pub async fn render_task(mut view_rx: watch::Receiver<View>) {
    loop {
        let line = view_rx.borrow_and_update().render_line();
        let drawn = draw(&mut io::stdout().lock(), &line);
        if let Err(e) = drawn {
            warn!("Failed to draw view: {}", e);
            break;
        }
        if view_rx.changed().await.is_err() {
            // State dropped
            break;
        }
    }
    println!();
}

/// Overwrite the current terminal line with `line`
pub fn draw<W: Write>(out: &mut W, line: &str) -> io::Result<()> {
    write!(out, "\r\x1b[2K{}", line)?;
    out.flush()
}
