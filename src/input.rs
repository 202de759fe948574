use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc;
use tracing::warn;

const LINE_BUFFER: usize = 16;

// Reads on a plain thread: a read blocked in the runtime's blocking pool
// would keep the runtime from shutting down on Ctrl-C.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}
