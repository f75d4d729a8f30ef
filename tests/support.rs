use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const STUB_RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\n{\"ok\":true}";

/// Stub HTTP server that answers every request with 200 until dropped.
pub struct StubServer {
    stop_tx: mpsc::Sender<()>,
    accept_loop: Option<thread::JoinHandle<()>>,
}

impl Drop for StubServer {
    fn drop(&mut self) {
        let _stop_result = self.stop_tx.send(());
        if let Some(handle) = self.accept_loop.take() {
            drop(handle.join());
        }
    }
}

/// Spawn the stub server, or `None` when the sandbox forbids binding
/// sockets (the caller should skip the test).
///
/// # Errors
///
/// Returns an error if the listener cannot be configured after binding.
pub fn spawn_http_server_or_skip() -> Result<Option<(String, StubServer)>, String> {
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(_) => return Ok(None),
    };
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (stop_tx, stop_rx) = mpsc::channel();
    let accept_loop = thread::spawn(move || {
        while stop_rx.try_recv().is_err() {
            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || answer_request(stream));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok(Some((
        format!("http://{}", addr),
        StubServer {
            stop_tx,
            accept_loop: Some(accept_loop),
        },
    )))
}

fn answer_request(mut stream: TcpStream) {
    let mut request_head = [0u8; 2048];
    let responded = stream.read(&mut request_head).is_ok()
        && stream.write_all(STUB_RESPONSE).is_ok()
        && stream.flush().is_ok();
    if responded {
        drop(stream.shutdown(Shutdown::Both));
    }
}

/// Run the `loadlite` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_loadlite<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = option_env!("CARGO_BIN_EXE_loadlite")
        .ok_or_else(|| "CARGO_BIN_EXE_loadlite missing at compile time.".to_owned())?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run loadlite failed: {}", err))
}
