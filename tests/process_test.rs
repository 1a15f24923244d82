//! Process-level tests for the `coi-server` binary
//!
//! The binary always binds `0.0.0.0:8000`, so these tests take a shared
//! lock and run one at a time.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Command, Stdio};
use std::sync::Mutex;
use std::time::Duration;

static PORT_8000: Mutex<()> = Mutex::new(());

fn server_command(root: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_coi-server"));
    cmd.current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

#[cfg(unix)]
#[test]
fn test_interrupt_stops_with_exit_zero() {
    let _guard = PORT_8000.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();

    let mut child = server_command(dir.path()).spawn().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());

    let mut banner = String::new();
    while !banner.contains("Presiona Ctrl+C para detener el servidor") {
        let n = stdout.read_line(&mut banner).unwrap();
        assert!(n > 0, "server exited before printing the banner: {banner:?}");
    }
    assert!(banner.contains("Servidor iniciado en http://localhost:8000"));

    let mut stream = TcpStream::connect("127.0.0.1:8000").unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.write_all(b"GET / HTTP/1.0\r\n\r\n").unwrap();
    let mut reply = String::new();
    stream.read_to_string(&mut reply).unwrap();
    assert!(reply.starts_with("HTTP/1.0 200") || reply.starts_with("HTTP/1.1 200"));
    assert!(reply.contains("\r\nCross-Origin-Opener-Policy: same-origin\r\n"));
    assert!(reply.ends_with("<h1>hi</h1>"));

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let mut rest = String::new();
    stdout.read_to_string(&mut rest).unwrap();
    let status = child.wait().unwrap();

    assert_eq!(status.code(), Some(0));
    assert!(rest.contains("Deteniendo el servidor..."), "stdout: {rest:?}");
}

#[test]
fn test_port_in_use_exits_with_one() {
    let _guard = PORT_8000.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let dir = tempfile::tempdir().unwrap();
    let _holder = TcpListener::bind("0.0.0.0:8000").unwrap();

    let output = server_command(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error en el servidor:"), "stderr: {stderr:?}");
    assert!(stderr.contains("8000"), "stderr: {stderr:?}");
}
