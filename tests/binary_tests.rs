//! Tests that run the built `ec2-greeter` binary as a child process.
//!
//! Run with: cargo test --test binary_tests

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Output, Stdio};
use std::time::Duration;

const BINARY: &str = env!("CARGO_BIN_EXE_ec2-greeter");

/// Command for the binary with a clean logging environment.
fn greeter() -> Command {
    let mut command = Command::new(BINARY);
    command
        .env_remove("PORT")
        .env_remove("LOG_FORMAT")
        .env("RUST_LOG", "ec2_greeter=warn")
        .stdin(Stdio::null());
    command
}

fn run_to_exit(command: &mut Command) -> Output {
    command.output().expect("Failed to run ec2-greeter")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Reserve a free port by binding and releasing it.
fn free_port() -> u16 {
    TcpListener::bind("0.0.0.0:0")
        .and_then(|listener| listener.local_addr())
        .expect("Failed to reserve a port")
        .port()
}

/// Kills the child on drop so a failing assertion never leaks a server.
struct RunningServer {
    process: Child,
    port: u16,
}

impl RunningServer {
    fn start(port: u16) -> Self {
        let process = greeter()
            .env("PORT", port.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .expect("Failed to start ec2-greeter");

        let server = Self { process, port };
        server.wait_for_ready();
        server
    }

    /// Wait until a full request round-trips, so the serve loop (and its
    /// signal handlers) is running, not just the bound socket.
    fn wait_for_ready(&self) {
        let max_attempts = 100;
        let delay = Duration::from_millis(100);

        for _ in 0..max_attempts {
            if self.health_answers() {
                return;
            }
            std::thread::sleep(delay);
        }

        panic!("ec2-greeter did not answer on port {} within 10 seconds", self.port);
    }

    fn health_answers(&self) -> bool {
        let Ok(mut stream) = TcpStream::connect(("127.0.0.1", self.port)) else {
            return false;
        };
        let request = "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n";
        let mut response = String::new();
        stream.write_all(request.as_bytes()).is_ok()
            && stream.read_to_string(&mut response).is_ok()
            && response.starts_with("HTTP/1.1 200")
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

mod startup_failures {
    use super::*;

    #[test]
    fn malformed_port_exits_with_readable_error() {
        let output = run_to_exit(greeter().env("PORT", "eighty"));

        assert!(!output.status.success());
        assert_eq!(output.status.code(), Some(1));
        let stderr = stderr(&output);
        assert!(
            stderr.contains(r#"Invalid PORT value "eighty": invalid digit found in string"#),
            "stderr was: {stderr}"
        );
        assert!(!stderr.contains("InvalidPort {"), "Debug output leaked: {stderr}");
    }

    #[test]
    fn unknown_log_format_exits_with_readable_error() {
        let output = run_to_exit(greeter().env("LOG_FORMAT", "xml"));

        assert_eq!(output.status.code(), Some(1));
        let stderr = stderr(&output);
        assert!(
            stderr.contains(r#"Invalid LOG_FORMAT value "xml""#),
            "stderr was: {stderr}"
        );
    }

    #[test]
    fn occupied_port_exits_with_bind_error() {
        let held = TcpListener::bind("0.0.0.0:0").unwrap();
        let port = held.local_addr().unwrap().port();

        let output = run_to_exit(greeter().env("PORT", port.to_string()));

        assert_eq!(output.status.code(), Some(1));
        let stderr = stderr(&output);
        assert!(
            stderr.contains(&format!("Failed to bind 0.0.0.0:{port}")),
            "stderr was: {stderr}"
        );
    }
}

mod serving {
    use super::*;

    #[tokio::test]
    async fn serves_both_routes_on_the_port_from_env() {
        let server = RunningServer::start(free_port());

        let response = reqwest::get(server.url("/")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.text().await.unwrap(),
            "Hello from Containerized Flask App on EC2!"
        );

        let response = reqwest::get(server.url("/health")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "OK");
    }

    #[cfg(unix)]
    #[test]
    fn sigterm_shuts_down_cleanly() {
        let mut server = RunningServer::start(free_port());

        let status = Command::new("kill")
            .args(["-TERM", &server.process.id().to_string()])
            .status()
            .expect("Failed to run kill");
        assert!(status.success());

        let exit = server.process.wait().expect("Failed to wait for ec2-greeter");
        assert!(exit.success(), "exited with {exit}");
        assert!(TcpStream::connect(("127.0.0.1", server.port)).is_err());
    }
}
