//! Minimal `curl` or `wget` to be used for container health checks.
//!
//! ```text
//! cargo run --bin http_health_check http://127.0.0.1:18312/health_check
//! ```
use std::env;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage:   cargo run --bin http_health_check <HEALTH_URL>");
        eprintln!("Example: cargo run --bin http_health_check http://127.0.0.1:18312/health_check");
        return ExitCode::FAILURE;
    }

    println!("Health check ...");

    match reqwest::get(&args[1]).await {
        Ok(response) if response.status().is_success() => {
            println!("STATUS: {}", response.status());
            ExitCode::SUCCESS
        }
        Ok(response) => {
            println!("Non-success status received: {}", response.status());
            ExitCode::FAILURE
        }
        Err(err) => {
            println!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}
