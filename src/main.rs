use tracing_subscriber::EnvFilter;

use tchess_ai::protocol::text_protocol::run_stdio_loop;

fn main() {
    // Protocol replies own stdout; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run_stdio_loop() {
        eprintln!("tchess_ai: {err}");
        std::process::exit(1);
    }
}
