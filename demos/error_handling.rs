//! Error handling example demonstrating the taxonomy, retry signals, and
//! verbosity-controlled rendering.
//!
//! This example shows how to:
//! - Construct classified errors and read their HTTP/RPC codes
//! - Normalize foreign errors with the passthrough classifier
//! - Use the timeout/temporary signals to drive retry decisions
//! - Raise verbosity at runtime to get causes and stacks in log output
//!
//! # Running
//!
//! ```bash
//! cargo run --example error_handling
//! ```
//!
//! # Key Methods
//!
//! - `err.code()` - HTTP status code for the response
//! - `err.grpc_status()` - RPC status for the transport layer
//! - `err.is_retryable()` - check if retry makes sense
//! - `err.server_message()` - safe client-facing message
//! - `statuserr::set_verbosity(..)` - operator-controlled log detail

use statuserr::{passthrough, set_verbosity, Error, Verbosity};

/// Demonstrates constructing each flavor of classified error
fn demonstrate_error_kinds() {
    println!("=== Error Kinds and Signals ===\n");

    // Client mistakes carry their detail to the client
    let not_found = Error::not_found("no profile for user 'u-17'");
    print_error_info("NotFound", &not_found);

    // Server-side failures expose only a generic message
    let internal = Error::internal("join on shard 7 returned no rows");
    print_error_info("Internal", &internal);

    // Retryable conditions
    let unavailable = Error::unavailable("connection pool drained");
    print_error_info("Unavailable", &unavailable);

    let exhausted = Error::resource_exhausted("burst quota spent");
    print_error_info("ResourceExhausted", &exhausted);
}

/// Print detailed information about an error
fn print_error_info(name: &str, err: &Error) {
    println!("{name}:");
    println!("  Display: {err}");
    println!("  HTTP: {}", err.code());
    println!("  RPC: {:?}", err.grpc_status().code());
    println!("  Client sees: {}", err.server_message());
    println!("  Retryable: {}\n", err.is_retryable());
}

/// Demonstrates normalizing foreign errors at a service boundary
fn demonstrate_passthrough() {
    println!("=== Passthrough Classification ===\n");

    let timed_out = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
    let err = passthrough("calling payment service", timed_out);
    println!("io timeout      -> {} (retryable: {})", err.kind(), err.is_retryable());

    let status = tonic::Status::new(tonic::Code::Unavailable, "lameduck");
    let err = passthrough("calling inventory service", status);
    println!("rpc unavailable -> {} (retryable: {})", err.kind(), err.is_retryable());

    let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = passthrough("calling audit service", refused);
    println!("plain failure   -> {} (retryable: {})\n", err.kind(), err.is_retryable());
}

/// Demonstrates verbosity-controlled rendering of one error instance
fn demonstrate_verbosity() {
    println!("=== Verbosity Levels ===\n");

    let err = Error::unavailable("pool exhausted")
        .with_cause(std::io::Error::other("conn refused by 10.0.0.7"));

    for level in [Verbosity::Info, Verbosity::Verbose, Verbosity::Debug] {
        set_verbosity(level);
        println!("--- {level} ---");
        println!("{err}\n");
    }

    set_verbosity(Verbosity::Info);
}

fn main() {
    demonstrate_error_kinds();
    demonstrate_passthrough();
    demonstrate_verbosity();
}
