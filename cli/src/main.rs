//! The `webget` binary: issue one GET request and print the response.
//!
//! This is a thin wrapper around `webget-core` that handles command-line
//! parsing, logger initialization, and console output. Failures are
//! reported on stderr and the process still exits 0; a partially parsed
//! response is printed as far as it got.

use clap::Parser;

/// Download a single page over plain HTTP and print it.
#[derive(Parser, Debug)]
#[command(name = "webget", version, about)]
struct Args {
    /// Print the request and the response headers before the body.
    #[arg(short = 'd', long = "display-headers")]
    display_headers: bool,

    /// Host to contact.
    host: String,

    /// TCP port on the host.
    #[arg(default_value_t = 80)]
    port: u16,

    /// Path to request.
    #[arg(default_value = "/")]
    path: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match webget_core::fetch(&args.host, args.port, &args.path) {
        Ok(response) => {
            if args.display_headers {
                print!("{}", response.request());
                println!("{}", response.status_line());
                for (name, value) in response.headers() {
                    println!("{name}: {value}");
                }
                println!();
            }
            println!("{}", response.body());
        }
        Err(err) => eprintln!("webget: {err}"),
    }
}
