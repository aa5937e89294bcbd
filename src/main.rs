//! pinmap main entrypoint.

use pinmap::run;
use pinmap::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
