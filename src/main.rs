//! filmloc main entrypoint.

use filmloc::run;
use filmloc::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
