//! rattendance main entrypoint.

use rattendance::run;
use rattendance::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(&e);
        std::process::exit(e.exit_code());
    }
}
