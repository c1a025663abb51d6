use std::process;

fn main() {
    match gauntlet::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("gauntlet: {}", err);
            process::exit(2);
        }
    }
}
