fn main() {
    if let Err(err) = chromloc::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
