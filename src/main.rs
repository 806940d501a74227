fn main() {
    if let Err(err) = graduate_guidance::run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
