fn main() {
    if let Err(err) = devsignal::run() {
        eprintln!("{}", devsignal::format_error(&err));
        std::process::exit(1);
    }
}
