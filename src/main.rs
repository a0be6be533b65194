fn main() {
    if let Err(err) = widget_showcase_lib::run() {
        eprintln!("widget-showcase failed to start: {}", err);
        std::process::exit(1);
    }
}
