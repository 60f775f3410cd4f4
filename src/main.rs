fn main() {
    if std::env::args().any(|arg| arg == "--headless") {
        noir_city::game::run_headless();
    } else {
        noir_city::game::run();
    }
}
