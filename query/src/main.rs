use loghouse_query::core::QueryApp;

fn main() {
    if let Err(e) = QueryApp::run() {
        eprintln!("\nError: {:#}\n", e);
        std::process::exit(1);
    }
}
