fn main() {
    cdkgen::app::cli::run();
}
