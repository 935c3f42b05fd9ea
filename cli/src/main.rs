fn main() {
    congestion_tax_cli::run();
}
