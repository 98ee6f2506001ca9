fn main() -> Result<(), Box<dyn std::error::Error>> {
    squonk::runtime::run()
}
