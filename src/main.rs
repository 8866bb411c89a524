fn main() -> anyhow::Result<()> {
    bidirouter::cli::run_cli()
}
