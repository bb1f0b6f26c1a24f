use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    let args = relative_balance::args::parse();
    relative_balance::cli::main(args)
}
