use anyhow::Result;

fn main() -> Result<()> {
    vocab_cli::main_entry()
}
