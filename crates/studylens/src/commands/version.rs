pub fn run() -> anyhow::Result<()> {
    println!("studylens {}", env!("CARGO_PKG_VERSION"));
    println!("Field reconciliation for AI document analyses");
    Ok(())
}
