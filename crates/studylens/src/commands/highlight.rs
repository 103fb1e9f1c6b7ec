use studylens_io::{load_config, Paths};
use studylens_text::find_amounts;

pub fn run(text: Option<&str>, amounts: bool) -> anyhow::Result<()> {
    let text = super::text_or_stdin(text)?;

    if amounts {
        for amount in find_amounts(&text) {
            println!("{amount}");
        }
        return Ok(());
    }

    let config = load_config(&Paths::new()?)?;
    let highlighted = config.highlighter().highlight(&text);
    if highlighted.ends_with('\n') {
        print!("{highlighted}");
    } else {
        println!("{highlighted}");
    }
    Ok(())
}
