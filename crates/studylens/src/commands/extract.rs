use studylens_text::TextField;

pub fn run(field: &str, text: Option<&str>) -> anyhow::Result<()> {
    if TextField::from_key(field).is_none() {
        let known: Vec<&str> = TextField::ALL.iter().map(TextField::key).collect();
        anyhow::bail!(
            "no text patterns for field '{}' (known: {})",
            field,
            known.join(", ")
        );
    }

    let text = super::text_or_stdin(text)?;
    println!("{}", studylens_text::extract(&text, field));
    Ok(())
}
