pub mod extract;
pub mod fields;
pub mod highlight;
pub mod init;
pub mod resolve;
pub mod version;

use std::io::Read;

/// Use the argument when given, otherwise read all of stdin
pub(crate) fn text_or_stdin(text: Option<&str>) -> anyhow::Result<String> {
    match text {
        Some(t) => Ok(t.to_string()),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
