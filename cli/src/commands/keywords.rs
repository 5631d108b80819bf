use ydl_core::api::{find_keywords, keyword_template, keywords, lookup, CliError};

use super::cli::KeywordsArgs;

pub fn list(numeric_only: bool) -> String {
    let mut out = String::new();
    for kw in keywords().iter().filter(|k| !numeric_only || k.is_numeric) {
        let kind = if kw.is_numeric { "numeric" } else { "string" };
        out.push_str(&format!(
            "{:<24} {:<8} {}\n",
            keyword_template(kw.name),
            kind,
            kw.description
        ));
    }
    out
}

/// One line per keyword found in `template`; `Err` names the unknown ones.
pub fn validate(template: &str) -> Result<String, CliError> {
    let mut out = String::new();
    let mut unknown = Vec::new();

    for m in find_keywords(template) {
        match lookup(&m.name) {
            Some(kw) => {
                out.push_str(&format!("{:<20} ok  {}\n", m.name, kw.description));
            }
            None => unknown.push(m.name),
        }
    }

    if !unknown.is_empty() {
        return Err(CliError::Command(format!(
            "unknown output template keywords: {}",
            unknown.join(", ")
        )));
    }
    Ok(out)
}

pub fn run(args: KeywordsArgs) -> Result<i32, CliError> {
    match args.validate.as_deref() {
        Some(template) => print!("{}", validate(template)?),
        None => print!("{}", list(args.numeric)),
    }
    Ok(0)
}
