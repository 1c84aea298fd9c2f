use linku_types::{LanguageInfo, WordDetails};
use serde_json::Value;

/// Short form: headline plus the description
pub fn compact(details: &WordDetails, language: &str) -> String {
    format!(
        "{} ({}) - {}\n\n{}",
        details.word,
        details.book,
        details.usage_category,
        details.definition(language).unwrap_or("-")
    )
}

/// Every known attribute, one labelled block each
pub fn extended(details: &WordDetails, language: &str) -> String {
    let mut out = format!(
        "{} ({}) - {}",
        details.word, details.book, details.usage_category
    );

    push_block(&mut out, "description", details.definition(language).unwrap_or("-"));
    if let Some(line) = details.etymology_line() {
        push_block(&mut out, "etymology", &line);
    }
    if let Some(ku_data) = &details.ku_data {
        push_block(&mut out, "ku data", &plain(ku_data));
    }
    if let Some(commentary) = &details.commentary {
        push_block(&mut out, "commentary", commentary);
    }
    if details.shows_see_also() {
        if let Some(see_also) = &details.see_also {
            push_block(&mut out, "see also", &plain(see_also));
        }
    }

    out
}

pub fn not_found(word: &str) -> String {
    format!("{word}\npakala! mi sona ala e nimi ni.\nUnfortunately I couldn't find a definition for this word.")
}

pub fn language_line(code: &str, info: &LanguageInfo) -> String {
    match &info.name_toki_pona {
        Some(tp) => format!("{code}\t{} (toki {tp})", info.name_endonym),
        None => format!("{code}\t{}", info.name_endonym),
    }
}

fn push_block(out: &mut String, label: &str, value: &str) {
    out.push_str("\n\n");
    out.push_str(label);
    out.push_str(":\n");
    out.push_str(value);
}

/// Strings print bare, lists comma separated, anything else as JSON
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
