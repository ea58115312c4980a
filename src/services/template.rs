use chrono::Local;
use std::collections::HashMap;

/// Placeholders recognized in contract SMS templates. Each is accepted in
/// lowercase and first-letter-capitalized spelling, e.g. `[price]` and
/// `[Price]`.
const PLACEHOLDERS: &[&str] = &[
    "price",
    "customer_name",
    "product_name",
    "company_name",
    "org_number",
    "terms_link",
    "date",
    "phone",
    "email",
];

/// Substitutes recognized placeholders with supplied values.
///
/// All occurrences of a supplied placeholder are replaced. Unsupplied or
/// unrecognized placeholders are left as-is rather than blanked, so a
/// half-filled template stays visibly half-filled. `[date]` defaults to
/// the current local date when no value is given. Never fails.
pub fn render(template: &str, values: &HashMap<String, String>) -> String {
    let mut out = template.to_string();

    for key in PLACEHOLDERS {
        let value = match values.get(*key) {
            Some(v) => v.clone(),
            None if *key == "date" => Local::now().format("%d.%m.%Y").to_string(),
            None => continue,
        };

        for token in [format!("[{}]", key), format!("[{}]", capitalize(key))] {
            out = out.replace(&token, &value);
        }
    }

    out
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
