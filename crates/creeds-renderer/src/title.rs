//! Display title casing for document names.

/// Convert a document name to a display title.
///
/// Apostrophes are dropped, words are split on any non-alphanumeric
/// character and on lower-to-upper case boundaries, and the first letter of
/// each word is upper-cased. The rest of each word is kept as written.
///
/// # Examples
///
/// ```
/// use creeds_renderer::title_case;
///
/// assert_eq!(title_case("apostles-creed"), "Apostles Creed");
/// assert_eq!(title_case("Martin Luther's 95 theses"), "Martin Luthers 95 Theses");
/// ```
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for word in split_words(name) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(&word, &mut result);
    }
    result
}

fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() && i > 0 && is_boundary(chars[i - 1], c, chars.get(i + 1)) {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Whether a new word starts at `cur`, given the previous and next characters.
///
/// Breaks fall between lower and upper case (`westminsterConfession`),
/// between letters and digits (`westminster1646`), and before the last
/// capital of an acronym followed by lower case (`WCFChapter`).
fn is_boundary(prev: char, cur: char, next: Option<&char>) -> bool {
    if prev.is_lowercase() && cur.is_uppercase() {
        return true;
    }
    if prev.is_alphabetic() != cur.is_alphabetic() {
        return true;
    }
    prev.is_uppercase() && cur.is_uppercase() && next.is_some_and(|n| n.is_lowercase())
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}
