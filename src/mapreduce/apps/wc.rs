use crate::mapreduce::util::KeyValue;

// word count: a word is a maximal run of ASCII letters

pub fn map(_filename: &str, contents: &str) -> Vec<KeyValue> {
    contents
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(|word| KeyValue::new(word.to_owned(), "1".to_owned()))
        .collect()
}

pub fn reduce(_key: &str, values: Vec<&str>) -> String {
    values.len().to_string()
}
