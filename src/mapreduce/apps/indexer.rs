use crate::mapreduce::util::KeyValue;

use std::collections::BTreeSet;

// inverted index: which documents mention each word

pub fn map(filename: &str, contents: &str) -> Vec<KeyValue> {
    let unique: BTreeSet<&str> = contents
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|s| !s.is_empty())
        .collect();

    unique
        .into_iter()
        .map(|s| KeyValue::new(s.to_owned(), filename.to_owned()))
        .collect()
}

pub fn reduce(_key: &str, mut values: Vec<&str>) -> String {
    values.sort_unstable();
    format!("{} {}", values.len(), values.join(","))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::mapreduce::apps::indexer::*;
    use crate::mapreduce::util::KeyValue;

    #[test]
    fn basic_map_reduce() {
        let res_map_1 = map(
            "file1",
            "abc def8ghi  jkl!!mn0-op \nqrstuv=\r\twxyz abc abc def",
        );
        let expected_1 = vec![
            KeyValue::new("abc".to_string(), "file1".to_string()),
            KeyValue::new("def".to_string(), "file1".to_string()),
            KeyValue::new("ghi".to_string(), "file1".to_string()),
            KeyValue::new("jkl".to_string(), "file1".to_string()),
            KeyValue::new("mn".to_string(), "file1".to_string()),
            KeyValue::new("op".to_string(), "file1".to_string()),
            KeyValue::new("qrstuv".to_string(), "file1".to_string()),
            KeyValue::new("wxyz".to_string(), "file1".to_string()),
        ];
        assert_eq!(res_map_1, expected_1);

        let res_map_2 = map("file2", "abc def8!!mn0-op wxyz");

        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for kv in res_map_2.iter().chain(res_map_1.iter()) {
            grouped.entry(kv.key.as_str()).or_default().push(kv.value.as_str());
        }
        let res_red: Vec<_> = grouped
            .into_iter()
            .map(|(k, vs)| (k, reduce(k, vs)))
            .collect();
        assert_eq!(
            res_red,
            vec![
                ("abc", "2 file1,file2".to_string()),
                ("def", "2 file1,file2".to_string()),
                ("ghi", "1 file1".to_string()),
                ("jkl", "1 file1".to_string()),
                ("mn", "2 file1,file2".to_string()),
                ("op", "2 file1,file2".to_string()),
                ("qrstuv", "1 file1".to_string()),
                ("wxyz", "2 file1,file2".to_string()),
            ]
        );
    }
}
