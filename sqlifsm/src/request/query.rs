use std::collections::HashMap;

/// Decoded `application/x-www-form-urlencoded` pairs.
///
/// Values are grouped under their key in order of the key's first
/// appearance; repeated keys append to the same group. Blank values are
/// kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs {
    pairs: Vec<(String, Vec<String>)>,
}

impl QueryPairs {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.pairs
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.iter().find(|(key, _)| *key == name).map(|(_, values)| values)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl IntoIterator for QueryPairs {
    type Item = (String, Vec<String>);
    type IntoIter = std::vec::IntoIter<(String, Vec<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

/// Splits on `&`, skipping empty segments, and decodes each `name=value`.
/// A segment without `=` is a name with a blank value.
pub fn parse_query(query: &str) -> QueryPairs {
    let mut pairs: Vec<(String, Vec<String>)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for segment in query.split('&').filter(|segment| !segment.is_empty()) {
        let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
        let name = decode_component(name);
        let value = decode_component(value);
        match slots.get(&name) {
            Some(&slot) => pairs[slot].1.push(value),
            None => {
                slots.insert(name.clone(), pairs.len());
                pairs.push((name, vec![value]));
            }
        }
    }

    QueryPairs { pairs }
}

/// `+` to space, then percent-decoding. Invalid escapes pass through and
/// invalid UTF-8 is replaced, so decoding never fails.
pub fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
