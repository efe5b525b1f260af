use serde_json::Value;

/// Depth-first, document-order iterator over the string leaves of a JSON
/// value, yielding each leaf with its JSON pointer.
///
/// Numbers, booleans and nulls are skipped. Nesting depth is bounded only by
/// what the parser accepted.
#[derive(Debug)]
pub struct JsonLeaves<'v> {
    stack: Vec<(String, &'v Value)>,
}

impl<'v> JsonLeaves<'v> {
    pub fn new(root: &'v Value) -> Self {
        Self {
            stack: vec![(String::new(), root)],
        }
    }
}

impl<'v> Iterator for JsonLeaves<'v> {
    type Item = (String, &'v str);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((pointer, value)) = self.stack.pop() {
            match value {
                Value::String(s) => return Some((pointer, s.as_str())),
                Value::Object(map) => {
                    // reversed so the first member is popped first
                    for (key, child) in map.iter().rev() {
                        let child_pointer = format!("{}/{}", pointer, escape_pointer_token(key));
                        self.stack.push((child_pointer, child));
                    }
                }
                Value::Array(items) => {
                    for (index, child) in items.iter().enumerate().rev() {
                        self.stack.push((format!("{pointer}/{index}"), child));
                    }
                }
                Value::Null | Value::Bool(_) | Value::Number(_) => {}
            }
        }
        None
    }
}

/// RFC 6901 escaping of one reference token.
pub fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
