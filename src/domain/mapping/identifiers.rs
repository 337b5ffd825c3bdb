use std::collections::HashSet;

use crate::domain::naming::{is_identifier, is_reserved_word, to_local_name};

/// Locals already bound inside the generated constructor.
const CONSTRUCTOR_LOCALS: [&str; 5] = ["app", "id", "parameters", "props", "scope"];

/// Hands out unique constructor-local identifiers for logical names.
#[derive(Debug, Default)]
pub(crate) struct IdentifierAllocator {
    used: HashSet<String>,
}

impl IdentifierAllocator {
    pub(crate) fn allocate(&mut self, logical_name: &str) -> String {
        let mut base = to_local_name(logical_name);
        if !is_identifier(&base) {
            base = format!("resource{}", capitalise(&base));
        }
        if is_reserved_word(&base) || CONSTRUCTOR_LOCALS.contains(&base.as_str()) {
            base.push_str("Resource");
        }

        let mut candidate = base.clone();
        let mut counter = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{base}{counter}");
            counter += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

fn capitalise(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
