//! Name normalisation between template names, file names and TypeScript identifiers.

use heck::{ToKebabCase, ToLowerCamelCase, ToUpperCamelCase};

/// Words that cannot name a TypeScript local.
const RESERVED_WORDS: [&str; 46] = [
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "yield",
];

/// Free-form name → file-system-safe kebab-case name (`MyStack` → `my-stack`).
pub fn to_file_safe_name(name: &str) -> String {
    name.to_kebab_case()
}

/// Free-form name → class name (`my-stack` → `MyStack`).
pub fn to_class_name(name: &str) -> String {
    name.to_upper_camel_case()
}

/// CloudFormation property name → CDK property name (`SSEAlgorithm` → `sseAlgorithm`).
pub fn to_property_name(name: &str) -> String {
    name.to_lower_camel_case()
}

/// CloudFormation attribute name → CDK attribute member (`Endpoint.Address` → `attrEndpointAddress`).
pub fn to_attribute_member(attribute: &str) -> String {
    format!("attr{}", attribute.to_upper_camel_case())
}

/// Logical name → candidate local identifier (`MyBucket` → `myBucket`).
pub fn to_local_name(name: &str) -> String {
    name.to_lower_camel_case()
}

pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Object key as TypeScript source: bare when it is an identifier, quoted otherwise.
pub fn object_key(name: &str) -> String {
    if is_identifier(name) { name.to_string() } else { string_literal(name) }
}

/// TypeScript string literal with JSON escaping.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_safe_names_are_kebab_case() {
        assert_eq!(to_file_safe_name("MyStack"), "my-stack");
        assert_eq!(to_file_safe_name("my app"), "my-app");
    }

    #[test]
    fn class_names_are_upper_camel_case() {
        assert_eq!(to_class_name("my-stack"), "MyStack");
        assert_eq!(to_class_name("cloudformation"), "Cloudformation");
    }

    #[test]
    fn property_names_follow_cdk_casing() {
        assert_eq!(to_property_name("BucketName"), "bucketName");
        assert_eq!(to_property_name("SSEAlgorithm"), "sseAlgorithm");
        assert_eq!(to_property_name("VPCId"), "vpcId");
    }

    #[test]
    fn attribute_members() {
        assert_eq!(to_attribute_member("Arn"), "attrArn");
        assert_eq!(to_attribute_member("Endpoint.Address"), "attrEndpointAddress");
    }

    #[test]
    fn identifiers_and_keys() {
        assert!(is_identifier("myBucket"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("a-b"));
        assert_eq!(object_key("Version"), "Version");
        assert_eq!(object_key("aws:SourceArn"), "\"aws:SourceArn\"");
        assert!(is_reserved_word("default"));
        assert!(!is_reserved_word("bucket"));
    }

    #[test]
    fn string_literals_are_escaped() {
        assert_eq!(string_literal("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    }
}
