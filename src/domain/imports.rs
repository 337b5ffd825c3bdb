//! Import declarations required by one generated file.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::code_maker::CodeMaker;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ModuleImports {
    side_effect: bool,
    types: BTreeSet<String>,
    values: BTreeSet<String>,
    /// Local name → exported name.
    aliases: BTreeMap<String, String>,
}

impl ModuleImports {
    /// Value specifiers, `Name` or `Name as Local`, sorted.
    fn value_specifiers(&self) -> BTreeSet<String> {
        let mut specifiers = self.values.clone();
        specifiers.extend(self.aliases.iter().map(|(local, name)| format!("{name} as {local}")));
        specifiers
    }
}

/// Module path → symbols imported from it.
///
/// Set semantics throughout: adding a symbol twice is a no-op, and rendering
/// is sorted by module path then symbol name, so two registries holding the
/// same entries render identically regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRegistry {
    modules: BTreeMap<String, ModuleImports>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import value symbols: `import { A, B } from "module";`.
    pub fn add<I, S>(&mut self, module: &str, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.modules.entry(module.to_string()).or_default();
        entry.values.extend(symbols.into_iter().map(Into::into));
    }

    /// Import type-only symbols: `import type { A } from "module";`.
    pub fn add_types<I, S>(&mut self, module: &str, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self.modules.entry(module.to_string()).or_default();
        entry.types.extend(symbols.into_iter().map(Into::into));
    }

    /// Import `symbol` under a local name: `import { A as B } from "module";`.
    pub fn add_aliased(&mut self, module: &str, symbol: &str, local: &str) {
        let entry = self.modules.entry(module.to_string()).or_default();
        entry.aliases.insert(local.to_string(), symbol.to_string());
    }

    /// Import a module for its side effects: `import "module";`.
    pub fn add_side_effect(&mut self, module: &str) {
        self.modules.entry(module.to_string()).or_default().side_effect = true;
    }

    pub fn merge(&mut self, other: ImportRegistry) {
        for (module, imports) in other.modules {
            let entry = self.modules.entry(module).or_default();
            entry.side_effect |= imports.side_effect;
            entry.types.extend(imports.types);
            entry.values.extend(imports.values);
            entry.aliases.extend(imports.aliases);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Whether `symbol` is bound (as a value, a type or an alias) by an import from `module`.
    pub fn contains(&self, module: &str, symbol: &str) -> bool {
        self.modules.get(module).is_some_and(|m| {
            m.values.contains(symbol) || m.types.contains(symbol) || m.aliases.contains_key(symbol)
        })
    }

    /// Write one import statement per module path and kind, followed by a blank line.
    pub fn render(&self, code: &mut CodeMaker) {
        if self.modules.is_empty() {
            return;
        }
        for (module, imports) in &self.modules {
            if imports.side_effect {
                code.line(format!("import \"{module}\";"));
            }
            if !imports.types.is_empty() {
                code.line(format!("import type {{ {} }} from \"{module}\";", join(&imports.types)));
            }
            let values = imports.value_specifiers();
            if !values.is_empty() {
                code.line(format!("import {{ {} }} from \"{module}\";", join(&values)));
            }
        }
        code.blank();
    }
}

fn join(symbols: &BTreeSet<String>) -> String {
    symbols.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rendered(registry: &ImportRegistry) -> Vec<String> {
        let mut code = CodeMaker::default();
        code.open_file("imports.ts");
        registry.render(&mut code);
        code.close_file("imports.ts");
        code.into_files().remove(0).lines().to_vec()
    }

    #[test]
    fn repeated_symbols_render_once() {
        let mut registry = ImportRegistry::new();
        for _ in 0..3 {
            registry.add("@guardian/cdk/lib/constructs/core", ["GuStringParameter"]);
        }

        assert_eq!(
            rendered(&registry),
            ["import { GuStringParameter } from \"@guardian/cdk/lib/constructs/core\";", ""]
        );
    }

    #[test]
    fn renders_side_effect_then_types_then_values_per_module() {
        let mut registry = ImportRegistry::new();
        registry.add("@guardian/cdk/lib/constructs/core", ["GuStack"]);
        registry.add_types("@guardian/cdk/lib/constructs/core", ["GuStackProps"]);
        registry.add_types("@aws-cdk/core", ["App"]);
        registry.add_side_effect("source-map-support/register");

        assert_eq!(
            rendered(&registry),
            [
                "import type { App } from \"@aws-cdk/core\";",
                "import type { GuStackProps } from \"@guardian/cdk/lib/constructs/core\";",
                "import { GuStack } from \"@guardian/cdk/lib/constructs/core\";",
                "import \"source-map-support/register\";",
                "",
            ]
        );
    }

    #[test]
    fn symbols_within_a_module_are_sorted() {
        let mut registry = ImportRegistry::new();
        registry.add("@aws-cdk/core", ["Lazy", "Fn", "App"]);

        assert_eq!(rendered(&registry)[0], "import { App, Fn, Lazy } from \"@aws-cdk/core\";");
    }

    #[test]
    fn merge_unions_entries() {
        let mut left = ImportRegistry::new();
        left.add("@aws-cdk/core", ["App"]);
        let mut right = ImportRegistry::new();
        right.add("@aws-cdk/core", ["Fn"]);
        right.add_side_effect("@aws-cdk/assert/jest");

        left.merge(right);
        assert!(left.contains("@aws-cdk/core", "App"));
        assert!(left.contains("@aws-cdk/core", "Fn"));
        assert_eq!(
            rendered(&left),
            [
                "import \"@aws-cdk/assert/jest\";",
                "import { App, Fn } from \"@aws-cdk/core\";",
                "",
            ]
        );
    }

    #[test]
    fn aliased_symbols_render_with_their_local_name() {
        let mut registry = ImportRegistry::new();
        registry.add("@aws-cdk/aws-elasticloadbalancingv2", ["CfnListener"]);
        registry.add_aliased("@aws-cdk/aws-elasticloadbalancingv2", "CfnLoadBalancer", "CfnLoadBalancerV2");
        registry.add_aliased("@aws-cdk/aws-elasticloadbalancingv2", "CfnLoadBalancer", "CfnLoadBalancerV2");

        assert!(registry.contains("@aws-cdk/aws-elasticloadbalancingv2", "CfnLoadBalancerV2"));
        assert!(!registry.contains("@aws-cdk/aws-elasticloadbalancingv2", "CfnLoadBalancer"));
        assert_eq!(
            rendered(&registry),
            [
                "import { CfnListener, CfnLoadBalancer as CfnLoadBalancerV2 } from \"@aws-cdk/aws-elasticloadbalancingv2\";",
                "",
            ]
        );
    }

    #[test]
    fn empty_registry_renders_nothing() {
        assert!(rendered(&ImportRegistry::new()).is_empty());
    }

    fn entries() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[a-c]{1,2}", "[A-D][a-z]{0,3}"), 0..16)
    }

    proptest! {
        #[test]
        fn insertion_order_does_not_change_rendering(pairs in entries()) {
            let mut forward = ImportRegistry::new();
            for (module, symbol) in &pairs {
                forward.add(module, [symbol.clone()]);
            }
            let mut backward = ImportRegistry::new();
            for (module, symbol) in pairs.iter().rev() {
                backward.add(module, [symbol.clone()]);
                backward.add(module, [symbol.clone()]);
            }

            prop_assert_eq!(rendered(&forward), rendered(&backward));
        }
    }
}
