//! Property-based tests for rendered output

use aconfig_core::{ResolvedFlag, ResolvedTable};
use aconfig_emit::{Emitter, JavaEmitter, snake_to_camel};
use proptest::prelude::*;

fn table_strategy() -> impl Strategy<Value = ResolvedTable> {
    proptest::collection::btree_map("[a-z]{1,8}(_[a-z]{1,8}){0,3}", (any::<bool>(), any::<bool>()), 0..12)
        .prop_map(|flags| ResolvedTable {
            package: "com.example.flags".into(),
            flags: flags
                .into_iter()
                .map(|(name, (value, writable))| ResolvedFlag {
                    name,
                    value,
                    writable,
                    source: None,
                })
                .collect(),
        })
}

proptest! {
    /// Rendering the same table twice yields identical files.
    #[test]
    fn java_rendering_is_deterministic(table in table_strategy()) {
        let emitter = JavaEmitter::new();
        let first = emitter.render(&table).map_err(|e| e.to_string());
        let second = emitter.render(&table).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }

    /// Every flag gets exactly one accessor and every writable flag one key.
    #[test]
    fn every_flag_is_rendered(table in table_strategy()) {
        let Ok(files) = JavaEmitter::new().render(&table) else {
            return Ok(());
        };
        let flags = &files[0].contents;
        let keys = &files[1].contents;
        for flag in &table.flags {
            let accessor = format!("public static boolean {}() {{", snake_to_camel(&flag.name));
            prop_assert_eq!(flags.matches(&accessor).count(), 1);
            prop_assert_eq!(keys.contains(&format!("\"{}\",", flag.name)), flag.writable);
        }
    }
}
