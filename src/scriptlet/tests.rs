//! Catalogue consistency tests

#[cfg(test)]
mod tests {
    use super::super::*;
    use std::collections::HashSet;

    #[test]
    fn test_helper_code_declares_its_id() {
        for helper in BUILTIN_HELPERS {
            let declaration = format!("function {}(", helper.id);
            assert!(
                helper.code.starts_with(&declaration),
                "helper {} must declare a function of the same name",
                helper.id
            );
        }
    }

    #[test]
    fn test_body_declares_function_name() {
        for definition in BUILTIN {
            let declaration = format!("function {}(source", definition.function_name());
            assert!(
                definition.body().starts_with(&declaration),
                "{} body must declare {}",
                definition.name(),
                definition.function_name()
            );
        }
    }

    #[test]
    fn test_builtin_names_are_disjoint() {
        let mut seen = HashSet::new();
        for definition in BUILTIN {
            for name in definition.names() {
                assert!(seen.insert(name), "name registered twice: {}", name);
            }
        }
    }

    #[test]
    fn test_declared_dependencies_exist() {
        let table = HelperTable::builtin();
        assert_eq!(table.len(), BUILTIN_HELPERS.len());

        for definition in BUILTIN {
            for id in definition.dependencies() {
                assert!(table.contains(*id), "{} depends on unknown {}", definition.name(), id);
            }
        }
    }

    #[test]
    fn test_hook_is_not_a_helper() {
        let table = HelperTable::builtin();
        assert!(!table.contains(HelperId::new(HOOK_NAME)));
        assert!(HOOK_CODE.starts_with("function hit(source, message)"));
    }

    #[test]
    fn test_hook_uses_runtime_channel_names() {
        assert!(HOOK_CODE.contains(crate::runtime::hook::DEBUG_CHANNEL));
        assert!(HOOK_CODE.contains(crate::runtime::hook::HOST_CHANNEL));
    }

    #[test]
    fn test_bodies_report_through_hook() {
        for definition in BUILTIN {
            assert!(
                definition.body().contains("hit(source"),
                "{} never reports",
                definition.name()
            );
        }
    }

    #[test]
    fn test_helper_table_iterates_in_id_order() {
        let table = HelperTable::builtin();
        let ids: Vec<_> = table.iter().map(|helper| helper.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_native_models() {
        let with_native: Vec<_> = BUILTIN
            .iter()
            .filter(|definition| definition.native().is_some())
            .map(|definition| definition.name())
            .collect();

        assert!(with_native.contains(&"set-constant"));
        assert!(with_native.contains(&"noeval"));
        assert!(with_native.contains(&"prevent-addEventListener"));
        assert!(!with_native.contains(&"disable-newtab-links"));
    }
}
