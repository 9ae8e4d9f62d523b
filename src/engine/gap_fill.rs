use super::aggregate::ProgressSummary;
use crate::catalog::ModuleCatalog;
use std::collections::HashSet;

/// Append a zero-progress row for every catalog module that has no
/// summary yet. Existing rows are never touched.
pub fn fill_blanks(
    mut summaries: Vec<ProgressSummary>,
    catalog: &ModuleCatalog,
) -> Vec<ProgressSummary> {
    let mut present: HashSet<String> = summaries.iter().map(|s| s.module_id.clone()).collect();

    for module in catalog.modules() {
        // a catalog listing the same module twice still yields one row
        if !present.insert(module.module_id.clone()) {
            continue;
        }
        summaries.push(ProgressSummary {
            module_id: module.module_id.clone(),
            module_name: module.module_name.clone(),
            checkpoints_completed: 0,
            total_checkpoints: module.total_checkpoints,
        });
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModuleCatalogEntry;

    fn catalog() -> ModuleCatalog {
        ModuleCatalog::new(vec![
            ModuleCatalogEntry {
                module_id: "M1".to_string(),
                module_name: "Intro".to_string(),
                total_checkpoints: 5,
            },
            ModuleCatalogEntry {
                module_id: "M2".to_string(),
                module_name: "Navigation".to_string(),
                total_checkpoints: 8,
            },
        ])
    }

    fn summary(id: &str, completed: i64, total: i64) -> ProgressSummary {
        ProgressSummary {
            module_id: id.to_string(),
            module_name: "observed".to_string(),
            checkpoints_completed: completed,
            total_checkpoints: total,
        }
    }

    #[test]
    fn test_fills_every_catalog_module() {
        let filled = fill_blanks(Vec::new(), &catalog());
        assert_eq!(filled.len(), 2);
        assert_eq!(filled[0].module_id, "M1");
        assert_eq!(filled[0].checkpoints_completed, 0);
        assert_eq!(filled[0].total_checkpoints, 5);
        assert_eq!(filled[1].module_name, "Navigation");
    }

    #[test]
    fn test_observed_module_keeps_its_values() {
        let filled = fill_blanks(vec![summary("M1", 3, 9)], &catalog());
        assert_eq!(filled.len(), 2);
        assert_eq!(filled[0], summary("M1", 3, 9));
        assert_eq!(filled[1].module_id, "M2");
    }

    #[test]
    fn test_modules_outside_catalog_survive() {
        let filled = fill_blanks(vec![summary("X9", 1, 2)], &catalog());
        let ids: Vec<&str> = filled.iter().map(|s| s.module_id.as_str()).collect();
        assert_eq!(ids, vec!["X9", "M1", "M2"]);
    }

    #[test]
    fn test_one_row_per_module() {
        let filled = fill_blanks(vec![summary("M2", 1, 8), summary("X9", 1, 2)], &catalog());
        let ids: HashSet<&str> = filled.iter().map(|s| s.module_id.as_str()).collect();
        assert_eq!(ids.len(), filled.len());
        assert_eq!(ids, HashSet::from(["M1", "M2", "X9"]));
    }

    #[test]
    fn test_repeated_catalog_module_filled_once() {
        let json = r#"[
            {"moduleID":"M1","moduleName":"Intro","totalCheckPoints":5},
            {"moduleID":"M1","moduleName":"Intro again","totalCheckPoints":6}
        ]"#;
        let catalog = ModuleCatalog::from_reader(json.as_bytes()).unwrap();
        let filled = fill_blanks(Vec::new(), &catalog);
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].module_name, "Intro");
        assert_eq!(filled[0].total_checkpoints, 5);

        let observed = fill_blanks(vec![summary("M1", 2, 9)], &catalog);
        assert_eq!(observed, vec![summary("M1", 2, 9)]);
    }
}
