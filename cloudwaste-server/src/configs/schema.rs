use crate::models::{BinTable, CollectionTable, ReportTable, SensorDataTable, Table, TruckTable};

pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(mut tables: Vec<Box<dyn Table>>) -> Self {
        Self::sort_tables(&mut tables);
        Self { tables }
    }

    /// Orders tables so each one follows every table it references.
    fn sort_tables(tables: &mut Vec<Box<dyn Table>>) {
        let mut to_sort = std::mem::take(tables);
        let mut deps_list: Vec<_> = to_sort.iter().map(|t| t.dependencies()).collect();
        let mut sorted = Vec::with_capacity(to_sort.len());

        while !to_sort.is_empty() {
            let independent_indices: Vec<usize> = deps_list
                .iter()
                .enumerate()
                .filter(|(_, deps)| deps.is_empty())
                .map(|(i, _)| i)
                .collect();

            assert!(
                !independent_indices.is_empty(),
                "Circular dependency detected or unresolved dependencies exist."
            );

            let mut batch = Vec::with_capacity(independent_indices.len());
            for &index in independent_indices.iter().rev() {
                batch.push(to_sort.swap_remove(index));
                let _ = deps_list.swap_remove(index);
            }
            batch.reverse();
            sorted.extend(batch);

            for deps in deps_list.iter_mut() {
                deps.retain(|dep_name| !sorted.iter().any(|resolved| resolved.name() == *dep_name));
            }
        }

        *tables = sorted;
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![
            Box::new(BinTable),
            Box::new(TruckTable),
            Box::new(SensorDataTable),
            Box::new(CollectionTable),
            Box::new(ReportTable),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTable {
        name: &'static str,
        dependencies: Vec<&'static str>,
    }

    impl MockTable {
        fn boxed(name: &'static str, dependencies: Vec<&'static str>) -> Box<dyn Table> {
            Box::new(Self { name, dependencies })
        }
    }

    impl Table for MockTable {
        fn name(&self) -> &'static str {
            self.name
        }

        fn create(&self) -> String {
            format!("CREATE TABLE {};", self.name)
        }

        fn dispose(&self) -> String {
            format!("DROP TABLE {};", self.name)
        }

        fn dependencies(&self) -> Vec<&'static str> {
            self.dependencies.clone()
        }
    }

    fn position(statements: &[String], table: &str) -> usize {
        statements
            .iter()
            .position(|s| s == &format!("CREATE TABLE {table};"))
            .unwrap()
    }

    #[test]
    fn test_correct_creation_order() {
        let manager = SchemaManager::new(vec![
            MockTable::boxed("collections", vec!["bins"]),
            MockTable::boxed("sensor_data", vec!["bins"]),
            MockTable::boxed("reports", vec![]),
            MockTable::boxed("bins", vec![]),
        ]);
        let statements = manager.create_schema();

        assert_eq!(statements.len(), 4);
        assert!(position(&statements, "bins") < position(&statements, "collections"));
        assert!(position(&statements, "bins") < position(&statements, "sensor_data"));
    }

    #[test]
    fn test_dispose_order_is_reverse_of_creation() {
        let manager = SchemaManager::new(vec![
            MockTable::boxed("collections", vec!["bins"]),
            MockTable::boxed("bins", vec![]),
        ]);

        assert_eq!(
            manager.dispose_schema(),
            vec!["DROP TABLE collections;", "DROP TABLE bins;"]
        );
    }

    #[test]
    #[should_panic(expected = "Circular dependency")]
    fn test_circular_dependency_panics() {
        SchemaManager::new(vec![
            MockTable::boxed("a", vec!["b"]),
            MockTable::boxed("b", vec!["a"]),
        ]);
    }
}
