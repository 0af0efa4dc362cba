//! Dependency closure resolver
//!
//! Generated text has no module system at the destination, so every helper a
//! behavior needs must appear exactly once, before anything that calls it.

use std::collections::HashMap;

use crate::scriptlet::{HelperFunction, HelperId, HelperTable, ScriptletDefinition};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Computes ordered, deduplicated helper sets over a [`HelperTable`]
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    table: &'a HelperTable,
}

impl<'a> DependencyResolver<'a> {
    /// Create a resolver over `table`
    pub fn new(table: &'a HelperTable) -> Self {
        Self { table }
    }

    /// Helpers needed by `definition`, dependencies first
    pub fn closure(&self, definition: &ScriptletDefinition) -> Result<Vec<&'a HelperFunction>> {
        self.resolve(definition.dependencies())
    }

    /// Helpers reachable from `roots`, dependencies first.
    ///
    /// Order among independent helpers follows declaration order. Fails with
    /// [`Error::CyclicDependency`] naming the cycle, or
    /// [`Error::MissingHelper`] when an identifier is not in the table.
    pub fn resolve(&self, roots: &[HelperId]) -> Result<Vec<&'a HelperFunction>> {
        let mut marks = HashMap::new();
        let mut path = Vec::new();
        let mut ordered = Vec::new();

        for id in roots {
            self.visit(*id, &mut marks, &mut path, &mut ordered)?;
        }

        Ok(ordered)
    }

    fn visit(
        &self,
        id: HelperId,
        marks: &mut HashMap<HelperId, Mark>,
        path: &mut Vec<HelperId>,
        ordered: &mut Vec<&'a HelperFunction>,
    ) -> Result<()> {
        match marks.get(&id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|p| *p == id).unwrap_or(0);
                let cycle: Vec<&str> = path[start..]
                    .iter()
                    .chain(std::iter::once(&id))
                    .map(HelperId::as_str)
                    .collect();
                return Err(Error::cyclic_dependency(cycle.join(" -> ")));
            }
            None => {}
        }

        let helper = self
            .table
            .get(id)
            .ok_or_else(|| Error::missing_helper(id.as_str()))?;

        marks.insert(id, Mark::Visiting);
        path.push(id);
        for dependency in helper.dependencies {
            self.visit(*dependency, marks, path, ordered)?;
        }
        path.pop();
        marks.insert(id, Mark::Done);
        ordered.push(helper);

        Ok(())
    }
}
