//! Invocation engine
//!
//! Resolves a request, computes the helper closure and assembles the bundle
//! from an ordered list of named text blocks. Arguments are passed to the
//! final call as serialized data and are never spliced into body text.

use super::registry::Registry;
use super::serialize::serialize_args;
use super::source::{Engine, Source, SourceRecord};
use crate::scriptlet::{HOOK_CODE, HOOK_NAME};
use crate::Result;

/// Kind of a bundle block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Helper,
    Hook,
    Body,
    Invocation,
}

/// Named text block of a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub name: &'static str,
    pub text: String,
}

/// Assembled bundle before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    name: &'static str,
    engine: Engine,
    blocks: Vec<Block>,
    record: String,
    args: String,
}

impl Bundle {
    /// Canonical name of the resolved scriptlet
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Target profile
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Blocks in emission order: helpers, hook, body, invocation
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Serialized request record
    pub fn record(&self) -> &str {
        &self.record
    }

    /// Serialized argument array
    pub fn args(&self) -> &str {
        &self.args
    }

    /// Render the final source text
    pub fn render(&self) -> String {
        let code = self
            .blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        match self.engine {
            Engine::Extension => format!(
                "(function(source, args) {{\n{}\n}})({}, {});",
                code, self.record, self.args
            ),
            Engine::Corelibs => format!("function(source, args) {{\n{}\n}}", code),
        }
    }
}

fn invocation(function_name: &str) -> String {
    format!(
        r#"var updatedArgs = args ? [].concat(source).concat(args) : [source];
try {{
    {}.apply(this, updatedArgs);
}} catch (e) {{
    if (source.verbose === true) {{
        console.log(e);
    }}
}}"#,
        function_name
    )
}

/// Generates scriptlet bundles from a [`Registry`]
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'r> {
    registry: &'r Registry,
}

impl<'r> Compiler<'r> {
    /// Create a compiler over `registry`
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Registry used for lookups
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Build the block list for `source`.
    ///
    /// The result depends only on the resolved definition, the arguments,
    /// the verbose flag and the engine.
    pub fn plan(&self, source: &Source) -> Result<Bundle> {
        let definition = self.registry.lookup(&source.name).map_err(|e| {
            tracing::warn!(
                name = %source.name,
                domain = source.domain_name.as_deref().unwrap_or(""),
                rule = source.rule_text.as_deref().unwrap_or(""),
                "Unknown scriptlet requested"
            );
            e
        })?;

        let helpers = self.registry.closure(definition)?;
        let args = serialize_args(&source.args)?;
        let record = SourceRecord::new(definition, source).to_json()?;

        let mut blocks: Vec<Block> = helpers
            .iter()
            .map(|helper| Block {
                kind: BlockKind::Helper,
                name: helper.id.as_str(),
                text: helper.code.to_string(),
            })
            .collect();
        blocks.push(Block {
            kind: BlockKind::Hook,
            name: HOOK_NAME,
            text: HOOK_CODE.to_string(),
        });
        blocks.push(Block {
            kind: BlockKind::Body,
            name: definition.function_name(),
            text: definition.body().to_string(),
        });
        blocks.push(Block {
            kind: BlockKind::Invocation,
            name: definition.function_name(),
            text: invocation(definition.function_name()),
        });

        tracing::debug!(
            scriptlet = definition.name(),
            requested = %source.name,
            helpers = helpers.len(),
            engine = %source.engine,
            domain = source.domain_name.as_deref().unwrap_or(""),
            "Generated scriptlet bundle"
        );

        Ok(Bundle {
            name: definition.name(),
            engine: source.engine,
            blocks,
            record,
            args,
        })
    }

    /// Generate the injectable source text for `source`
    pub fn generate(&self, source: &Source) -> Result<String> {
        Ok(self.plan(source)?.render())
    }
}

/// Generate a bundle against the built-in registry
pub fn invoke(source: &Source) -> Result<String> {
    Compiler::new(Registry::global()?).generate(source)
}
