use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use sigcheck_parser::{TypeDecl, declare_types};
use sigcheck_types::TypeInterner;
use std::path::Path;

/// Named type declarations: `{"types": [{"name", "underlying", "methods"}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypesFile {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// Whether a batch case should validate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    #[default]
    Pass,
    Fail,
}

impl Expectation {
    pub fn is_met_by(self, compatible: bool) -> bool {
        match self {
            Expectation::Pass => compatible,
            Expectation::Fail => !compatible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCase {
    pub name: String,
    pub declared: String,
    pub substitute: String,
    #[serde(default)]
    pub expect: Expectation,
}

/// A batch file. It may carry its own declarations, which are added to any
/// given with `--types`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    pub cases: Vec<BatchCase>,
}

pub fn parse_types(source: &str) -> Result<TypesFile> {
    serde_json::from_str(source).context("failed to parse type declarations JSON")
}

pub fn load_types(path: &Path) -> Result<TypesFile> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read type declarations: {}", path.display()))?;
    parse_types(&source)
        .with_context(|| format!("failed to load type declarations: {}", path.display()))
}

pub fn parse_batch(source: &str) -> Result<BatchFile> {
    let batch: BatchFile = serde_json::from_str(source).context("failed to parse batch JSON")?;

    let mut names = std::collections::HashSet::new();
    for case in &batch.cases {
        if !names.insert(case.name.as_str()) {
            bail!("duplicate batch case name: {}", case.name);
        }
    }
    Ok(batch)
}

pub fn load_batch(path: &Path) -> Result<BatchFile> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read batch file: {}", path.display()))?;
    parse_batch(&source).with_context(|| format!("failed to load batch file: {}", path.display()))
}

/// Build an interner holding the predeclared types plus `decls`.
pub fn build_interner(decls: &[TypeDecl]) -> Result<TypeInterner> {
    let db = TypeInterner::new();
    declare_types(&db, decls).context("invalid type declarations")?;
    Ok(db)
}
