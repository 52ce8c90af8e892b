use super::expr::pat::IdPat;
use super::node::Node;
use super::stmt::decl::PatDecl;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub enum ModuleExportImportName {
  Ident(String),
  Str(String),
}

impl ModuleExportImportName {
  pub fn as_str(&self) -> &str {
    match self {
      ModuleExportImportName::Ident(name) | ModuleExportImportName::Str(name) => name,
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportName {
  #[drive(skip)]
  pub exportable: ModuleExportImportName,
  // Always set, even when no explicit alias is provided; an implicit alias
  // would otherwise hide the implicit IdPat usage.
  pub alias: Node<IdPat>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ExportNames {
  // `export * from "module"`
  // `export * as name from "module"`
  All(Option<Node<IdPat>>),
  // `export {a as default, b as c, d}`
  // `default` is still a name, so we don't use an enum.
  Specific(Vec<Node<ExportName>>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportName {
  #[drive(skip)]
  pub importable: ModuleExportImportName,
  // Always set, even when no explicit alias is provided. PatDecl always
  // contains an IdPat.
  pub alias: Node<PatDecl>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ImportNames {
  // `import * as name`; PatDecl always contains an IdPat.
  All(Node<PatDecl>),
  // `import {a as b, c, default as e}`
  Specific(Vec<Node<ImportName>>),
}
