use crate::compat::CompatMode;
use crate::error::ScopeResult;
use crate::mangle::MangleOptions;
use crate::symbol::ScopeType;
use crate::symbol::SymbolTable;
use crate::visitor::ScopeBuilder;
use std::str::FromStr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stx::TopLevel;

pub mod base54;
pub mod compat;
pub mod error;
pub mod expand;
pub mod mangle;
pub mod rename;
pub mod resolve;
pub mod symbol;
pub mod visitor;

/// How the top level of the unit is interpreted, which decides the scoping
/// rules for its outermost bindings and whether module syntax is legal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TopLevelMode {
  Global,
  Module,
}

impl FromStr for TopLevelMode {
  type Err = String;

  fn from_str(s: &str) -> Result<TopLevelMode, String> {
    match s {
      "global" => Ok(TopLevelMode::Global),
      "module" => Ok(TopLevelMode::Module),
      _ => Err(format!("unknown top-level mode: {s}")),
    }
  }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveOptions {
  pub compat: CompatMode,
}

/// Builds the scope tree, declares every binding, resolves every reference,
/// and annotates the tree's identifier nodes. Must run before mangling or
/// expansion.
pub fn compute_symbols(top: &mut Node<TopLevel>, mode: TopLevelMode) -> ScopeResult<SymbolTable> {
  compute_symbols_with_options(top, mode, &ResolveOptions::default())
}

pub fn compute_symbols_with_options(
  top: &mut Node<TopLevel>,
  mode: TopLevelMode,
  opts: &ResolveOptions,
) -> ScopeResult<SymbolTable> {
  let top_typ = match mode {
    TopLevelMode::Global => ScopeType::Global,
    TopLevelMode::Module => ScopeType::Module,
  };
  let mut table = SymbolTable::new(top_typ);
  ScopeBuilder::new(&mut table).build(top)?;
  resolve::resolve_references(top, &mut table);
  if opts.compat.legacy_catch() {
    compat::apply_legacy_catch(top, &mut table);
  }
  if opts.compat.legacy_loop() {
    compat::apply_legacy_loop(top, &mut table);
  }
  Ok(table)
}

/// Resolves and then mangles in one call.
pub fn mangle_identifiers(
  top: &mut Node<TopLevel>,
  mode: TopLevelMode,
  opts: &MangleOptions,
) -> ScopeResult<SymbolTable> {
  let resolve_opts = ResolveOptions { compat: opts.compat };
  let mut table = compute_symbols_with_options(top, mode, &resolve_opts)?;
  mangle::mangle_names(top, &mut table, opts);
  Ok(table)
}

/// Resolves and then expands in one call.
pub fn expand_identifiers(
  top: &mut Node<TopLevel>,
  mode: TopLevelMode,
  opts: &MangleOptions,
) -> ScopeResult<SymbolTable> {
  let resolve_opts = ResolveOptions { compat: opts.compat };
  let mut table = compute_symbols_with_options(top, mode, &resolve_opts)?;
  expand::expand_names(top, &mut table, opts);
  Ok(table)
}
