use crate::mangle::unmangleable;
use crate::mangle::MangleOptions;
use crate::symbol::SymbolId;
use crate::symbol::SymbolTable;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use itertools::Itertools;
use syntax_js::ast::class_or_object::ClassOrObjMemberDirectKey;
use syntax_js::ast::expr::pat::ClassOrFuncName;
use syntax_js::ast::expr::pat::IdPat;
use syntax_js::ast::expr::BinaryExpr;
use syntax_js::ast::expr::FuncExpr;
use syntax_js::ast::expr::IdExpr;
use syntax_js::ast::expr::LitNumExpr;
use syntax_js::ast::expr::LitRegexExpr;
use syntax_js::ast::expr::LitStrExpr;
use syntax_js::ast::expr::MemberExpr;
use syntax_js::ast::expr::UnaryExpr;
use syntax_js::ast::node::Node;
use syntax_js::ast::node::NodeAssocData;
use syntax_js::ast::stmt::decl::FuncDecl;
use syntax_js::ast::stmt::decl::VarDecl;
use syntax_js::ast::stmt::BreakStmt;
use syntax_js::ast::stmt::ContinueStmt;
use syntax_js::ast::stmt::ForInStmt;
use syntax_js::ast::stmt::ForOfStmt;
use syntax_js::ast::stmt::ForTripleStmt;
use syntax_js::ast::stmt::IfStmt;
use syntax_js::ast::stmt::ReturnStmt;
use syntax_js::ast::stmt::WhileStmt;
use syntax_js::ast::stx::TopLevel;

/// Every character a generated identifier may contain. The first 54 are
/// valid leading characters; the digits may only appear from the second
/// position on.
const PRINTABLE: &[u8; 64] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$_0123456789";
const LEADING_LEN: usize = 54;

/// Enumerates short names in an order ranked by observed character
/// frequency, so that generated names reuse characters the surviving output
/// already contains; that skew measurably helps downstream compression.
pub struct Base54 {
  freq: [i64; 128],
  chars: Vec<u8>,
}

impl Base54 {
  pub fn new() -> Base54 {
    Base54 {
      freq: [0; 128],
      chars: PRINTABLE.to_vec(),
    }
  }

  pub fn reset(&mut self) {
    self.freq = [0; 128];
    self.chars = PRINTABLE.to_vec();
  }

  pub fn consider(&mut self, text: &str, delta: i64) {
    for b in text.bytes() {
      if b < 128 {
        self.freq[b as usize] += delta;
      }
    }
  }

  /// Orders each character set by descending frequency. The sort is stable,
  /// so ties keep the baseline ordering and output stays deterministic.
  pub fn sort(&mut self) {
    let (leading, digits) = PRINTABLE.split_at(LEADING_LEN);
    self.chars = leading
      .iter()
      .copied()
      .sorted_by_key(|&c| -self.freq[c as usize])
      .chain(
        digits
          .iter()
          .copied()
          .sorted_by_key(|&c| -self.freq[c as usize]),
      )
      .collect();
  }

  /// Bijective index-to-name conversion: the first character comes from the
  /// 54-character leading alphabet, the rest from all 64. Offset by one so
  /// index 0 yields the first leading character rather than an empty name.
  pub fn name(&self, mut num: usize) -> String {
    let mut out = Vec::new();
    let mut base = LEADING_LEN;
    num += 1;
    loop {
      num -= 1;
      out.push(self.chars[num % base]);
      num /= base;
      if num == 0 {
        break;
      }
      base = PRINTABLE.len();
    }
    String::from_utf8(out).unwrap()
  }
}

impl Default for Base54 {
  fn default() -> Base54 {
    Base54::new()
  }
}

type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type ClassOrFuncNameNode = Node<ClassOrFuncName>;
type MemberExprNode = Node<MemberExpr>;
type BinaryExprNode = Node<BinaryExpr>;
type UnaryExprNode = Node<UnaryExpr>;
type FuncExprNode = Node<FuncExpr>;
type FuncDeclNode = Node<FuncDecl>;
type VarDeclNode = Node<VarDecl>;
type ClassOrObjMemberDirectKeyNode = Node<ClassOrObjMemberDirectKey>;
type LitStrExprNode = Node<LitStrExpr>;
type LitNumExprNode = Node<LitNumExpr>;
type LitRegexExprNode = Node<LitRegexExpr>;
type ReturnStmtNode = Node<ReturnStmt>;
type IfStmtNode = Node<IfStmt>;
type WhileStmtNode = Node<WhileStmt>;
type ForInStmtNode = Node<ForInStmt>;
type ForOfStmtNode = Node<ForOfStmt>;
type ForTripleStmtNode = Node<ForTripleStmt>;
type BreakStmtNode = Node<BreakStmt>;
type ContinueStmtNode = Node<ContinueStmt>;

/// Counts the characters of everything that would survive in the rendered
/// output: names that cannot be renamed, property names, keywords,
/// operators, and optionally literal text. Rename-eligible identifiers are
/// skipped since their text will not survive mangling.
pub fn compute_char_frequency(
  top: &Node<TopLevel>,
  table: &SymbolTable,
  opts: &MangleOptions,
) -> Base54 {
  let mut visitor = CharFreqVisitor {
    table,
    opts,
    freq: Base54::new(),
  };
  top.drive(&mut visitor);
  visitor.freq
}

#[derive(Visitor)]
#[visitor(
  IdExprNode(enter),
  IdPatNode(enter),
  ClassOrFuncNameNode(enter),
  MemberExprNode(enter),
  BinaryExprNode(enter),
  UnaryExprNode(enter),
  FuncExprNode(enter),
  FuncDeclNode(enter),
  VarDeclNode(enter),
  ClassOrObjMemberDirectKeyNode(enter),
  LitStrExprNode(enter),
  LitNumExprNode(enter),
  LitRegexExprNode(enter),
  ReturnStmtNode(enter),
  IfStmtNode(enter),
  WhileStmtNode(enter),
  ForInStmtNode(enter),
  ForOfStmtNode(enter),
  ForTripleStmtNode(enter),
  BreakStmtNode(enter),
  ContinueStmtNode(enter)
)]
struct CharFreqVisitor<'a> {
  table: &'a SymbolTable,
  opts: &'a MangleOptions,
  freq: Base54,
}

impl<'a> CharFreqVisitor<'a> {
  fn identifier(&mut self, assoc: &NodeAssocData, name: &str) {
    let surviving = match assoc.get::<SymbolId>() {
      Some(&sym) => unmangleable(self.table, self.opts, sym),
      // Unbound identifiers (e.g. export aliases) print as-is.
      None => true,
    };
    if surviving {
      self.freq.consider(name, 1);
    }
  }

  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self.identifier(&node.assoc, &node.stx.name);
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    self.identifier(&node.assoc, &node.stx.name);
  }

  fn enter_class_or_func_name_node(&mut self, node: &ClassOrFuncNameNode) {
    self.identifier(&node.assoc, &node.stx.name);
  }

  fn enter_member_expr_node(&mut self, node: &MemberExprNode) {
    self.freq.consider(".", 1);
    self.freq.consider(&node.stx.right, 1);
  }

  fn enter_binary_expr_node(&mut self, node: &BinaryExprNode) {
    self.freq.consider(node.stx.operator.as_str(), 1);
  }

  fn enter_unary_expr_node(&mut self, node: &UnaryExprNode) {
    self.freq.consider(node.stx.operator.as_str(), 1);
  }

  fn enter_func_expr_node(&mut self, _node: &FuncExprNode) {
    self.freq.consider("function", 1);
  }

  fn enter_func_decl_node(&mut self, _node: &FuncDeclNode) {
    self.freq.consider("function", 1);
  }

  fn enter_var_decl_node(&mut self, node: &VarDeclNode) {
    self.freq.consider(node.stx.mode.as_str(), 1);
  }

  fn enter_class_or_obj_member_direct_key_node(&mut self, node: &ClassOrObjMemberDirectKeyNode) {
    self.freq.consider(&node.stx.key, 1);
  }

  fn enter_lit_str_expr_node(&mut self, node: &LitStrExprNode) {
    if self.opts.consider_literals {
      self.freq.consider(&node.stx.value, 1);
    }
  }

  fn enter_lit_num_expr_node(&mut self, node: &LitNumExprNode) {
    if self.opts.consider_literals {
      self.freq.consider(&node.stx.value.to_string(), 1);
    }
  }

  fn enter_lit_regex_expr_node(&mut self, node: &LitRegexExprNode) {
    if self.opts.consider_literals {
      self.freq.consider(&node.stx.value, 1);
    }
  }

  fn enter_return_stmt_node(&mut self, _node: &ReturnStmtNode) {
    self.freq.consider("return", 1);
  }

  fn enter_if_stmt_node(&mut self, _node: &IfStmtNode) {
    self.freq.consider("if", 1);
  }

  fn enter_while_stmt_node(&mut self, _node: &WhileStmtNode) {
    self.freq.consider("while", 1);
  }

  fn enter_for_in_stmt_node(&mut self, _node: &ForInStmtNode) {
    self.freq.consider("for in", 1);
  }

  fn enter_for_of_stmt_node(&mut self, _node: &ForOfStmtNode) {
    self.freq.consider("for of", 1);
  }

  fn enter_for_triple_stmt_node(&mut self, _node: &ForTripleStmtNode) {
    self.freq.consider("for", 1);
  }

  fn enter_break_stmt_node(&mut self, _node: &BreakStmtNode) {
    self.freq.consider("break", 1);
  }

  fn enter_continue_stmt_node(&mut self, _node: &ContinueStmtNode) {
    self.freq.consider("continue", 1);
  }
}
