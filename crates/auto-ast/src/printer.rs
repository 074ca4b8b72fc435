//! Canonical text printer for the Auto AST
//!
//! Serializes a tree back to `.at` source. Uses two-space indentation,
//! one statement per line, and `, ` between list items. Group nodes are
//! printed as written, so printing a parsed tree and parsing it again yields
//! the same structure.

use crate::{
    Block, CaseBody, EnumDecl, Expr, ExprKind, FnBody, FnDecl, ForKind, ForStmt, Hole, IfStmt,
    ImportDecl, Literal, Name, NodeDecl, PairKey, Param, Program, Prop, Statement,
    StatementKind, StrForm, StrLit, StrPart, TypeDecl, TypeRef, TypeRefKind, UseDecl, VarDecl,
    BindingKind, WhenStmt,
};

/// Trait for converting AST nodes to canonical Auto source text.
pub trait ToAuto {
    /// Convert to source text; `indent` is the nesting level of the
    /// surrounding block and is used for lines after the first.
    fn to_auto(&self, indent: usize) -> String;
}

/// Helper to generate indentation string (two spaces per level).
fn indent_str(level: usize) -> String {
    "  ".repeat(level)
}

fn join<T: ToAuto>(items: &[T], indent: usize, sep: &str) -> String {
    items
        .iter()
        .map(|item| item.to_auto(indent))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Print statements one per line inside `{ }`.
fn statements_block(statements: &[Statement], indent: usize) -> String {
    if statements.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::from("{\n");
    for stmt in statements {
        out.push_str(&indent_str(indent + 1));
        out.push_str(&stmt.to_auto(indent + 1));
        out.push('\n');
    }
    out.push_str(&indent_str(indent));
    out.push('}');
    out
}

/// Escape text for a quoted string form.
fn escape_text(text: &str, form: StrForm) -> String {
    if form == StrForm::Multiline {
        return text.to_string();
    }
    let formatted = matches!(
        form,
        StrForm::Formatted | StrForm::FormattedTriple | StrForm::FormattedTick
    );
    let mut result = String::new();
    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\u{8}' => result.push_str("\\b"),
            '\u{c}' => result.push_str("\\f"),
            '\n' if form != StrForm::FormattedTick => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\u{b}' => result.push_str("\\v"),
            '"' if matches!(form, StrForm::Double | StrForm::Formatted | StrForm::FormattedTriple) => {
                result.push_str("\\\"")
            }
            '\'' if form == StrForm::Single => result.push_str("\\'"),
            '`' if form == StrForm::FormattedTick => result.push_str("\\`"),
            '$' if formatted => result.push_str("\\$"),
            _ => result.push(c),
        }
    }
    result
}

fn continues_name(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
}

// ===== Program & blocks =====

impl ToAuto for Program {
    fn to_auto(&self, indent: usize) -> String {
        self.statements
            .iter()
            .map(|s| format!("{}{}", indent_str(indent), s.to_auto(indent)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ToAuto for Block {
    fn to_auto(&self, indent: usize) -> String {
        statements_block(&self.statements, indent)
    }
}

// ===== Statements =====

impl ToAuto for Statement {
    fn to_auto(&self, indent: usize) -> String {
        match &self.kind {
            StatementKind::Mod { name, body } => {
                format!("mod {} {}", name.to_auto(indent), body.to_auto(indent))
            }
            StatementKind::Use(decl) => decl.to_auto(indent),
            StatementKind::Import(decl) => decl.to_auto(indent),
            StatementKind::Var(decl) => decl.to_auto(indent),
            StatementKind::Fn(decl) => decl.to_auto(indent),
            StatementKind::Node(decl) => decl.to_auto(indent),
            StatementKind::Assign { target, value } => {
                format!("{} = {}", target.to_auto(indent), value.to_auto(indent))
            }
            StatementKind::If(stmt) => stmt.to_auto(indent),
            StatementKind::For(stmt) => stmt.to_auto(indent),
            StatementKind::When(stmt) => stmt.to_auto(indent),
            StatementKind::Ui(body) => format!("ui {}", body.to_auto(indent)),
            StatementKind::Style(body) => format!("style {}", body.to_auto(indent)),
            StatementKind::Type(decl) => decl.to_auto(indent),
            StatementKind::Enum(decl) => decl.to_auto(indent),
            StatementKind::Break => "break".to_string(),
            StatementKind::Expr(expr) => expr.to_auto(indent),
        }
    }
}

impl ToAuto for UseDecl {
    fn to_auto(&self, indent: usize) -> String {
        let mut out = format!("use {}", self.path.to_auto(indent));
        if !self.subs.is_empty() {
            out.push_str(": ");
            out.push_str(&join(&self.subs, indent, ", "));
        }
        out
    }
}

impl ToAuto for ImportDecl {
    fn to_auto(&self, indent: usize) -> String {
        match &self.args {
            Some(args) => format!(
                "import {}({})",
                self.path.to_auto(indent),
                join(args, indent, ", ")
            ),
            None => format!("import {}", self.path.to_auto(indent)),
        }
    }
}

impl ToAuto for VarDecl {
    fn to_auto(&self, indent: usize) -> String {
        let keyword = match self.binding {
            BindingKind::Var => "var",
            BindingKind::Let => "let",
        };
        let ty = self
            .ty
            .as_ref()
            .map(|t| format!(" {}", t.to_auto(indent)))
            .unwrap_or_default();
        format!(
            "{} {}{} = {}",
            keyword,
            self.name.text,
            ty,
            self.value.to_auto(indent)
        )
    }
}

impl ToAuto for FnDecl {
    fn to_auto(&self, indent: usize) -> String {
        let ret = self
            .ret
            .as_ref()
            .map(|t| format!(" {}", t.to_auto(indent)))
            .unwrap_or_default();
        let body = match &self.body {
            FnBody::Block(block) => format!(" {}", block.to_auto(indent)),
            FnBody::Expr(expr) => format!(" = {}", expr.to_auto(indent)),
        };
        format!(
            "fn {}({}){}{}",
            self.name.to_auto(indent),
            join(&self.params, indent, ", "),
            ret,
            body
        )
    }
}

impl ToAuto for Param {
    fn to_auto(&self, indent: usize) -> String {
        match &self.ty {
            Some(ty) => format!("{} {}", self.name.text, ty.to_auto(indent)),
            None => self.name.text.clone(),
        }
    }
}

impl ToAuto for NodeDecl {
    fn to_auto(&self, indent: usize) -> String {
        let head = format!(
            "node {}({})",
            self.name.to_auto(indent),
            join(&self.props, indent, ", ")
        );
        match &self.body {
            Some(entries) => format!("{} {}", head, statements_block(entries, indent)),
            None => head,
        }
    }
}

impl ToAuto for Prop {
    fn to_auto(&self, indent: usize) -> String {
        match &self.ty {
            Some(ty) => format!("{} {}", self.name.to_auto(indent), ty.to_auto(indent)),
            None => self.name.to_auto(indent),
        }
    }
}

impl ToAuto for IfStmt {
    fn to_auto(&self, indent: usize) -> String {
        let mut out = format!(
            "if {} {}",
            self.cond.to_auto(indent),
            self.then.to_auto(indent)
        );
        for branch in &self.else_ifs {
            out.push_str(&format!(
                " else if {} {}",
                branch.cond.to_auto(indent),
                branch.then.to_auto(indent)
            ));
        }
        if let Some(else_) = &self.else_ {
            out.push_str(&format!(" else {}", else_.to_auto(indent)));
        }
        out
    }
}

impl ToAuto for ForStmt {
    fn to_auto(&self, indent: usize) -> String {
        let head = match &self.kind {
            ForKind::Counted { init, cond } => {
                let mut head = String::new();
                for decl in init {
                    head.push_str(&decl.to_auto(indent));
                    head.push_str("; ");
                }
                if let Some(cond) = cond {
                    head.push_str(&cond.to_auto(indent));
                    head.push(' ');
                }
                head
            }
            ForKind::Iter { index, name, iterable } => {
                let index = index
                    .as_ref()
                    .map(|i| format!("{}, ", i.text))
                    .unwrap_or_default();
                format!("{}{} in {} ", index, name.text, iterable.to_auto(indent))
            }
        };
        format!("for {}{}", head, self.body.to_auto(indent))
    }
}

impl ToAuto for CaseBody {
    fn to_auto(&self, indent: usize) -> String {
        match self {
            CaseBody::Block(block) => block.to_auto(indent),
            CaseBody::Arrow(stmt) => format!("-> {}", stmt.to_auto(indent)),
        }
    }
}

impl ToAuto for WhenStmt {
    fn to_auto(&self, indent: usize) -> String {
        let mut out = String::from("when ");
        for decl in &self.init {
            out.push_str(&decl.to_auto(indent));
            out.push_str("; ");
        }
        out.push_str(&self.check.to_auto(indent));
        out.push_str(" {\n");
        let inner = indent_str(indent + 1);
        for case in &self.cases {
            out.push_str(&format!(
                "{}is {} {}\n",
                inner,
                case.pattern.to_auto(indent + 1),
                case.body.to_auto(indent + 1)
            ));
        }
        if let Some(else_) = &self.else_ {
            out.push_str(&format!("{}else {}\n", inner, else_.to_auto(indent + 1)));
        }
        out.push_str(&indent_str(indent));
        out.push('}');
        out
    }
}

impl ToAuto for TypeDecl {
    fn to_auto(&self, indent: usize) -> String {
        let mut out = format!("type {} {{\n", self.name.text);
        for field in &self.fields {
            out.push_str(&format!(
                "{}{}: {}\n",
                indent_str(indent + 1),
                field.name.text,
                field.ty.to_auto(indent)
            ));
        }
        out.push_str(&indent_str(indent));
        out.push('}');
        out
    }
}

impl ToAuto for EnumDecl {
    fn to_auto(&self, indent: usize) -> String {
        let mut out = format!("enum {} {{\n", self.name.text);
        for member in &self.members {
            out.push_str(&indent_str(indent + 1));
            out.push_str(&member.name.text);
            if let Some(value) = &member.value {
                out.push_str(" = ");
                out.push_str(&value.to_auto(indent + 1));
            }
            out.push('\n');
        }
        out.push_str(&indent_str(indent));
        out.push('}');
        out
    }
}

// ===== Expressions =====

impl ToAuto for Expr {
    fn to_auto(&self, indent: usize) -> String {
        match &self.kind {
            ExprKind::Name(name) => name.to_auto(indent),
            ExprKind::Literal(lit) => lit.to_auto(indent),
            ExprKind::Unary { op, operand } => {
                format!("{}{}", op.symbol(), operand.to_auto(indent))
            }
            ExprKind::Binary { op, left, right, .. } => format!(
                "{} {} {}",
                left.to_auto(indent),
                op.symbol(),
                right.to_auto(indent)
            ),
            ExprKind::Comparison { op, left, right, .. } => format!(
                "{} {} {}",
                left.to_auto(indent),
                op.symbol(),
                right.to_auto(indent)
            ),
            ExprKind::Call { callee, args, body } => {
                let mut out = format!("{}({})", callee.to_auto(indent), join(args, indent, ", "));
                if let Some(body) = body {
                    out.push(' ');
                    out.push_str(&body.to_auto(indent));
                }
                out
            }
            ExprKind::Group(inner) => format!("({})", inner.to_auto(indent)),
            ExprKind::Pair { key, value } => {
                format!("{}: {}", key.to_auto(indent), value.to_auto(indent))
            }
            ExprKind::Object(entries) => format!("{{{}}}", join(entries, indent, ", ")),
            ExprKind::Array(items) => format!("[{}]", join(items, indent, ", ")),
            ExprKind::Transition { src, dst } => {
                format!("{} -> {}", src.to_auto(indent), dst.to_auto(indent))
            }
            ExprKind::If(stmt) => stmt.to_auto(indent),
            ExprKind::When(stmt) => stmt.to_auto(indent),
        }
    }
}

impl ToAuto for PairKey {
    fn to_auto(&self, indent: usize) -> String {
        match self {
            PairKey::Name(name) => name.to_auto(indent),
            PairKey::Str(lit) => lit.to_auto(indent),
        }
    }
}

impl ToAuto for Literal {
    fn to_auto(&self, indent: usize) -> String {
        match self {
            Literal::Number { raw, .. } => raw.clone(),
            Literal::Str(lit) => lit.to_auto(indent),
            Literal::True => "true".to_string(),
            Literal::False => "false".to_string(),
            Literal::Null => "null".to_string(),
            Literal::Nil => "nil".to_string(),
        }
    }
}

impl ToAuto for StrLit {
    fn to_auto(&self, indent: usize) -> String {
        let (open, close) = match self.form {
            StrForm::Double => ("\"", "\""),
            StrForm::Single => ("'", "'"),
            StrForm::Multiline => ("```", "```"),
            StrForm::Formatted => ("f\"", "\""),
            StrForm::FormattedTriple => ("f\"\"\"", "\"\"\""),
            StrForm::FormattedTick => ("f`", "`"),
        };
        let mut out = String::from(open);
        for (i, part) in self.parts.iter().enumerate() {
            match part {
                StrPart::Text(text) => out.push_str(&escape_text(text, self.form)),
                StrPart::Hole(Hole::Name(name)) => {
                    let braced = matches!(
                        self.parts.get(i + 1),
                        Some(StrPart::Text(next)) if continues_name(next)
                    );
                    if braced {
                        out.push_str(&format!("${{{}}}", name.to_auto(indent)));
                    } else {
                        out.push('$');
                        out.push_str(&name.to_auto(indent));
                    }
                }
                StrPart::Hole(Hole::Expr(expr)) => {
                    out.push_str(&format!("${{{}}}", expr.to_auto(indent)));
                }
            }
        }
        out.push_str(close);
        out
    }
}

impl ToAuto for Name {
    fn to_auto(&self, _indent: usize) -> String {
        self.path()
    }
}

impl ToAuto for TypeRef {
    fn to_auto(&self, indent: usize) -> String {
        match &self.kind {
            TypeRefKind::Primitive(prim) => prim.keyword().to_string(),
            TypeRefKind::Named(name) => name.to_auto(indent),
        }
    }
}
