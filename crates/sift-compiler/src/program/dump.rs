//! Stable textual rendering of a program, one node per line.
//!
//! Two programs compiled from the same source against equivalent registries
//! dump identically.

use std::fmt::Write;

use super::{Binding, Clause, Expr, Program};

impl Program {
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        writeln!(w, "Program")?;
        if !self.params.is_empty() {
            let params: Vec<_> = self.params.iter().map(|p| format!("@{p}")).collect();
            writeln!(w, "  Params {}", params.join(" "))?;
        }
        for binding in &self.lets {
            format_binding(binding, 1, w)?;
        }
        writeln!(w, "  Return")?;
        format_expr(&self.body, 2, w)
    }
}

fn format_binding(binding: &Binding, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    writeln!(w, "{}Let {}", "  ".repeat(indent), binding.name)?;
    format_expr(&binding.value, indent + 1, w)
}

fn format_expr(expr: &Expr, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    match expr {
        Expr::Literal(value) => writeln!(w, "{prefix}Literal {value}"),
        Expr::Param(name) => writeln!(w, "{prefix}Param @{name}"),
        Expr::Var(name) => writeln!(w, "{prefix}Var {name}"),
        Expr::Call(call) => {
            writeln!(w, "{prefix}Call {}", call.name)?;
            for arg in &call.args {
                format_expr(arg, indent + 1, w)?;
            }
            Ok(())
        }
        Expr::Array(items) => {
            writeln!(w, "{prefix}Array")?;
            for item in items {
                format_expr(item, indent + 1, w)?;
            }
            Ok(())
        }
        Expr::Object(props) => {
            writeln!(w, "{prefix}Object")?;
            for (key, value) in props {
                writeln!(w, "{prefix}  Key {key:?}")?;
                format_expr(value, indent + 2, w)?;
            }
            Ok(())
        }
        Expr::Member { object, property } => {
            writeln!(w, "{prefix}Member .{property}")?;
            format_expr(object, indent + 1, w)
        }
        Expr::Index { object, index } => {
            writeln!(w, "{prefix}Index")?;
            format_expr(object, indent + 1, w)?;
            format_expr(index, indent + 1, w)
        }
        Expr::Unary { op, operand } => {
            writeln!(w, "{prefix}Unary {}", op.as_str())?;
            format_expr(operand, indent + 1, w)
        }
        Expr::Binary { op, lhs, rhs } => {
            writeln!(w, "{prefix}Binary {}", op.as_str())?;
            format_expr(lhs, indent + 1, w)?;
            format_expr(rhs, indent + 1, w)
        }
        Expr::For(for_loop) => {
            writeln!(w, "{prefix}For {}", for_loop.var)?;
            writeln!(w, "{prefix}  In")?;
            format_expr(&for_loop.source, indent + 2, w)?;
            for clause in &for_loop.clauses {
                match clause {
                    Clause::Filter(cond) => {
                        writeln!(w, "{prefix}  Filter")?;
                        format_expr(cond, indent + 2, w)?;
                    }
                    Clause::Let(binding) => format_binding(binding, indent + 1, w)?,
                }
            }
            writeln!(w, "{prefix}  Return")?;
            format_expr(&for_loop.body, indent + 2, w)
        }
    }
}
